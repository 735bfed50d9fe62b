//! Application state for the daycare billing API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ConfigLoader;
use crate::models::AccountingLedger;

/// Shared application state.
///
/// Contains the loaded daycare configuration, which is read-only, and the
/// accounting ledger that invoice generation records into.
#[derive(Clone)]
pub struct AppState {
    /// The loaded daycare configuration.
    config: Arc<ConfigLoader>,
    /// Per-child monthly accounting recorded by generated invoices.
    ledger: Arc<RwLock<AccountingLedger>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader
    /// and an empty ledger.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(RwLock::new(AccountingLedger::new())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared accounting ledger.
    pub fn ledger(&self) -> &RwLock<AccountingLedger> {
        &self.ledger
    }
}
