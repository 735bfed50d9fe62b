//! Configuration loading and management for the daycare billing engine.
//!
//! This module provides functionality to load a daycare's configuration from
//! YAML files: letterhead details, the public holiday calendar and enrolled
//! families.
//!
//! # Example
//!
//! ```no_run
//! use daycare_billing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sunshine").unwrap();
//! println!("Loaded daycare: {}", config.daycare().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DaycareConfig, FamiliesConfig, HolidaysConfig};
