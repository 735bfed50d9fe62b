//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a daycare's
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{BillingError, BillingResult};
use crate::models::{Child, DayCare, HolidaySet, Parent, Registry};

use super::types::{DaycareConfig, FamiliesConfig, HolidaysConfig};

/// Loads and provides access to daycare configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/sunshine/
/// ├── daycare.yaml    # Daycare letterhead details
/// ├── holidays.yaml   # Public holidays (ISO dates)
/// └── families.yaml   # Enrolled parents and children
/// ```
///
/// # Example
///
/// ```no_run
/// use daycare_billing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sunshine")?;
/// let parent = loader.get_parent("parent_001")?;
/// println!("Billing {}", parent.name);
/// # Ok::<(), daycare_billing::error::BillingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: DaycareConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or an invalid weekday index
    /// - Any holiday is not a valid ISO date
    /// - A parent or child id is enrolled twice
    pub fn load<P: AsRef<Path>>(path: P) -> BillingResult<Self> {
        let path = path.as_ref();

        let daycare = Self::load_yaml::<DayCare>(&path.join("daycare.yaml"))?;

        let holidays_config = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;
        let holidays = HolidaySet::from_iso_strings(&holidays_config.holidays)?;

        let families = Self::load_yaml::<FamiliesConfig>(&path.join("families.yaml"))?;
        let registry = Self::build_registry(families.parents, families.children)?;

        info!(
            path = %path.display(),
            daycare = %daycare.name,
            holidays = holidays.len(),
            parents = registry.parents().count(),
            children = registry.children().count(),
            "Daycare configuration loaded"
        );

        Ok(Self {
            config: DaycareConfig::new(daycare, holidays, registry),
        })
    }

    /// Wraps an already assembled configuration.
    pub fn from_config(config: DaycareConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> BillingResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| BillingError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| BillingError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Enrols parents first so children link to them as they are added.
    fn build_registry(parents: Vec<Parent>, children: Vec<Child>) -> BillingResult<Registry> {
        let mut registry = Registry::new();

        for parent in parents {
            registry.add_parent(parent)?;
        }
        for child in children {
            registry.enrol_child(child)?;
        }

        for orphan in registry.orphans() {
            warn!(
                child_id = %orphan.id,
                parent_id = %orphan.parent_id,
                "Child will not be invoiced: parent is not enrolled"
            );
        }

        Ok(registry)
    }

    /// Returns the underlying daycare configuration.
    pub fn config(&self) -> &DaycareConfig {
        &self.config
    }

    /// Returns the daycare details.
    pub fn daycare(&self) -> &DayCare {
        self.config.daycare()
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidaySet {
        self.config.holidays()
    }

    /// Returns the enrolment registry.
    pub fn registry(&self) -> &Registry {
        self.config.registry()
    }

    /// Gets an enrolled parent by id.
    pub fn get_parent(&self, id: &str) -> BillingResult<&Parent> {
        self.config.registry().parent(id)
    }

    /// Gets an enrolled child by id.
    pub fn get_child(&self, id: &str) -> BillingResult<&Child> {
        self.config.registry().child(id)
    }
}
