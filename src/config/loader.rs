//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading application
//! settings and seed records from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{HrError, HrResult};

use super::types::{AppSettings, HrConfig, SeedData};

/// Loads and provides access to the HR configuration.
///
/// # Directory Structure
///
/// ```text
/// config/hr_pro/
/// ├── app.yaml   # Storage, attendance policy and server settings
/// └── seed.yaml  # Employees, leave requests and payroll used on first run
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_core::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hr_pro")?;
/// println!("Key prefix: {}", loader.settings().storage.key_prefix);
/// # Ok::<(), hr_core::error::HrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML or invalid records (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> HrResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<AppSettings>(&path.join("app.yaml"))?;
        let seed = Self::load_yaml::<SeedData>(&path.join("seed.yaml"))?;

        info!(
            path = %path.display(),
            employees = seed.employees.len(),
            leaves = seed.leaves.len(),
            payroll = seed.payroll.len(),
            "Loaded HR configuration"
        );

        Ok(Self {
            config: HrConfig { settings, seed },
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> HrResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| HrError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the application settings.
    pub fn settings(&self) -> &AppSettings {
        &self.config.settings
    }

    /// Returns the seed records.
    pub fn seed(&self) -> &SeedData {
        &self.config.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeId, LeaveStatus};
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/hr_pro"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().storage.key_prefix, "hr_");
        assert_eq!(
            loader.settings().attendance.work_start,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_seed_employees_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let names: Vec<&str> = loader.seed().employees.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alice Johnson", "Bob Smith", "Charlie Davis"]);
    }

    #[test]
    fn test_seed_leaves_reference_employees_by_id() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let leaves = &loader.seed().leaves;
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].employee_id, EmployeeId(1));
        assert_eq!(leaves[0].status, LeaveStatus::Pending);
        assert_eq!(leaves[1].status, LeaveStatus::Approved);
    }

    #[test]
    fn test_seed_payroll_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let alice = loader
            .seed()
            .payroll
            .iter()
            .find(|p| p.employee_id == EmployeeId(1))
            .unwrap();
        assert_eq!(alice.net_pay(), Decimal::new(5750, 0));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(HrError::ConfigNotFound { path }) => assert!(path.contains("app.yaml")),
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.yaml"), "storage: [unclosed").unwrap();
        fs::write(dir.path().join("seed.yaml"), "employees: []").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(HrError::ConfigParseError { path, .. }) => assert!(path.contains("app.yaml")),
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.yaml"), "{}").unwrap();
        fs::write(dir.path().join("seed.yaml"), "{}").unwrap();

        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(loader.settings().storage.key_prefix, "hr_");
        assert!(loader.settings().storage.data_dir.is_none());
        assert_eq!(loader.settings().server.bind, "127.0.0.1:3000");
        assert!(loader.seed().employees.is_empty());
    }
}
