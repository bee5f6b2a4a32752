//! Configuration loading for the HR record core.
//!
//! This module loads application settings and first-run seed records from
//! a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hr_core::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hr_pro").unwrap();
//! println!("Seed employees: {}", config.seed().employees.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppSettings, AttendancePolicy, HrConfig, SeedData, ServerSettings, StorageSettings,
};
