//! Configuration types for the HR record core.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files in a configuration directory.

use std::path::PathBuf;

use chrono::{Duration, NaiveTime};
use serde::Deserialize;

use crate::models::{AttendanceStatus, Employee, LeaveRequest, PayrollRecord};

/// Where and how the record store persists its keys.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Prefix prepended to every logical key (e.g. `hr_` gives `hr_leaves`).
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Directory for the file backend. `None` keeps everything in memory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_key_prefix() -> String {
    "hr_".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            data_dir: None,
        }
    }
}

/// Rules for classifying a clock-in as on time or late.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendancePolicy {
    /// Start of the working day.
    #[serde(with = "crate::models::hhmm", default = "default_work_start")]
    pub work_start: NaiveTime,
    /// Minutes after `work_start` that still count as on time.
    #[serde(default)]
    pub grace_minutes: u32,
}

fn default_work_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            work_start: default_work_start(),
            grace_minutes: 0,
        }
    }
}

impl AttendancePolicy {
    /// Classifies a clock-in time.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_core::config::AttendancePolicy;
    /// use hr_core::models::AttendanceStatus;
    /// use chrono::NaiveTime;
    ///
    /// let policy = AttendancePolicy::default();
    /// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    /// assert_eq!(policy.classify(at(9, 0)), AttendanceStatus::OnTime);
    /// assert_eq!(policy.classify(at(9, 1)), AttendanceStatus::Late);
    /// ```
    pub fn classify(&self, clock_in: NaiveTime) -> AttendanceStatus {
        let deadline = self.work_start + Duration::minutes(i64::from(self.grace_minutes));
        // A grace period running past midnight wraps; treat it as "never late".
        if deadline < self.work_start || clock_in <= deadline {
            AttendanceStatus::OnTime
        } else {
            AttendanceStatus::Late
        }
    }
}

/// HTTP adapter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Contents of `app.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSettings {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Attendance policy.
    #[serde(default)]
    pub attendance: AttendancePolicy,
    /// HTTP adapter settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// Contents of `seed.yaml`: records used when nothing is persisted yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Seed employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Seed leave requests.
    #[serde(default)]
    pub leaves: Vec<LeaveRequest>,
    /// Seed payroll records.
    #[serde(default)]
    pub payroll: Vec<PayrollRecord>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct HrConfig {
    /// Application settings.
    pub settings: AppSettings,
    /// Seed records.
    pub seed: SeedData,
}
