//! The record store: maps [`HrState`] onto a key-value backend.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::app::HrState;
use crate::config::{SeedData, StorageSettings};
use crate::error::{HrError, HrResult};
use crate::models::{ClockSession, Employee, LeaveRequest, StoredLeave, Theme};

use super::backend::{FileBackend, KeyValueBackend, MemoryBackend};

/// Logical keys, before the configured prefix is applied.
pub mod keys {
    /// JSON array of employees.
    pub const EMPLOYEES: &str = "employees";
    /// JSON array of leave requests.
    pub const LEAVES: &str = "leaves";
    /// JSON array of attendance logs.
    pub const ATTENDANCE: &str = "attendance";
    /// JSON array of payroll records.
    pub const PAYROLL: &str = "payroll";
    /// JSON array of notifications, newest first.
    pub const NOTIFICATIONS: &str = "notifications";
    /// JSON boolean.
    pub const IS_CLOCKED_IN: &str = "isClockedIn";
    /// Bare `HH:MM` string; absent when not clocked in.
    pub const LAST_CLOCK_IN_TIME: &str = "lastClockInTime";
    /// Bare `dark` or `light`.
    pub const THEME: &str = "theme";
}

/// Loads and saves the application state through a [`KeyValueBackend`].
///
/// Loading is lenient: a key that is absent, unreadable or malformed falls
/// back to its default (seed records for employees, leaves and payroll;
/// empty or off for everything else). Each key recovers independently.
///
/// # Example
///
/// ```
/// use hr_core::config::SeedData;
/// use hr_core::store::RecordStore;
///
/// let mut store = RecordStore::in_memory(SeedData::default());
/// let mut state = store.load();
/// state.toggle_theme();
/// store.save(&state)?;
/// assert_eq!(store.load(), state);
/// # Ok::<(), hr_core::error::HrError>(())
/// ```
pub struct RecordStore {
    backend: Box<dyn KeyValueBackend>,
    key_prefix: String,
    seed: SeedData,
}

impl RecordStore {
    /// Creates a store over `backend`.
    pub fn new(
        backend: impl KeyValueBackend + 'static,
        key_prefix: impl Into<String>,
        seed: SeedData,
    ) -> Self {
        Self {
            backend: Box::new(backend),
            key_prefix: key_prefix.into(),
            seed,
        }
    }

    /// A store over a fresh in-memory backend with the default `hr_` prefix.
    pub fn in_memory(seed: SeedData) -> Self {
        Self::new(MemoryBackend::new(), StorageSettings::default().key_prefix, seed)
    }

    /// Opens the backend described by `settings`: a file backend when a
    /// data directory is configured, memory otherwise.
    pub fn open(settings: &StorageSettings, seed: SeedData) -> HrResult<Self> {
        match &settings.data_dir {
            Some(dir) => Ok(Self::new(
                FileBackend::open(dir)?,
                settings.key_prefix.clone(),
                seed,
            )),
            None => Ok(Self::new(
                MemoryBackend::new(),
                settings.key_prefix.clone(),
                seed,
            )),
        }
    }

    /// The physical key for a logical key.
    pub fn key(&self, logical: &str) -> String {
        format!("{}{}", self.key_prefix, logical)
    }

    /// Restores the full state, substituting defaults for any key that is
    /// absent or malformed. Never fails.
    pub fn load(&self) -> HrState {
        let is_clocked_in = self.read_json::<bool>(keys::IS_CLOCKED_IN).unwrap_or(false);
        let last_clock_in_time = self.read_raw(keys::LAST_CLOCK_IN_TIME);
        let theme = self
            .read_raw(keys::THEME)
            .and_then(|raw| match raw.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(message) => {
                    warn!(
                        key = %self.key(keys::THEME),
                        error = %message,
                        "Ignoring malformed value"
                    );
                    None
                }
            })
            .unwrap_or_default();

        let employees: Vec<Employee> = self
            .read_json(keys::EMPLOYEES)
            .unwrap_or_else(|| self.seed.employees.clone());
        let leaves = self
            .read_json::<Vec<StoredLeave>>(keys::LEAVES)
            .map(|stored| self.resolve_leaves(stored, &employees))
            .unwrap_or_else(|| self.seed.leaves.clone());

        HrState {
            employees,
            leaves,
            attendance: self.read_json(keys::ATTENDANCE).unwrap_or_default(),
            payroll: self
                .read_json(keys::PAYROLL)
                .unwrap_or_else(|| self.seed.payroll.clone()),
            notifications: self.read_json(keys::NOTIFICATIONS).unwrap_or_default(),
            session: ClockSession {
                is_clocked_in,
                last_clock_in_time,
            },
            theme,
        }
    }

    /// Writes every key from `state`.
    ///
    /// Saving the same state twice leaves the backend unchanged. Every
    /// in-memory state serializes; the only failures are backend writes.
    ///
    /// Keys are written one at a time and the write is not atomic across
    /// keys. A failure partway through leaves the earlier keys holding the
    /// new state and the later ones holding the old.
    pub fn save(&mut self, state: &HrState) -> HrResult<()> {
        self.write_json(keys::EMPLOYEES, &state.employees)?;
        self.write_json(keys::LEAVES, &state.leaves)?;
        self.write_json(keys::ATTENDANCE, &state.attendance)?;
        self.write_json(keys::PAYROLL, &state.payroll)?;
        self.write_json(keys::NOTIFICATIONS, &state.notifications)?;
        self.write_json(keys::IS_CLOCKED_IN, &state.session.is_clocked_in)?;

        let last_clock_in = self.key(keys::LAST_CLOCK_IN_TIME);
        match &state.session.last_clock_in_time {
            Some(time) => self.backend.set(&last_clock_in, time)?,
            None => self.backend.remove(&last_clock_in)?,
        }

        let theme = self.key(keys::THEME);
        self.backend.set(&theme, state.theme.as_str())?;

        debug!(prefix = %self.key_prefix, "Saved HR state");
        Ok(())
    }

    /// Resolves each stored leave against `employees`, skipping the ones
    /// that name no known employee or have an inverted range.
    fn resolve_leaves(
        &self,
        stored: Vec<StoredLeave>,
        employees: &[Employee],
    ) -> Vec<LeaveRequest> {
        stored
            .into_iter()
            .filter_map(|leave| match leave.resolve(employees) {
                Ok(leave) => Some(leave),
                Err(err) => {
                    warn!(key = %self.key(keys::LEAVES), error = %err, "Skipping stored leave");
                    None
                }
            })
            .collect()
    }

    fn read_raw(&self, logical: &str) -> Option<String> {
        let key = self.key(logical);
        match self.backend.get(&key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, error = %err, "Unreadable key, using default");
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, logical: &str) -> Option<T> {
        let raw = self.read_raw(logical)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key = %self.key(logical), error = %err, "Malformed key, using default");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, logical: &str, value: &T) -> HrResult<()> {
        let key = self.key(logical);
        let json = serde_json::to_string(value).map_err(|e| HrError::Storage {
            key: key.clone(),
            message: e.to_string(),
        })?;
        self.backend.set(&key, &json)
    }
}
