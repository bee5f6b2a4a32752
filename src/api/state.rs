//! Application state for the HR API.
//!
//! This module defines the shared state available to all request handlers:
//! the record session behind a mutex, the attendance policy, and the clock.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDateTime};
use tracing::warn;

use crate::app::HrState;
use crate::config::{AttendancePolicy, ConfigLoader};
use crate::error::HrResult;
use crate::store::RecordStore;

/// Source of the current local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// The machine's local clock.
    System,
    /// A fixed instant, for tests and demos.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// The current local date and time.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(now) => *now,
        }
    }
}

/// The in-memory records together with the store they persist to.
pub struct Session {
    /// The records.
    pub state: HrState,
    /// Where the records are saved.
    pub store: RecordStore,
}

/// Shared application state.
///
/// Every operation runs with the session locked, so a leave conflict check
/// and the insert that follows it can never interleave with another request.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    policy: Arc<AttendancePolicy>,
    clock: Clock,
}

impl AppState {
    /// Creates the application state from already-loaded parts.
    pub fn new(state: HrState, store: RecordStore, policy: AttendancePolicy, clock: Clock) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session { state, store })),
            policy: Arc::new(policy),
            clock,
        }
    }

    /// Opens the configured store, loads it and runs the startup sync.
    pub fn from_config(config: &ConfigLoader, clock: Clock) -> HrResult<Self> {
        let store = RecordStore::open(&config.settings().storage, config.seed().clone())?;
        let state = HrState::startup(&store, clock.now().date());
        Ok(Self::new(
            state,
            store,
            config.settings().attendance.clone(),
            clock,
        ))
    }

    /// The current local time according to the configured clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// The attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // Poisoning is recovered from; the records stay usable.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs a query against the records, re-deriving statuses for today first.
    pub fn read<T>(&self, query: impl FnOnce(&HrState, NaiveDateTime) -> T) -> T {
        let now = self.now();
        let mut session = self.lock();
        session.state.sync_statuses(now.date());
        query(&session.state, now)
    }

    /// Runs a command against the records and saves them if it succeeds.
    ///
    /// When the command or the save fails, the in-memory records are put
    /// back as they were before the command ran.
    pub fn mutate<T>(
        &self,
        command: impl FnOnce(&mut HrState, NaiveDateTime) -> HrResult<T>,
    ) -> HrResult<T> {
        let now = self.now();
        let mut guard = self.lock();
        let session = &mut *guard;
        session.state.sync_statuses(now.date());

        let snapshot = session.state.clone();
        let result = match command(&mut session.state, now) {
            Ok(output) => session.store.save(&session.state).map(|()| output),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            warn!(error = %err, "Command failed, restoring previous records");
            session.state = snapshot;
        }
        result
    }
}
