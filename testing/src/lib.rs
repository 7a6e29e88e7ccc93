//! # Listflow Testing
//!
//! Testing utilities and helpers for the listflow architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use listflow_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(StoriesReducer::new())
//!     .with_env(StoriesEnvironment::new())
//!     .given_state(StoriesState::new())
//!     .when_action(StoriesAction::FetchInit)
//!     .then_state(|state| {
//!         assert!(state.is_loading);
//!         assert!(!state.is_error);
//!     })
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use listflow_core::environment::Clock;

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use listflow_core::environment::KeyValueStorage;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use listflow_testing::mocks::FixedClock;
    /// use listflow_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Storage mock that records every save for later inspection
    ///
    /// Behaves like an in-memory key-value store but additionally keeps the
    /// full ordered history of `(key, value)` writes, so tests can assert
    /// not just the final value but how many times the orchestrating layer
    /// wrote through.
    #[derive(Debug, Default)]
    pub struct RecordingStorage {
        entries: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, String)>>,
    }

    impl RecordingStorage {
        /// Create an empty recording storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a storage pre-seeded with one key
        #[must_use]
        pub fn with_entry(key: &str, value: &str) -> Self {
            let storage = Self::default();
            storage
                .entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .insert(key.to_owned(), value.to_owned());
            storage
        }

        /// All writes observed so far, in order
        #[must_use]
        pub fn writes(&self) -> Vec<(String, String)> {
            self.writes
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }
    }

    impl KeyValueStorage for RecordingStorage {
        fn load(&self, key: &str) -> Option<String> {
            self.entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .get(key)
                .cloned()
        }

        fn save(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .insert(key.to_owned(), value.to_owned());
            self.writes
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((key.to_owned(), value.to_owned()));
        }
    }
}

pub use mocks::test_clock;
