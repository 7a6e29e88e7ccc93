//! # Listflow Core
//!
//! Core traits and types for the listflow architecture.
//!
//! This crate provides the fundamental abstractions for managing
//! asynchronously loaded, user-mutable lists with the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: the current data of a feature (a list plus its fetch flags)
//! - **Action**: a tagged description of a requested state transition
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Impossible states prevented by transitions, not by discipline
//!
//! ## Example
//!
//! ```ignore
//! use listflow_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct FeedState {
//!     entries: Vec<Entry>,
//!     is_loading: bool,
//!     is_error: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum FeedAction {
//!     FetchInit,
//!     FetchSuccess { entries: Vec<Entry> },
//!     FetchFailure,
//! }
//!
//! impl Reducer for FeedReducer {
//!     type State = FeedState;
//!     type Action = FeedAction;
//!     type Environment = FeedEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut FeedState,
//!         action: FeedAction,
//!         env: &FeedEnvironment,
//!     ) -> SmallVec<[Effect<FeedAction>; 4]> {
//!         // Transition logic goes here
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all transition logic and are deterministic and testable.
/// A reducer never performs I/O, never inspects the wall clock, and never
/// leaves state half-updated: each call produces a complete next state.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transition logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: the state this reducer operates on
    /// - `Action`: the action type this reducer processes
    /// - `Environment`: the injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for FeedReducer {
    ///     type State = FeedState;
    ///     type Action = FeedAction;
    ///     type Environment = FeedEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut FeedState,
    ///         action: FeedAction,
    ///         env: &FeedEnvironment,
    ///     ) -> SmallVec<[Effect<FeedAction>; 4]> {
    ///         match action {
    ///             FeedAction::FetchInit => {
    ///                 state.is_loading = true;
    ///                 state.is_error = false;
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effect descriptions to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, retries)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back into
        /// the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter. Reducers stay pure; the orchestrating
/// layer (store, loaders) owns the collaborators.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    /// let now = clock.now();
    ///
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Key-value persistence collaborator
    ///
    /// A deliberately small surface for snapshotting values (such as the
    /// last search term) to durable storage. The trait is infallible by
    /// contract: a missing key loads as `None`, and implementations degrade
    /// write failures to logged warnings rather than surfacing errors to
    /// the orchestration layer.
    ///
    /// Reducers never call this trait. Only the layer driving the reducer
    /// may load or save.
    pub trait KeyValueStorage: Send + Sync {
        /// Load the value stored under `key`, if any
        fn load(&self, key: &str) -> Option<String>;

        /// Store `value` under `key`, replacing any previous value
        fn save(&self, key: &str, value: &str);
    }

    /// In-memory storage, useful for tests and demos
    ///
    /// Values live only as long as the process.
    #[derive(Debug, Default)]
    pub struct InMemoryStorage {
        entries: Mutex<HashMap<String, String>>,
    }

    impl InMemoryStorage {
        /// Create an empty in-memory storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl KeyValueStorage for InMemoryStorage {
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{InMemoryStorage, KeyValueStorage};

    #[test]
    fn effect_merge_is_parallel() {
        let effect: Effect<()> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(effect, Effect::Parallel(ref inner) if inner.len() == 2));
    }

    #[test]
    fn effect_chain_is_sequential() {
        let effect: Effect<()> = Effect::chain(vec![Effect::None]);
        assert!(matches!(effect, Effect::Sequential(ref inner) if inner.len() == 1));
    }

    #[test]
    fn effect_debug_formats_future_opaquely() {
        let effect: Effect<()> = Effect::Future(Box::pin(async { None }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[test]
    fn in_memory_storage_roundtrip() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.load("search"), None);

        storage.save("search", "react");
        assert_eq!(storage.load("search"), Some("react".to_owned()));

        storage.save("search", "redux");
        assert_eq!(storage.load("search"), Some("redux".to_owned()));
    }
}
