//! # Listflow Stories
//!
//! An asynchronously loaded, user-mutable story list built on the listflow
//! architecture.
//!
//! The feature splits along the functional-core / imperative-shell line:
//!
//! - [`types`] and [`reducer`] are the pure core: a closed action set and a
//!   transition table over the list plus its fetch lifecycle flags
//! - [`wire`] is the runtime fallback for untyped callers, rejecting
//!   unknown action tags instead of ignoring them
//! - [`gateway`] and [`loader`] form the imperative shell around fetching:
//!   the gateway talks to the search API, the loader dispatches lifecycle
//!   actions (with retry and a staleness guard for racing loads)
//! - [`storage`] persists the search term across sessions
//!
//! ## Example
//!
//! ```ignore
//! use listflow_stories::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(Store::new(
//!     StoriesState::new(),
//!     StoriesReducer::new(),
//!     StoriesEnvironment::new(),
//! ));
//!
//! let loader = StoriesLoader::new(Arc::clone(&store), HackerNewsGateway::new());
//! loader.load("rust").await?;
//!
//! let titles = store.state(|s| {
//!     s.stories.iter().map(|story| story.title.clone()).collect::<Vec<_>>()
//! }).await;
//! ```

pub mod gateway;
pub mod loader;
pub mod reducer;
pub mod storage;
pub mod types;
pub mod wire;

/// Convenience re-exports for typical consumers
pub mod prelude {
    pub use crate::gateway::{HackerNewsGateway, StoryGateway};
    pub use crate::loader::{StoriesLoader, StoriesStore};
    pub use crate::reducer::{StoriesEnvironment, StoriesReducer};
    pub use crate::storage::{JsonFileStorage, SemiPersistentValue};
    pub use crate::types::{StoriesAction, StoriesState, Story, StoryId};
    pub use listflow_runtime::Store;
}
