//! Reducer logic for the story list.
//!
//! The reducer is the single writer of [`StoriesState`]: it merges the fetch
//! lifecycle (init → success | failure) with the one list mutation (remove a
//! story). Every completed fetch clears the flag the other transition set,
//! which is what keeps "loading and error at once" unreachable.

use crate::types::{StoriesAction, StoriesState};
use listflow_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Environment dependencies for the stories reducer
///
/// Intentionally empty: the reducer is a pure transition table with no
/// clock, storage, or network access. The fetch trigger and the persistence
/// collaborator live outside the reducer (see
/// [`StoriesLoader`](crate::loader::StoriesLoader) and
/// [`SemiPersistentValue`](crate::storage::SemiPersistentValue)). The struct
/// exists so the feature keeps the standard reducer wiring and can grow
/// dependencies without touching the trait.
#[derive(Clone, Debug, Default)]
pub struct StoriesEnvironment;

impl StoriesEnvironment {
    /// Creates a new `StoriesEnvironment`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Reducer for the story list
#[derive(Clone, Debug, Default)]
pub struct StoriesReducer;

impl StoriesReducer {
    /// Creates a new `StoriesReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for StoriesReducer {
    type State = StoriesState;
    type Action = StoriesAction;
    type Environment = StoriesEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StoriesAction::FetchInit => {
                state.is_loading = true;
                state.is_error = false;
            },
            StoriesAction::FetchSuccess { stories } => {
                state.stories = stories;
                state.is_loading = false;
                state.is_error = false;
            },
            StoriesAction::FetchFailure => {
                // Clearing the loading flag here is the whole point: a
                // failure that only set is_error would leave the list
                // loading forever.
                state.is_loading = false;
                state.is_error = true;
            },
            StoriesAction::RemoveStory { id } => {
                // A missing id is not an error; the list is simply unchanged
                state.stories.retain(|story| story.id != id);
            },
        }

        SmallVec::new()
    }
}
