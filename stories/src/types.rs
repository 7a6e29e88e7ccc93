//! Domain types for the story list.
//!
//! A story list is an asynchronously fetched collection of stories that the
//! user can prune item by item. The state carries the list together with its
//! fetch lifecycle flags, so that loading and error can never drift apart.

use serde::{Deserialize, Serialize};

/// Unique identifier for a story within a list
///
/// Stored as a string because the upstream search API hands out string
/// object ids; numeric ids from fixture data convert losslessly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Creates a `StoryId` from anything string-like
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for StoryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single story
///
/// Only `id` is meaningful to the reducer; the remaining fields are opaque
/// payload rendered by whatever consumes the state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Unique identifier
    pub id: StoryId,
    /// Title of the story
    pub title: String,
    /// Link to the story
    pub url: String,
    /// Author or authors
    pub author: String,
    /// Number of comments
    pub num_comments: u64,
    /// Points/upvotes
    pub points: u64,
}

impl Story {
    /// Creates a new story
    #[must_use]
    pub fn new(
        id: impl Into<StoryId>,
        title: impl Into<String>,
        url: impl Into<String>,
        author: impl Into<String>,
        num_comments: u64,
        points: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            author: author.into(),
            num_comments,
            points,
        }
    }
}

/// State of the story list
///
/// Created once with an empty list and both flags false, then advanced only
/// by [`StoriesReducer`](crate::reducer::StoriesReducer). The flags encode
/// the fetch lifecycle; every completed fetch clears `is_loading`, so
/// "loading and error at the same time" is unreachable through the reducer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoriesState {
    /// The stories, in display order
    pub stories: Vec<Story>,
    /// True while a fetch is outstanding
    pub is_loading: bool,
    /// True if the most recent fetch failed
    pub is_error: bool,
}

impl StoriesState {
    /// Creates a new empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stories
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Checks whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Checks whether a story with the given id is present
    #[must_use]
    pub fn contains(&self, id: &StoryId) -> bool {
        self.stories.iter().any(|story| &story.id == id)
    }

    /// Stories whose title contains `term`, case-insensitively
    ///
    /// Client-side filtering over the already fetched list; an empty term
    /// matches everything.
    #[must_use]
    pub fn matching(&self, term: &str) -> Vec<&Story> {
        let needle = term.to_lowercase();
        self.stories
            .iter()
            .filter(|story| story.title.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Actions advancing the story-list state
///
/// A closed set: the fetch lifecycle transitions plus the one list
/// mutation. The enum being closed is what makes unknown actions
/// unrepresentable at this layer; dynamically-typed callers go through
/// [`WireAction`](crate::wire::WireAction), where unknown tags are rejected
/// at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum StoriesAction {
    /// A fetch has been issued; the list is now loading
    FetchInit,

    /// The fetch resolved; replace the list wholesale
    FetchSuccess {
        /// The fetched stories, replacing the current list
        stories: Vec<Story>,
    },

    /// The fetch rejected; the previous list is kept
    FetchFailure,

    /// Remove the story with the given id, if present
    RemoveStory {
        /// Identifier of the story to remove
        id: StoryId,
    },
}
