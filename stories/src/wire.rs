//! Untyped action envelope for dynamically-typed callers.
//!
//! The typed [`StoriesAction`] enum is closed, so unknown actions cannot be
//! constructed in Rust. Callers speaking JSON (a UI bridge, a test harness,
//! a replay log) go through [`WireAction`] instead: a `{ "type", "payload" }`
//! envelope decoded at runtime. Unknown tags are rejected with
//! [`ActionError::UnknownAction`] rather than silently ignored, so a caller
//! replacing this layer cannot smuggle in an unhandled transition.

use crate::reducer::{StoriesEnvironment, StoriesReducer};
use crate::types::{StoriesAction, Story, StoryId};
use listflow_core::{SmallVec, effect::Effect, reducer::Reducer};
use serde::{Deserialize, Serialize};

/// Wire discriminant for [`StoriesAction::FetchInit`]
pub const FETCH_INIT: &str = "FETCH_INIT";
/// Wire discriminant for [`StoriesAction::FetchSuccess`]
pub const FETCH_SUCCESS: &str = "FETCH_SUCCESS";
/// Wire discriminant for [`StoriesAction::FetchFailure`]
pub const FETCH_FAILURE: &str = "FETCH_FAILURE";
/// Wire discriminant for [`StoriesAction::RemoveStory`]
pub const REMOVE_ITEM: &str = "REMOVE_ITEM";

/// An untyped action envelope: `{ "type": ..., "payload": ... }`
///
/// `payload` is required for `FETCH_SUCCESS` (a sequence of stories) and
/// `REMOVE_ITEM` (an identifier), and absent otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireAction {
    /// The discriminant naming the requested transition
    #[serde(rename = "type")]
    pub kind: String,

    /// Variant payload, where the discriminant requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl WireAction {
    /// Creates an envelope without a payload
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    /// Creates an envelope with a payload
    #[must_use]
    pub fn with_payload(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(payload),
        }
    }
}

/// Errors decoding or dispatching a wire action
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The discriminant names no known transition
    ///
    /// Fatal to the dispatch call; never recovered internally.
    #[error("unknown action type: {kind}")]
    UnknownAction {
        /// The unrecognized discriminant
        kind: String,
    },

    /// The discriminant requires a payload but none was supplied
    #[error("action {kind} requires a payload")]
    MissingPayload {
        /// The discriminant missing its payload
        kind: String,
    },

    /// The payload did not decode to the shape the discriminant requires
    #[error("invalid payload for action {kind}")]
    InvalidPayload {
        /// The discriminant whose payload was malformed
        kind: String,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

/// `REMOVE_ITEM` accepts a bare identifier, a numeric identifier, or a whole
/// item (the lesson material dispatches the item and filters by its id).
#[derive(Deserialize)]
#[serde(untagged)]
enum RemovePayload {
    Text(String),
    Numeric(u64),
    Item { id: StoryId },
}

impl From<RemovePayload> for StoryId {
    fn from(payload: RemovePayload) -> Self {
        match payload {
            RemovePayload::Text(id) => StoryId::new(id),
            RemovePayload::Numeric(id) => StoryId::from(id),
            RemovePayload::Item { id } => id,
        }
    }
}

impl TryFrom<WireAction> for StoriesAction {
    type Error = ActionError;

    fn try_from(wire: WireAction) -> Result<Self, Self::Error> {
        match wire.kind.as_str() {
            FETCH_INIT => Ok(StoriesAction::FetchInit),
            FETCH_FAILURE => Ok(StoriesAction::FetchFailure),
            FETCH_SUCCESS => {
                let payload = wire.payload.ok_or_else(|| ActionError::MissingPayload {
                    kind: wire.kind.clone(),
                })?;
                let stories: Vec<Story> = serde_json::from_value(payload).map_err(|source| {
                    ActionError::InvalidPayload {
                        kind: FETCH_SUCCESS.to_owned(),
                        source,
                    }
                })?;
                Ok(StoriesAction::FetchSuccess { stories })
            },
            REMOVE_ITEM => {
                let payload = wire.payload.ok_or_else(|| ActionError::MissingPayload {
                    kind: wire.kind.clone(),
                })?;
                let id: RemovePayload = serde_json::from_value(payload).map_err(|source| {
                    ActionError::InvalidPayload {
                        kind: REMOVE_ITEM.to_owned(),
                        source,
                    }
                })?;
                Ok(StoriesAction::RemoveStory { id: id.into() })
            },
            _ => Err(ActionError::UnknownAction { kind: wire.kind }),
        }
    }
}

/// Decode a wire envelope and reduce it in one step
///
/// This is the runtime fallback for callers that cannot use the typed enum.
/// The state is untouched when decoding fails: the error propagates before
/// the reducer runs.
///
/// # Errors
///
/// Returns [`ActionError::UnknownAction`] for an unrecognized discriminant,
/// or a payload error when the payload is missing or malformed.
pub fn dispatch_wire(
    reducer: &StoriesReducer,
    state: &mut crate::types::StoriesState,
    env: &StoriesEnvironment,
    wire: WireAction,
) -> Result<SmallVec<[Effect<StoriesAction>; 4]>, ActionError> {
    let action = StoriesAction::try_from(wire)?;
    Ok(reducer.reduce(state, action, env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StoriesState;
    use serde_json::json;

    #[test]
    fn decodes_fetch_init_without_payload() {
        let wire: WireAction = serde_json::from_str(r#"{ "type": "FETCH_INIT" }"#).unwrap();
        let action = StoriesAction::try_from(wire).unwrap();
        assert_eq!(action, StoriesAction::FetchInit);
    }

    #[test]
    fn decodes_fetch_success_with_story_payload() {
        let wire = WireAction::with_payload(
            FETCH_SUCCESS,
            json!([{
                "id": "1",
                "title": "React",
                "url": "https://reactjs.org/",
                "author": "Jordan Walke",
                "num_comments": 3,
                "points": 4
            }]),
        );

        let action = StoriesAction::try_from(wire).unwrap();
        let StoriesAction::FetchSuccess { stories } = action else {
            panic!("expected FetchSuccess");
        };
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].title, "React");
    }

    #[test]
    fn remove_item_accepts_id_or_whole_item() {
        for payload in [json!("1"), json!(1), json!({ "id": "1" })] {
            let wire = WireAction::with_payload(REMOVE_ITEM, payload);
            let action = StoriesAction::try_from(wire).unwrap();
            assert_eq!(
                action,
                StoriesAction::RemoveStory {
                    id: StoryId::from(1_u64)
                }
            );
        }
    }

    #[test]
    fn unknown_type_is_rejected_for_any_state() {
        let reducer = StoriesReducer::new();
        let env = StoriesEnvironment::new();

        for mut state in [
            StoriesState::new(),
            StoriesState {
                stories: vec![],
                is_loading: true,
                is_error: false,
            },
            StoriesState {
                stories: vec![],
                is_loading: false,
                is_error: true,
            },
        ] {
            let before = state.clone();
            let result = dispatch_wire(
                &reducer,
                &mut state,
                &env,
                WireAction::new("SET_STORIES"),
            );
            assert!(matches!(
                result,
                Err(ActionError::UnknownAction { ref kind }) if kind == "SET_STORIES"
            ));
            // Decoding failed before the reducer ran
            assert_eq!(state, before);
        }
    }

    #[test]
    fn missing_payload_is_rejected() {
        let result = StoriesAction::try_from(WireAction::new(FETCH_SUCCESS));
        assert!(matches!(result, Err(ActionError::MissingPayload { .. })));

        let result = StoriesAction::try_from(WireAction::new(REMOVE_ITEM));
        assert!(matches!(result, Err(ActionError::MissingPayload { .. })));
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let wire = WireAction::with_payload(FETCH_SUCCESS, json!({ "not": "a list" }));
        let result = StoriesAction::try_from(wire);
        assert!(matches!(result, Err(ActionError::InvalidPayload { .. })));
    }

    #[test]
    fn dispatch_wire_reduces_known_actions() {
        let reducer = StoriesReducer::new();
        let env = StoriesEnvironment::new();
        let mut state = StoriesState::new();

        dispatch_wire(&reducer, &mut state, &env, WireAction::new(FETCH_INIT)).unwrap();
        assert!(state.is_loading);

        dispatch_wire(
            &reducer,
            &mut state,
            &env,
            WireAction::with_payload(FETCH_SUCCESS, json!([])),
        )
        .unwrap();
        assert!(!state.is_loading);
        assert!(!state.is_error);
    }

    #[test]
    fn envelope_serializes_without_null_payload() {
        let json = serde_json::to_string(&WireAction::new(FETCH_INIT)).unwrap();
        assert_eq!(json, r#"{"type":"FETCH_INIT"}"#);
    }
}
