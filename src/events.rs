//! Agent run events and answer extraction.
//!
//! A run call answers with a list of events. Text parts carry answer
//! fragments; `actions.state_delta` carries session-state updates. Both are
//! folded across the whole list in order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ORIGINAL_USER_MESSAGE_KEY: &str = "original_user_message";
pub const ANSWER_FLAGGED_KEY: &str = "answer_flagged";
pub const FLAGGED_REASONS_KEY: &str = "flagged_reasons";

/// One step of agent execution as returned by the run endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Event {
    #[serde(default)]
    pub content: Option<EventContent>,
    #[serde(default)]
    pub actions: Option<EventActions>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EventContent {
    #[serde(default)]
    pub parts: Option<Vec<EventPart>>,
}

/// A content part. Non-text parts (function calls and the like) deserialize
/// with `text` unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EventPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EventActions {
    #[serde(default)]
    pub state_delta: Option<Map<String, Value>>,
}

impl Event {
    /// Non-empty text fragments of this event, in part order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content
            .iter()
            .filter_map(|content| content.parts.as_ref())
            .flatten()
            .filter_map(|part| part.text.as_deref())
            .filter(|text| !text.is_empty())
    }

    pub fn state_delta(&self) -> Option<&Map<String, Value>> {
        self.actions
            .as_ref()
            .and_then(|actions| actions.state_delta.as_ref())
    }
}

/// Session-state fields picked out of the state deltas.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct StateInfo {
    pub original_message: Option<Value>,
    pub answer_flagged: Option<Value>,
    pub flagged_reasons: Option<Value>,
}

impl StateInfo {
    /// Merges one state delta. Later deltas overwrite earlier ones; a key that
    /// is absent leaves the previous value in place. `original_user_message`
    /// is additionally ignored when null.
    pub fn apply_delta(&mut self, delta: &Map<String, Value>) {
        if let Some(message) = delta.get(ORIGINAL_USER_MESSAGE_KEY) {
            if !message.is_null() {
                self.original_message = Some(message.clone());
            }
        }
        if let Some(flagged) = delta.get(ANSWER_FLAGGED_KEY) {
            self.answer_flagged = Some(flagged.clone());
        }
        if let Some(reasons) = delta.get(FLAGGED_REASONS_KEY) {
            self.flagged_reasons = Some(reasons.clone());
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self.answer_flagged, Some(Value::Bool(true)))
    }
}

/// What a run response boils down to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub initial_answer: Option<String>,
    pub final_answer: String,
    pub state: StateInfo,
}

/// Folds the event list into the first and last answer fragments and the
/// merged session state.
pub fn extract(events: &[Event]) -> Extraction {
    let mut extraction = Extraction::default();
    for event in events {
        for text in event.texts() {
            if extraction.initial_answer.is_none() {
                extraction.initial_answer = Some(text.to_string());
            }
            extraction.final_answer = text.to_string();
        }
        if let Some(delta) = event.state_delta() {
            extraction.state.apply_delta(delta);
        }
    }
    extraction
}
