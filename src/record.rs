//! Per-question result records as written to the results file.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::events::{Extraction, StateInfo};

/// Outcome of one question. Serialized untagged, so the two shapes are told
/// apart by the presence of `error`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum QuestionRecord {
    Answered(AnswerRecord),
    Failed(ErrorRecord),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerRecord {
    pub question: String,
    pub initial_answer: Option<String>,
    pub final_answer: String,
    pub state: StateInfo,
    pub timing: Timing,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorRecord {
    pub question: String,
    pub error: String,
}

/// Wall-clock bounds of the network call plus its monotonic duration.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Timing {
    #[serde(rename = "agent_start", serialize_with = "serialize_utc")]
    pub start: DateTime<Utc>,
    #[serde(rename = "agent_end", serialize_with = "serialize_utc")]
    pub end: DateTime<Utc>,
    /// Monotonic duration of the run call, in seconds.
    pub elapsed: f64,
}

impl QuestionRecord {
    pub fn answered(question: String, extraction: Extraction, timing: Timing) -> Self {
        Self::Answered(AnswerRecord {
            question,
            initial_answer: extraction.initial_answer,
            final_answer: extraction.final_answer,
            state: extraction.state,
            timing,
        })
    }

    pub fn failed(question: String, error: impl ToString) -> Self {
        Self::Failed(ErrorRecord {
            question,
            error: error.to_string(),
        })
    }

    pub fn question(&self) -> &str {
        match self {
            Self::Answered(record) => &record.question,
            Self::Failed(record) => &record.question,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_flagged(&self) -> bool {
        match self {
            Self::Answered(record) => record.state.is_flagged(),
            Self::Failed(_) => false,
        }
    }
}

/// ISO-8601 UTC with microsecond precision and a `Z` suffix.
pub fn format_utc(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

fn serialize_utc<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_utc(ts))
}
