use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::DEFAULT_QUESTIONS_PATH;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// CSV file holding one question per row.
    pub questions: PathBuf,
    /// Directory the results file is written into.
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            questions: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            output_dir: PathBuf::from("."),
        }
    }
}
