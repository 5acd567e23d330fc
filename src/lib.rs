//! Batch question runner for agent HTTP services.
//!
//! Reads questions from CSV, opens one session against the agent service,
//! sends every question through it in order and records the first and final
//! answer text, selected session-state fields and timing for each.
//!
//! ```no_run
//! use agent_batch::{AgentConfig, BatchRunner, HttpAgentClient};
//!
//! # async fn demo() -> Result<(), agent_batch::BatchError> {
//! let questions = agent_batch::load_questions("data/prompts.csv")?;
//! let client = HttpAgentClient::new(AgentConfig::default())?;
//! let report = BatchRunner::new(client).run(&questions).await?;
//! println!("{} answered, {} failed", report.answered(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod questions;
pub mod record;
pub mod runner;

pub use client::{AgentService, HttpAgentClient};
pub use config::AgentConfig;
pub use error::BatchError;
pub use events::{extract, Event, Extraction, StateInfo};
pub use output::{results_file_name, write_results};
pub use questions::load_questions;
pub use record::{QuestionRecord, Timing};
pub use runner::{BatchReport, BatchRunner};
