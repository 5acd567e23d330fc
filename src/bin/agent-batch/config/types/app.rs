use agent_batch::AgentConfig;
use serde::{Deserialize, Serialize};

use super::{LoggingConfig, RunConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub run: RunConfig,
    pub logging: LoggingConfig,
}
