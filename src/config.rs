//! Connection settings for the agent service under test.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_APP_NAME: &str = "baseline_agent";
pub const DEFAULT_USER_ID: &str = "test1";

/// Where the agent service lives and which app/user the run is scoped to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfig {
    /// Base URL of the agent HTTP service, without a trailing slash.
    pub base_url: String,
    /// Application name used for session scoping and run requests.
    pub app_name: String,
    /// User identifier used for session scoping and run requests.
    pub user_id: String,
    /// Request timeout in seconds. `None` keeps the HTTP client's default.
    pub timeout_seconds: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            timeout_seconds: None,
        }
    }
}

impl AgentConfig {
    pub fn new(
        base_url: impl Into<String>,
        app_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            app_name: app_name.into(),
            user_id: user_id.into(),
            timeout_seconds: None,
        }
    }

    pub fn sessions_url(&self) -> String {
        format!(
            "{}/apps/{}/users/{}/sessions",
            self.base(),
            self.app_name,
            self.user_id
        )
    }

    pub fn run_url(&self) -> String {
        format!("{}/run", self.base())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
