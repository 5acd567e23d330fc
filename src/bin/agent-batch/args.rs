use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "agent-batch",
    about = "Send a CSV of questions through one agent session and record the answers"
)]
pub struct CliArgs {
    /// CSV file with one question per row
    #[arg(long, short = 'q')]
    pub questions: Option<PathBuf>,
    /// Config file (defaults to ./agent-batch.toml when present)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub app_name: Option<String>,
    #[arg(long)]
    pub user_id: Option<String>,
    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Directory for the results file
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
        if let Some(path) = &self.questions {
            config.run.questions = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.run.output_dir = dir.clone();
        }
        if let Some(url) = &self.base_url {
            config.agent.base_url = url.clone();
        }
        if let Some(app) = &self.app_name {
            config.agent.app_name = app.clone();
        }
        if let Some(user) = &self.user_id {
            config.agent.user_id = user.clone();
        }
        if self.timeout.is_some() {
            config.agent.timeout_seconds = self.timeout;
        }
    }
}
