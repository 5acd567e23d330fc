mod app;
mod logging;
mod run;

const DEFAULT_QUESTIONS_PATH: &str = "data/stress_test_prompts.csv";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use run::RunConfig;
