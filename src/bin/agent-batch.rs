#[path = "agent-batch/app.rs"]
mod app;
#[path = "agent-batch/args.rs"]
mod args;
#[path = "agent-batch/config/mod.rs"]
mod config;
#[path = "agent-batch/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
