use agent_batch::{
    load_questions, write_results, BatchRunner, HttpAgentClient, QuestionRecord,
};
use chrono::Utc;
use clap::Parser;

use crate::args::CliArgs;
use crate::config::load_config;
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let started_at = Utc::now();
    let args = CliArgs::parse();
    let mut config = load_config(args.config.clone())?;
    args.apply(&mut config);
    let _logger = init_logging(&config.logging)?;

    let questions = load_questions(&config.run.questions)?;
    log::info!(
        "loaded {} questions from {}",
        questions.len(),
        config.run.questions.display()
    );

    let client = HttpAgentClient::new(config.agent.clone())?;
    let total = questions.len();
    let mut runner = BatchRunner::new(client)
        .on_record(move |idx, record| print_record(idx + 1, total, record));
    let report = runner.run(&questions).await?;

    let path = write_results(&config.run.output_dir, &started_at, &report.records)?;
    println!(
        "Session {}: {} questions, {} answered, {} failed, {} flagged",
        report.session_id,
        report.total(),
        report.answered(),
        report.failed(),
        report.flagged()
    );
    println!("Results saved to {}", path.display());
    Ok(())
}

fn print_record(position: usize, total: usize, record: &QuestionRecord) {
    println!("{}", render_record(position, total, record));
}

fn render_record(position: usize, total: usize, record: &QuestionRecord) -> String {
    match record {
        QuestionRecord::Answered(answer) => format!(
            "[{position}/{total}] Q: {}\nInitial A: {}\nFinal A: {}\nElapsed: {:.2}s\n---",
            answer.question,
            answer.initial_answer.as_deref().unwrap_or("<none>"),
            answer.final_answer,
            answer.timing.elapsed
        ),
        QuestionRecord::Failed(failure) => format!(
            "[{position}/{total}] Error processing question '{}': {}",
            failure.question, failure.error
        ),
    }
}
