//! Sequential batch driver.
//!
//! One session is created up front and shared by every question. Questions
//! are sent one at a time; each produces exactly one [`QuestionRecord`], in
//! input order. Session creation failing aborts the run, a question failing
//! only turns its own record into an error record.

use std::time::Instant;

use chrono::Utc;

use crate::client::AgentService;
use crate::error::BatchError;
use crate::events::extract;
use crate::record::{QuestionRecord, Timing};

/// Callback invoked after each question with its 0-based index and record.
pub type RecordObserver = dyn FnMut(usize, &QuestionRecord) + Send;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub session_id: String,
    pub records: Vec<QuestionRecord>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.is_failed()).count()
    }

    pub fn answered(&self) -> usize {
        self.total() - self.failed()
    }

    pub fn flagged(&self) -> usize {
        self.records.iter().filter(|r| r.is_flagged()).count()
    }
}

/// Drives one batch run against an [`AgentService`].
pub struct BatchRunner<S> {
    service: S,
    observer: Option<Box<RecordObserver>>,
}

impl<S: AgentService> BatchRunner<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            observer: None,
        }
    }

    /// Registers a callback that sees every record as soon as it is produced.
    pub fn on_record<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, &QuestionRecord) + Send + 'static,
    {
        self.observer = Some(Box::new(f));
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Creates the session, then asks every question in order.
    pub async fn run(&mut self, questions: &[String]) -> Result<BatchReport, BatchError> {
        let session_id = self.service.create_session().await?;
        log::info!(
            "created session {session_id}, running {} questions",
            questions.len()
        );

        let mut records = Vec::with_capacity(questions.len());
        for (idx, question) in questions.iter().enumerate() {
            let record = self.ask(&session_id, question).await;
            if let Some(observer) = self.observer.as_mut() {
                observer(idx, &record);
            }
            records.push(record);
        }

        log::info!("batch run finished for session {session_id}");
        Ok(BatchReport {
            session_id,
            records,
        })
    }

    /// Sends one question and turns the outcome into a record. Only the
    /// network call and response decoding are timed.
    pub async fn ask(&self, session_id: &str, question: &str) -> QuestionRecord {
        let start = Utc::now();
        let clock = Instant::now();
        let outcome = self.service.run(session_id, question).await;
        let elapsed = clock.elapsed();
        let end = Utc::now();

        match outcome {
            Ok(events) => QuestionRecord::answered(
                question.to_string(),
                extract(&events),
                Timing {
                    start,
                    end,
                    elapsed: elapsed.as_secs_f64(),
                },
            ),
            Err(err) => {
                log::warn!("question {question:?} failed: {err}");
                QuestionRecord::failed(question.to_string(), err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use mockito::Server;
    use serde_json::json;

    use super::*;
    use crate::client::HttpAgentClient;
    use crate::config::AgentConfig;
    use crate::events::Event;

    /// Replays scripted run outcomes and remembers what it was asked.
    struct ScriptedService {
        session: Result<String, String>,
        outcomes: Mutex<VecDeque<Result<Vec<Event>, BatchError>>>,
        calls: Mutex<Vec<(String, String)>>,
        latency: Option<Duration>,
    }

    impl ScriptedService {
        fn new(outcomes: Vec<Result<Vec<Event>, BatchError>>) -> Self {
            Self {
                session: Ok("sess-1".to_string()),
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(Vec::new()),
                latency: None,
            }
        }
    }

    #[async_trait]
    impl AgentService for ScriptedService {
        async fn create_session(&self) -> Result<String, BatchError> {
            self.session.clone().map_err(BatchError::HttpError)
        }

        async fn run(&self, session_id: &str, question: &str) -> Result<Vec<Event>, BatchError> {
            self.calls
                .lock()
                .unwrap()
                .push((session_id.to_string(), question.to_string()));
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn text_event(text: &str) -> Event {
        serde_json::from_value(json!({"content": {"parts": [{"text": text}]}})).unwrap()
    }

    fn questions(items: &[&str]) -> Vec<String> {
        items.iter().map(|q| q.to_string()).collect()
    }

    #[tokio::test]
    async fn one_record_per_question_in_order_despite_failures() {
        let service = ScriptedService::new(vec![
            Ok(vec![text_event("one")]),
            Err(BatchError::HttpError("connection reset".to_string())),
            Ok(vec![text_event("three")]),
        ]);
        let mut runner = BatchRunner::new(service);
        let report = runner.run(&questions(&["q1", "q2", "q3"])).await.unwrap();

        assert_eq!(report.session_id, "sess-1");
        let asked: Vec<&str> = report.records.iter().map(|r| r.question()).collect();
        assert_eq!(asked, vec!["q1", "q2", "q3"]);
        assert_eq!((report.answered(), report.failed()), (2, 1));

        match &report.records[1] {
            QuestionRecord::Failed(record) => {
                assert_eq!(record.error, "HTTP error: connection reset")
            }
            other => panic!("expected failure, got {other:?}"),
        }
        match &report.records[2] {
            QuestionRecord::Answered(record) => assert_eq!(record.final_answer, "three"),
            other => panic!("expected answer, got {other:?}"),
        }

        let calls = runner.service().calls.lock().unwrap().clone();
        assert!(calls.iter().all(|(session, _)| session == "sess-1"));
    }

    #[tokio::test]
    async fn session_failure_aborts_before_any_question() {
        let mut service = ScriptedService::new(vec![]);
        service.session = Err("refused".to_string());
        let mut runner = BatchRunner::new(service);

        let err = runner.run(&questions(&["q1"])).await.unwrap_err();
        assert!(matches!(err, BatchError::HttpError(_)));
        assert!(runner.service().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_question_list_still_creates_session() {
        let mut runner = BatchRunner::new(ScriptedService::new(vec![]));
        let report = runner.run(&[]).await.unwrap();
        assert_eq!(report.total(), 0);
        assert_eq!(report.session_id, "sess-1");
    }

    #[tokio::test]
    async fn timing_is_non_negative_and_ordered() {
        let mut runner = BatchRunner::new(ScriptedService::new(vec![Ok(vec![])]));
        let report = runner.run(&questions(&["q"])).await.unwrap();
        match &report.records[0] {
            QuestionRecord::Answered(record) => {
                assert!(record.timing.elapsed >= 0.0);
                assert!(record.timing.end >= record.timing.start);
                assert!(record.initial_answer.is_none());
            }
            other => panic!("expected answer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn elapsed_tracks_the_run_call() {
        let mut service = ScriptedService::new(vec![Ok(vec![text_event("slow")])]);
        service.latency = Some(Duration::from_millis(50));
        let mut runner = BatchRunner::new(service);
        let report = runner.run(&questions(&["q"])).await.unwrap();
        match &report.records[0] {
            QuestionRecord::Answered(record) => {
                let wall = (record.timing.end - record.timing.start)
                    .to_std()
                    .unwrap()
                    .as_secs_f64();
                assert!(record.timing.elapsed >= 0.05);
                assert!(record.timing.elapsed <= wall + 0.01);
            }
            other => panic!("expected answer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn observer_sees_every_record() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let service = ScriptedService::new(vec![
            Ok(vec![text_event("a")]),
            Err(BatchError::JsonError("bad".to_string())),
        ]);
        let mut runner = BatchRunner::new(service).on_record(move |idx, record| {
            sink.lock().unwrap().push((idx, record.is_failed()));
        });
        runner.run(&questions(&["x", "y"])).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![(0, false), (1, true)]);
    }

    #[tokio::test]
    async fn http_run_against_mock_service() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/apps/baseline_agent/users/test1/sessions")
            .with_status(200)
            .with_body(r#"{"id": "live-session"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/run")
            .match_body(mockito::Matcher::PartialJson(json!({
                "new_message": {"parts": [{"text": "bad question"}]}
            })))
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("POST", "/run")
            .match_body(mockito::Matcher::PartialJson(json!({
                "new_message": {"parts": [{"text": "good question"}]}
            })))
            .with_status(200)
            .with_body(
                json!([
                    {"content": {"parts": [{"text": "Hello"}]},
                     "actions": {"state_delta": {"answer_flagged": true}}},
                    {"content": {"parts": [{"text": "Hello, world"}]},
                     "actions": {"state_delta": {"answer_flagged": false}}}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let client =
            HttpAgentClient::new(AgentConfig::new(server.url(), "baseline_agent", "test1"))
                .unwrap();
        let mut runner = BatchRunner::new(client);
        let report = runner
            .run(&questions(&["bad question", "good question"]))
            .await
            .unwrap();

        assert_eq!(report.session_id, "live-session");
        let rendered = serde_json::to_value(&report.records).unwrap();
        assert_eq!(rendered[0]["question"], "bad question");
        assert!(rendered[0]["error"].as_str().unwrap().contains("500"));
        assert!(rendered[0].get("timing").is_none());
        assert!(rendered[0].get("state").is_none());
        assert_eq!(rendered[1]["initial_answer"], "Hello");
        assert_eq!(rendered[1]["final_answer"], "Hello, world");
        assert_eq!(rendered[1]["state"]["answer_flagged"], false);
        assert_eq!(report.flagged(), 0);
    }
}
