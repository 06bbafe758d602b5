//! Prediction session
//!
//! Tracks the outcome shown by the prediction panel. A new request supersedes
//! any outstanding one: completions carrying an older ticket are dropped, so
//! the panel only ever reflects the latest request.

use crate::predict::PredictError;
use crate::types::prediction::{PredictionOutcome, PredictionResult};

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredictionSession {
    outcome: PredictionOutcome,
    issued: u64,
    in_flight: Option<RequestTicket>,
}

impl PredictionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as issued and return its ticket
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        if let Some(previous) = self.in_flight.replace(ticket) {
            tracing::info!(
                "Request #{} superseded by #{}",
                previous.sequence(),
                ticket.sequence()
            );
        }
        self.outcome = PredictionOutcome::Loading;
        ticket
    }

    /// Record the completion of `ticket`
    ///
    /// Returns `false` and leaves the outcome alone when the ticket has been
    /// superseded.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<PredictionResult, PredictError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!("Ignoring stale completion of request #{}", ticket.sequence());
            return false;
        }

        self.in_flight = None;
        self.outcome = match result {
            Ok(result) => PredictionOutcome::Success(result),
            Err(error) => PredictionOutcome::Failure(error.to_string()),
        };
        true
    }

    /// Record a failure detected before any request was issued
    ///
    /// Any outstanding request is abandoned.
    pub fn reject(&mut self, error: PredictError) {
        self.in_flight = None;
        self.outcome = PredictionOutcome::Failure(error.to_string());
    }

    /// Return a failed outcome to `Idle`; loading and results are kept
    pub fn clear_failure(&mut self) {
        if matches!(self.outcome, PredictionOutcome::Failure(_)) {
            self.outcome = PredictionOutcome::Idle;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.outcome.is_loading()
    }

    pub fn outcome(&self) -> &PredictionOutcome {
        &self.outcome
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.outcome {
            PredictionOutcome::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            PredictionOutcome::Failure(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::SelectedFile;
    use crate::predict::request_prediction;
    use crate::predict::testing::FakeBackend;
    use crate::types::model::ModelName;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_success_replaces_error() {
        let mut session = PredictionSession::new();
        session.reject(PredictError::NoFile);
        assert_eq!(session.error_message(), Some("Please upload an image file."));

        let ticket = session.begin();
        assert!(session.is_loading());
        assert!(session.error_message().is_none());

        assert!(session.resolve(ticket, Ok(PredictionResult::new("cat", 0.87))));
        assert!(!session.is_loading());
        assert_eq!(session.result().map(|r| r.confidence_percent()), Some("87.00%".to_string()));
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_failure_clears_result() {
        let mut session = PredictionSession::new();
        let ticket = session.begin();
        session.resolve(ticket, Ok(PredictionResult::new("cat", 0.5)));

        let ticket = session.begin();
        session.resolve(
            ticket,
            Err(PredictError::Network("connection refused".into())),
        );
        assert!(session.result().is_none());
        assert!(!session.is_loading());
        assert!(session.error_message().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut session = PredictionSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(!session.resolve(first, Ok(PredictionResult::new("dog", 0.9))));
        assert!(session.is_loading());

        assert!(session.resolve(second, Ok(PredictionResult::new("cat", 0.8))));
        assert_eq!(session.result().map(|r| r.predicted_class.as_str()), Some("cat"));

        // A late arrival after the latest resolved changes nothing
        assert!(!session.resolve(first, Err(PredictError::Network("late".into()))));
        assert_eq!(session.result().map(|r| r.predicted_class.as_str()), Some("cat"));
    }

    #[test]
    fn test_reject_abandons_in_flight_request() {
        let mut session = PredictionSession::new();
        let ticket = session.begin();
        session.reject(PredictError::NoFile);
        assert!(!session.is_loading());
        assert!(!session.resolve(ticket, Ok(PredictionResult::new("cat", 0.8))));
        assert!(session.error_message().is_some());
    }

    #[test]
    fn test_clear_failure_only_touches_failures() {
        let mut session = PredictionSession::new();
        session.reject(PredictError::NoFile);
        session.clear_failure();
        assert_eq!(session.outcome(), &PredictionOutcome::Idle);

        let ticket = session.begin();
        session.clear_failure();
        assert!(session.is_loading());

        session.resolve(ticket, Ok(PredictionResult::new("cat", 0.87)));
        session.clear_failure();
        assert!(session.result().is_some());
    }

    #[test]
    fn test_idle_by_default() {
        let session = PredictionSession::new();
        assert_eq!(session.outcome(), &PredictionOutcome::Idle);
        assert!(!session.is_loading());
    }

    async fn drive(
        session: Arc<Mutex<PredictionSession>>,
        backend: Arc<FakeBackend>,
        file: Option<SelectedFile>,
    ) {
        let Some(file) = file else {
            session.lock().unwrap().reject(PredictError::NoFile);
            return;
        };
        let ticket = session.lock().unwrap().begin();
        let result = request_prediction(backend.as_ref(), Some(&file), ModelName::Resnet50).await;
        session.lock().unwrap().resolve(ticket, result);
    }

    #[tokio::test]
    async fn test_loading_only_while_request_is_outstanding() {
        let replies = [
            Ok(PredictionResult::new("cat", 0.87)),
            Err(PredictError::Http {
                status: 500,
                detail: "Internal Server Error".into(),
            }),
            Err(PredictError::Network("reset".into())),
        ];

        for reply in replies {
            let session = Arc::new(Mutex::new(PredictionSession::new()));
            let backend = Arc::new(FakeBackend::replying(reply));
            let release = backend.gate();
            assert!(!session.lock().unwrap().is_loading());

            let task = tokio::spawn(drive(
                session.clone(),
                backend.clone(),
                Some(SelectedFile::new("a.png", "image/png", b"x".to_vec())),
            ));
            while backend.calls() == 0 {
                tokio::task::yield_now().await;
            }
            assert!(session.lock().unwrap().is_loading());

            release.send(()).unwrap();
            task.await.unwrap();
            assert!(!session.lock().unwrap().is_loading());
        }
    }

    #[tokio::test]
    async fn test_missing_file_never_enters_loading() {
        let session = Arc::new(Mutex::new(PredictionSession::new()));
        let backend = Arc::new(FakeBackend::default());
        drive(session.clone(), backend.clone(), None).await;
        assert!(!session.lock().unwrap().is_loading());
        assert_eq!(backend.calls(), 0);
        assert_eq!(
            session.lock().unwrap().error_message(),
            Some("Please upload an image file.")
        );
    }
}
