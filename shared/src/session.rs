//! The upload session state machine.
//!
//! One session exists per app lifetime and owns the single outstanding
//! submission. Rendering surfaces read the snapshot accessors; every
//! mutation goes through a named transition, and a refused transition
//! leaves the session untouched.

use crate::api::AnalysisEnvelope;
use crate::validate::{self, FileMeta, ValidationError};
use strum_macros::Display;
use thiserror::Error;

/// Shown when a failure carries no server-supplied message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Previewing,
    Submitting,
    Success,
    Failed,
}

/// A staged file: validated metadata plus the opaque payload handle that the
/// transport layer ships (`gloo_file::File` in the browser, anything in
/// tests).
#[derive(Debug, Clone)]
pub struct CandidateFile<F> {
    pub meta: FileMeta,
    pub payload: F,
}

/// Prediction and recommendation stored as one value, so a new submission
/// replaces the pair atomically and old halves can never mix with new ones.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub prediction: crate::api::Prediction,
    pub recommendation: crate::api::Recommendation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    #[error("An analysis is already in progress.")]
    SubmissionInFlight,
    #[error("No image is staged for analysis.")]
    NothingStaged,
    #[error("No analysis is in progress.")]
    NotSubmitting,
    #[error("Nothing to retry.")]
    NotFailed,
    #[error("A result is already on screen; start over first.")]
    ResetRequired,
}

#[derive(Debug)]
pub struct UploadSession<F> {
    phase: SessionPhase,
    file: Option<CandidateFile<F>>,
    language: String,
    outcome: Option<AnalysisOutcome>,
    failure: Option<String>,
}

impl<F> UploadSession<F> {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            phase: SessionPhase::Idle,
            file: None,
            language: language.into(),
            outcome: None,
            failure: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn file(&self) -> Option<&CandidateFile<F>> {
        self.file.as_ref()
    }

    /// Language code of the most recent submission (or the startup default).
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Validates and stages a candidate, replacing any held file.
    ///
    /// Allowed while idle, previewing, or after a failure. A rejected file
    /// leaves the phase and any held file exactly as they were; the caller
    /// surfaces the reason.
    pub fn select_file(&mut self, candidate: CandidateFile<F>) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Submitting => return Err(SessionError::SubmissionInFlight),
            SessionPhase::Success => return Err(SessionError::ResetRequired),
            SessionPhase::Idle | SessionPhase::Previewing | SessionPhase::Failed => {}
        }

        validate::validate(Some(&candidate.meta))?;

        self.file = Some(candidate);
        self.failure = None;
        self.phase = SessionPhase::Previewing;
        Ok(())
    }

    /// Opens the mutual-exclusion gate: records the language, invalidates the
    /// previous outcome, moves to `Submitting`, and hands back the staged
    /// file for the caller to ship. While a submission is in flight this
    /// refuses without mutating anything, so at most one request exists.
    pub fn begin_submit(&mut self, language_code: &str) -> Result<&CandidateFile<F>, SessionError> {
        match self.phase {
            SessionPhase::Previewing => {}
            SessionPhase::Submitting => return Err(SessionError::SubmissionInFlight),
            _ => return Err(SessionError::NothingStaged),
        }
        if self.file.is_none() {
            return Err(SessionError::NothingStaged);
        }

        self.language = language_code.to_string();
        self.outcome = None;
        self.failure = None;
        self.phase = SessionPhase::Submitting;

        self.file.as_ref().ok_or(SessionError::NothingStaged)
    }

    /// Records the settled response envelope. A `success: true` envelope with
    /// both payload halves lands in `Success`; anything else lands in
    /// `Failed`, preferring the server's message over the generic fallback.
    pub fn settle(&mut self, envelope: AnalysisEnvelope) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(SessionError::NotSubmitting);
        }

        match envelope {
            AnalysisEnvelope {
                success: true,
                prediction: Some(prediction),
                recommendation: Some(recommendation),
                ..
            } => {
                self.outcome = Some(AnalysisOutcome {
                    prediction,
                    recommendation,
                });
                self.failure = None;
                self.phase = SessionPhase::Success;
            }
            AnalysisEnvelope { error, .. } => {
                self.failure =
                    Some(error.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()));
                self.phase = SessionPhase::Failed;
            }
        }
        Ok(())
    }

    /// Records a transport-level failure (network error, unparseable body,
    /// non-2xx status) for the in-flight submission.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(SessionError::NotSubmitting);
        }
        self.failure = Some(message.into());
        self.phase = SessionPhase::Failed;
        Ok(())
    }

    /// Leaves `Failed`: back to `Previewing` when a file is still held,
    /// otherwise to `Idle`.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Failed {
            return Err(SessionError::NotFailed);
        }
        self.failure = None;
        self.phase = if self.file.is_some() {
            SessionPhase::Previewing
        } else {
            SessionPhase::Idle
        };
        Ok(())
    }

    /// Drops the held file, outcome, and failure message; valid from any
    /// phase.
    pub fn reset(&mut self) {
        self.file = None;
        self.outcome = None;
        self.failure = None;
        self.phase = SessionPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Prediction, Recommendation};
    use pretty_assertions::assert_eq;

    fn png(size_bytes: u64) -> CandidateFile<Vec<u8>> {
        CandidateFile {
            meta: FileMeta {
                name: "leaf.png".to_string(),
                media_type: "image/png".to_string(),
                size_bytes,
            },
            payload: vec![0u8; 4],
        }
    }

    fn success_envelope() -> AnalysisEnvelope {
        AnalysisEnvelope {
            success: true,
            error: None,
            prediction: Some(Prediction {
                disease_name: "Leaf Blight".to_string(),
                confidence: 92.5,
                severity_level: 4,
                image_quality: "high".to_string(),
                gradcam_image: None,
                message: None,
            }),
            recommendation: Some(Recommendation {
                recommendation: "Apply fungicide".to_string(),
                timestamp: "2025-01-01".to_string(),
                disease_name: None,
                severity_level: None,
                language_code: None,
            }),
        }
    }

    fn submitting_session() -> UploadSession<Vec<u8>> {
        let mut session = UploadSession::new("en");
        session.select_file(png(2 * 1024 * 1024)).unwrap();
        session.begin_submit("en").unwrap();
        session
    }

    #[test]
    fn starts_idle_with_default_language() {
        let session: UploadSession<Vec<u8>> = UploadSession::new("en");
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.language(), "en");
        assert!(session.file().is_none());
        assert!(session.outcome().is_none());
    }

    #[test]
    fn selecting_a_valid_file_moves_to_previewing() {
        let mut session = UploadSession::new("en");
        session.select_file(png(1024)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Previewing);
        assert_eq!(session.file().unwrap().meta.name, "leaf.png");
    }

    #[test]
    fn rejection_leaves_phase_and_file_unchanged() {
        let mut session = UploadSession::new("en");
        session.select_file(png(1024)).unwrap();

        let mut bad = png(1024);
        bad.meta.media_type = "image/gif".to_string();
        bad.meta.name = "anim.gif".to_string();

        let err = session.select_file(bad).unwrap_err();
        assert_eq!(
            err,
            SessionError::Rejected(ValidationError::UnsupportedFormat)
        );
        assert_eq!(session.phase(), SessionPhase::Previewing);
        assert_eq!(session.file().unwrap().meta.name, "leaf.png");
    }

    #[test]
    fn replacing_a_staged_file_keeps_previewing() {
        let mut session = UploadSession::new("en");
        session.select_file(png(1024)).unwrap();

        let mut second = png(2048);
        second.meta.name = "other.png".to_string();
        session.select_file(second).unwrap();

        assert_eq!(session.phase(), SessionPhase::Previewing);
        assert_eq!(session.file().unwrap().meta.name, "other.png");
    }

    #[test]
    fn submit_requires_a_staged_file() {
        let mut session: UploadSession<Vec<u8>> = UploadSession::new("en");
        assert_eq!(
            session.begin_submit("en").unwrap_err(),
            SessionError::NothingStaged
        );
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn submit_while_submitting_is_a_refused_no_op() {
        let mut session = submitting_session();
        assert_eq!(session.phase(), SessionPhase::Submitting);

        let err = session.begin_submit("hi").unwrap_err();
        assert_eq!(err, SessionError::SubmissionInFlight);
        assert_eq!(session.phase(), SessionPhase::Submitting);
        assert!(session.file().is_some());
        // The refused call must not clobber the in-flight language either.
        assert_eq!(session.language(), "en");
    }

    #[test]
    fn select_while_submitting_is_refused() {
        let mut session = submitting_session();
        let err = session.select_file(png(1)).unwrap_err();
        assert_eq!(err, SessionError::SubmissionInFlight);
        assert_eq!(session.phase(), SessionPhase::Submitting);
    }

    #[test]
    fn successful_settlement_stores_the_outcome_pair() {
        let mut session = submitting_session();
        session.settle(success_envelope()).unwrap();

        assert_eq!(session.phase(), SessionPhase::Success);
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.prediction.disease_name, "Leaf Blight");
        assert_eq!(outcome.recommendation.timestamp, "2025-01-01");
        assert!(session.failure_message().is_none());
    }

    #[test]
    fn server_failure_message_is_surfaced_verbatim() {
        let mut session = submitting_session();
        session
            .settle(AnalysisEnvelope {
                success: false,
                error: Some("Low image quality".to_string()),
                prediction: None,
                recommendation: None,
            })
            .unwrap();

        assert_eq!(session.phase(), SessionPhase::Failed);
        assert_eq!(session.failure_message(), Some("Low image quality"));
    }

    #[test]
    fn failure_without_message_falls_back_to_generic() {
        let mut session = submitting_session();
        session
            .settle(AnalysisEnvelope {
                success: false,
                error: None,
                prediction: None,
                recommendation: None,
            })
            .unwrap();
        assert_eq!(session.failure_message(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn success_envelope_missing_a_half_fails_generically() {
        let mut session = submitting_session();
        let mut envelope = success_envelope();
        envelope.recommendation = None;
        session.settle(envelope).unwrap();

        assert_eq!(session.phase(), SessionPhase::Failed);
        assert_eq!(session.failure_message(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(session.outcome().is_none());
    }

    #[test]
    fn new_submission_invalidates_the_previous_outcome() {
        let mut session = submitting_session();
        session.settle(success_envelope()).unwrap();
        assert!(session.outcome().is_some());

        session.reset();
        session.select_file(png(512)).unwrap();
        session.begin_submit("es").unwrap();

        // The old pair is gone the moment the new submission opens.
        assert!(session.outcome().is_none());
        assert_eq!(session.language(), "es");
    }

    #[test]
    fn transport_failure_lands_in_failed() {
        let mut session = submitting_session();
        session.fail("Network error: connection refused").unwrap();
        assert_eq!(session.phase(), SessionPhase::Failed);
        assert_eq!(
            session.failure_message(),
            Some("Network error: connection refused")
        );
    }

    #[test]
    fn settlement_outside_submitting_is_refused() {
        let mut session: UploadSession<Vec<u8>> = UploadSession::new("en");
        assert_eq!(
            session.settle(success_envelope()).unwrap_err(),
            SessionError::NotSubmitting
        );
        assert_eq!(session.fail("late").unwrap_err(), SessionError::NotSubmitting);
    }

    #[test]
    fn retry_returns_to_previewing_when_a_file_is_held() {
        let mut session = submitting_session();
        session.fail("Network error").unwrap();
        session.retry().unwrap();
        assert_eq!(session.phase(), SessionPhase::Previewing);
        assert!(session.failure_message().is_none());
    }

    #[test]
    fn retry_without_a_file_returns_to_idle() {
        let mut session = submitting_session();
        session.fail("boom").unwrap();
        session.file = None;
        session.retry().unwrap();
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn reset_clears_everything_from_any_phase() {
        let mut session = submitting_session();
        session.settle(success_envelope()).unwrap();
        session.reset();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.file().is_none());
        assert!(session.outcome().is_none());
        assert!(session.failure_message().is_none());
    }

    #[test]
    fn select_after_success_requires_reset() {
        let mut session = submitting_session();
        session.settle(success_envelope()).unwrap();
        assert_eq!(
            session.select_file(png(1)).unwrap_err(),
            SessionError::ResetRequired
        );
        assert_eq!(session.phase(), SessionPhase::Success);
    }
}
