pub mod api;
pub mod formatter;
pub mod report;
pub mod session;
pub mod severity;
pub mod validate;

pub use api::{AnalysisEnvelope, Prediction, Recommendation};
pub use formatter::{format_recommendation, ContentBlock, TextSpan};
pub use report::build_report;
pub use session::{
    AnalysisOutcome, CandidateFile, SessionError, SessionPhase, UploadSession,
    GENERIC_FAILURE_MESSAGE,
};
pub use severity::{map_severity, BandColor, SeverityBand};
pub use validate::{validate, FileMeta, ValidationError, ALLOWED_MEDIA_TYPES, MAX_IMAGE_BYTES};
