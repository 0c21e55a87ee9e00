use serde::{Deserialize, Serialize};

/// Top-level response envelope returned by `POST /api/predict-and-recommend`.
///
/// `success: false` responses carry `error` and omit the payload halves;
/// both halves are optional so a partial body still deserializes and can be
/// handled as a failure instead of aborting the parse.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

/// Classifier output for one image. Immutable once received.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
    pub disease_name: String,
    /// Percentage in 0-100, already scaled by the service.
    pub confidence: f64,
    /// 0-5 scale; see `severity::map_severity` for the visual mapping.
    pub severity_level: u8,
    /// Opaque quality note ("good", "blurry", "enhanced", ...).
    pub image_quality: String,
    /// Base64-encoded PNG bytes without a data-URI prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradcam_image: Option<String>,
    /// Convenience summary line some service versions attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Treatment recommendation for one prediction. Immutable once received.
///
/// `recommendation` is free text using `**bold**` and `- bullet` markup;
/// `timestamp` is an opaque display string echoed verbatim into reports.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub recommendation: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_success_envelope() {
        let body = r#"{
            "success": true,
            "error": null,
            "prediction": {
                "disease_name": "Tomato_Early_blight",
                "confidence": 87.42,
                "severity_level": 3,
                "image_quality": "good",
                "gradcam_image": null,
                "message": "Disease detected. Severity level 3/5."
            },
            "recommendation": {
                "disease_name": "Tomato_Early_blight",
                "severity_level": 3,
                "language_code": "en",
                "recommendation": "Apply Chlorothalonil every 7 days.",
                "timestamp": "2025-06-01T10:15:00Z"
            }
        }"#;

        let envelope: AnalysisEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.error, None);

        let prediction = envelope.prediction.unwrap();
        assert_eq!(prediction.disease_name, "Tomato_Early_blight");
        assert_eq!(prediction.confidence, 87.42);
        assert_eq!(prediction.severity_level, 3);
        assert_eq!(prediction.gradcam_image, None);

        let recommendation = envelope.recommendation.unwrap();
        assert_eq!(recommendation.language_code.as_deref(), Some("en"));
        assert_eq!(recommendation.timestamp, "2025-06-01T10:15:00Z");
    }

    #[test]
    fn deserializes_failure_envelope_without_payload() {
        let body = r#"{"success": false, "error": "Low image quality"}"#;
        let envelope: AnalysisEnvelope = serde_json::from_str(body).unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("Low image quality"));
        assert_eq!(envelope.prediction, None);
        assert_eq!(envelope.recommendation, None);
    }

    #[test]
    fn tolerates_missing_optional_echo_fields() {
        let body = r#"{
            "success": true,
            "prediction": {
                "disease_name": "Potato_Late_blight",
                "confidence": 64.0,
                "severity_level": 5,
                "image_quality": "enhanced"
            },
            "recommendation": {
                "recommendation": "Destroy infected foliage immediately.",
                "timestamp": "2025-06-01"
            }
        }"#;

        let envelope: AnalysisEnvelope = serde_json::from_str(body).unwrap();
        let prediction = envelope.prediction.unwrap();
        assert_eq!(prediction.message, None);
        assert_eq!(envelope.recommendation.unwrap().disease_name, None);
    }
}
