use crate::api::{Prediction, Recommendation};

/// Builds the flat plain-text report for download.
///
/// The recommendation text goes in raw, without the on-screen block
/// formatting, and the confidence and timestamp are reproduced verbatim.
pub fn build_report(prediction: &Prediction, recommendation: &Recommendation) -> String {
    format!(
        "==========================================\n\
         CROPGUARD - CROP DISEASE ANALYSIS REPORT\n\
         ==========================================\n\
         \n\
         Disease: {disease}\n\
         Confidence: {confidence}%\n\
         Severity Level: {severity}/5\n\
         Image Quality: {quality}\n\
         \n\
         Treatment Recommendation:\n\
         ------------------------------------------\n\
         {treatment}\n\
         ------------------------------------------\n\
         \n\
         Generated: {timestamp}\n",
        disease = prediction.disease_name,
        confidence = prediction.confidence,
        severity = prediction.severity_level,
        quality = prediction.image_quality,
        treatment = recommendation.recommendation,
        timestamp = recommendation.timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> (Prediction, Recommendation) {
        (
            Prediction {
                disease_name: "Leaf Blight".to_string(),
                confidence: 92.5,
                severity_level: 4,
                image_quality: "high".to_string(),
                gradcam_image: None,
                message: None,
            },
            Recommendation {
                recommendation: "**Apply fungicide**\n- Water less".to_string(),
                timestamp: "2025-01-01".to_string(),
                disease_name: None,
                severity_level: None,
                language_code: None,
            },
        )
    }

    #[test]
    fn report_carries_labeled_lines() {
        let (prediction, recommendation) = fixture();
        let report = build_report(&prediction, &recommendation);

        assert!(report.contains("Disease: Leaf Blight\n"));
        assert!(report.contains("Confidence: 92.5%\n"));
        assert!(report.contains("Severity Level: 4/5\n"));
        assert!(report.contains("Image Quality: high\n"));
        assert!(report.contains("Generated: 2025-01-01\n"));
    }

    #[test]
    fn recommendation_text_is_not_reformatted() {
        let (prediction, recommendation) = fixture();
        let report = build_report(&prediction, &recommendation);

        // Markup stays raw in the export; block formatting is screen-only.
        assert!(report.contains("**Apply fungicide**\n- Water less"));
    }

    #[test]
    fn confidence_is_not_rerounded() {
        let (mut prediction, recommendation) = fixture();
        prediction.confidence = 87.0;
        let report = build_report(&prediction, &recommendation);
        assert!(report.contains("Confidence: 87%\n"));

        prediction.confidence = 87.25;
        let report = build_report(&prediction, &recommendation);
        assert!(report.contains("Confidence: 87.25%\n"));
    }

    #[test]
    fn report_is_deterministic() {
        let (prediction, recommendation) = fixture();
        assert_eq!(
            build_report(&prediction, &recommendation),
            build_report(&prediction, &recommendation)
        );
    }
}
