//! Screening service: Orchestrates one scoring session.
//!
//! This service coordinates:
//! - Schema resolution (once, at construction)
//! - Completeness validation and encoding
//! - Classifier invocation
//! - Outcome packaging for the presentation collaborator

use std::sync::Arc;

use crate::application::builder::encode_session;
use crate::application::resolver::resolve_schema;
use crate::domain::{FeatureSchema, FeatureVector, ScreeningOutcome, ScreeningResult, SurveyResponses};
use crate::ports::{Classifier, ClassifierError};

/// Service for scoring Q-Chat-10 screening sessions.
///
/// The schema is resolved once at construction and immutable afterwards;
/// sessions share nothing else, so the service is freely shareable and
/// stateless across sessions.
pub struct ScreeningService {
    classifier: Arc<dyn Classifier>,
    schema: FeatureSchema,
}

impl ScreeningService {
    /// Create a service around a loaded classifier, resolving its schema.
    #[must_use]
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        let schema = resolve_schema(classifier.as_ref());
        tracing::info!("Features detected: {}", schema.len());
        Self { classifier, schema }
    }

    /// The resolved feature schema.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Score one session.
    ///
    /// Runs the full per-session pipeline:
    /// 1. Validate completeness and encode the feature row
    /// 2. Invoke the classifier (prediction + positive-class probability)
    /// 3. Compute the additive Q-Chat-10 score
    ///
    /// Never panics and never fails the process: an absent field yields
    /// `Incomplete`, a classifier failure yields `PredictionError` with
    /// the message surfaced verbatim. Neither is retried.
    pub fn screen(&self, responses: &SurveyResponses) -> ScreeningOutcome {
        let Some(encoded) = encode_session(responses, &self.schema) else {
            tracing::info!(
                "Session incomplete, missing: {:?}",
                responses.missing_fields()
            );
            return ScreeningOutcome::Incomplete;
        };

        match self.invoke(&encoded.vector) {
            Ok((prediction, probability)) => {
                let result = ScreeningResult::new(prediction, probability, encoded.qchat_score());
                tracing::info!(
                    "Screening complete: verdict={}, confidence={:.2}%, qchat_score={}/10",
                    result.verdict,
                    result.probability * 100.0,
                    result.qchat_score
                );
                ScreeningOutcome::Scored(result)
            }
            Err(e) => {
                tracing::warn!("Classifier invocation failed: {e}");
                ScreeningOutcome::PredictionError {
                    message: e.to_string(),
                }
            }
        }
    }

    fn invoke(&self, row: &FeatureVector) -> Result<(u8, f64), ClassifierError> {
        let prediction = self.classifier.predict(row)?;
        let proba = self.classifier.predict_proba(row)?;
        Ok((prediction, proba[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Verdict;

    /// Classifier stub scoring the row's A-item sum, for deterministic tests.
    struct ItemSumClassifier {
        names: Vec<String>,
        fail: bool,
    }

    impl ItemSumClassifier {
        fn new() -> Self {
            Self {
                names: crate::domain::DEFAULT_FEATURE_COLUMNS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn item_sum(&self, row: &FeatureVector) -> Result<f64, ClassifierError> {
            if self.fail {
                return Err(ClassifierError::ShapeMismatch {
                    expected: 29,
                    got: row.len(),
                });
            }
            let mut sum = 0.0;
            for i in 1..=10 {
                let name = format!("A{i}");
                sum += row
                    .get(&name)
                    .ok_or(ClassifierError::MissingFeature(name))?;
            }
            Ok(sum)
        }
    }

    impl Classifier for ItemSumClassifier {
        fn fit_feature_names(&self) -> Option<Vec<String>> {
            Some(self.names.clone())
        }

        fn predict(&self, row: &FeatureVector) -> Result<u8, ClassifierError> {
            Ok(u8::from(self.item_sum(row)? >= 4.0))
        }

        fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
            let p = self.item_sum(row)? / 10.0;
            Ok([1.0 - p, p])
        }
    }

    fn all_typical() -> SurveyResponses {
        SurveyResponses {
            a1: Some("Always / Usually".into()),
            a2: Some("Very Easy / Quite Easy".into()),
            a3: Some("Always / Usually".into()),
            a4: Some("Always / Usually".into()),
            a5: Some("Always / Usually".into()),
            a6: Some("Always / Usually".into()),
            a7: Some("Always / Usually".into()),
            a8: Some("Typical".into()),
            a9: Some("Always / Usually".into()),
            a10: Some("Never / Rarely".into()),
            age_months: Some(24.0),
            sex: Some("Male".into()),
            jaundice: Some("No".into()),
            family_asd: Some("No".into()),
            ethnicity: Some("Asian".into()),
            who_completed: Some("Family member".into()),
        }
    }

    fn all_atypical() -> SurveyResponses {
        SurveyResponses {
            a1: Some("Sometimes / Rarely / Never".into()),
            a2: Some("Quite Difficult / Very Difficult".into()),
            a3: Some("Sometimes / Rarely / Never".into()),
            a4: Some("Sometimes / Rarely / Never".into()),
            a5: Some("Sometimes / Rarely / Never".into()),
            a6: Some("Sometimes / Rarely / Never".into()),
            a7: Some("Sometimes / Rarely / Never".into()),
            a8: Some("Non-typical / Delayed".into()),
            a9: Some("Sometimes / Rarely / Never".into()),
            a10: Some("Sometimes / Usually / Always".into()),
            ..all_typical()
        }
    }

    #[test]
    fn test_typical_session_scores_zero() {
        let service = ScreeningService::new(Arc::new(ItemSumClassifier::new()));
        let outcome = service.screen(&all_typical());

        let result = outcome.result().expect("Session should score");
        assert_eq!(result.verdict, Verdict::NoTraits);
        assert_eq!(result.qchat_score, 0);
        assert!(result.probability.abs() < f64::EPSILON);
    }

    #[test]
    fn test_atypical_session_scores_ten() {
        let service = ScreeningService::new(Arc::new(ItemSumClassifier::new()));
        let outcome = service.screen(&all_atypical());

        let result = outcome.result().expect("Session should score");
        assert_eq!(result.verdict, Verdict::PotentialTraits);
        assert_eq!(result.qchat_score, 10);
        assert!((result.probability - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_additive_score_independent_of_verdict() {
        // Three atypical answers: below the stub's verdict threshold, but
        // the additive score still reflects the item codes.
        let mut responses = all_typical();
        responses.a1 = Some("Sometimes / Rarely / Never".into());
        responses.a2 = Some("Quite Difficult / Very Difficult".into());
        responses.a10 = Some("Sometimes / Usually / Always".into());

        let service = ScreeningService::new(Arc::new(ItemSumClassifier::new()));
        let result = service
            .screen(&responses)
            .result()
            .copied()
            .expect("Session should score");
        assert_eq!(result.verdict, Verdict::NoTraits);
        assert_eq!(result.qchat_score, 3);
    }

    #[test]
    fn test_incomplete_session() {
        let service = ScreeningService::new(Arc::new(ItemSumClassifier::new()));
        let mut responses = all_typical();
        responses.a3 = None;

        let outcome = service.screen(&responses);
        assert!(matches!(outcome, ScreeningOutcome::Incomplete));
    }

    #[test]
    fn test_prediction_failure_surfaces_message() {
        let service = ScreeningService::new(Arc::new(ItemSumClassifier::failing()));
        let outcome = service.screen(&all_typical());

        match outcome {
            ScreeningOutcome::PredictionError { message } => {
                assert!(message.contains("Expected 29 features"));
            }
            other => panic!("Expected PredictionError, got {other:?}"),
        }
    }

    #[test]
    fn test_service_remains_usable_after_failures() {
        let service = ScreeningService::new(Arc::new(ItemSumClassifier::new()));

        let mut incomplete = all_typical();
        incomplete.sex = None;
        assert!(matches!(
            service.screen(&incomplete),
            ScreeningOutcome::Incomplete
        ));

        // The next session is independent and scores normally.
        assert!(service.screen(&all_typical()).result().is_some());
    }
}
