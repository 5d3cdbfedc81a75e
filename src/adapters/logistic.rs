//! Logistic model adapter: classifiers deserialized from the training
//! pipeline's JSON export.
//!
//! The export comes in three shapes, mirroring how the model was trained:
//! a plain estimator, a standardize-then-estimate pipeline, or a
//! hyper-parameter-search wrapper holding the chosen pipeline. All three
//! implement [`Classifier`], so the scorer and the schema resolver treat
//! them uniformly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::FeatureVector;
use crate::ports::{Classifier, ClassifierError};
use crate::ScreenError;

/// A trained logistic-regression estimator.
///
/// When `feature_names` is present the estimator gathers its inputs from
/// the row by name; otherwise it consumes the row positionally and the
/// arity must match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Feature names seen at fit time, in coefficient order
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,

    /// One coefficient per feature
    pub coefficients: Vec<f64>,

    /// Intercept term
    pub intercept: f64,
}

impl LogisticModel {
    /// Gather this estimator's input values from a row.
    fn gather(&self, row: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        match &self.feature_names {
            Some(names) => names
                .iter()
                .map(|name| {
                    row.get(name)
                        .ok_or_else(|| ClassifierError::MissingFeature(name.clone()))
                })
                .collect(),
            None => {
                if row.len() != self.coefficients.len() {
                    return Err(ClassifierError::ShapeMismatch {
                        expected: self.coefficients.len(),
                        got: row.len(),
                    });
                }
                Ok(row.values().to_vec())
            }
        }
    }

    /// Linear decision function over already-gathered values.
    fn decision(&self, x: &[f64]) -> Result<f64, ClassifierError> {
        if x.len() != self.coefficients.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.coefficients.len(),
                got: x.len(),
            });
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(x)
            .map(|(coef, value)| coef * value)
            .sum();
        Ok(self.intercept + dot)
    }

    fn proba_pos(&self, row: &FeatureVector) -> Result<f64, ClassifierError> {
        let x = self.gather(row)?;
        Ok(sigmoid(self.decision(&x)?))
    }

    fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("Estimator has no coefficients".into());
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(format!(
                    "feature_names length {} does not match coefficients length {}",
                    names.len(),
                    self.coefficients.len()
                ));
            }
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn fit_feature_names(&self) -> Option<Vec<String>> {
        self.feature_names.clone()
    }

    fn predict(&self, row: &FeatureVector) -> Result<u8, ClassifierError> {
        Ok(u8::from(self.proba_pos(row)? >= 0.5))
    }

    fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
        let p = self.proba_pos(row)?;
        Ok([1.0 - p, p])
    }
}

/// Standardization parameters of a pipeline's scaler stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean
    pub mean: Vec<f64>,

    /// Per-feature standard deviation
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn transform(&self, x: &mut [f64]) -> Result<(), ClassifierError> {
        if x.len() != self.mean.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.mean.len(),
                got: x.len(),
            });
        }
        for ((value, mean), scale) in x.iter_mut().zip(&self.mean).zip(&self.scale) {
            *value = (*value - mean) / scale;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "Scaler mean length {} does not match scale length {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.scale.iter().any(|s| *s == 0.0) {
            return Err("Scaler contains a zero scale entry".into());
        }
        Ok(())
    }
}

/// One stage of a pipeline export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineStage {
    Scaler(StandardScaler),
    Estimator(LogisticModel),
}

/// A multi-stage pipeline: zero or more scalers followed by the estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineModel {
    pub stages: Vec<PipelineStage>,
}

impl PipelineModel {
    fn estimator(&self) -> Option<&LogisticModel> {
        match self.stages.last() {
            Some(PipelineStage::Estimator(model)) => Some(model),
            _ => None,
        }
    }

    fn proba_pos(&self, row: &FeatureVector) -> Result<f64, ClassifierError> {
        let estimator = self.estimator().ok_or(ClassifierError::NoEstimator)?;
        let mut x = estimator.gather(row)?;
        for stage in &self.stages {
            if let PipelineStage::Scaler(scaler) = stage {
                scaler.transform(&mut x)?;
            }
        }
        Ok(sigmoid(estimator.decision(&x)?))
    }

    fn validate(&self) -> Result<(), String> {
        let estimator = self
            .estimator()
            .ok_or("Pipeline's trailing stage must be an estimator")?;
        estimator.validate()?;
        for stage in &self.stages {
            if let PipelineStage::Scaler(scaler) = stage {
                scaler.validate()?;
                if scaler.mean.len() != estimator.coefficients.len() {
                    return Err(format!(
                        "Scaler arity {} does not match estimator arity {}",
                        scaler.mean.len(),
                        estimator.coefficients.len()
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Classifier for PipelineModel {
    fn fit_feature_names(&self) -> Option<Vec<String>> {
        // A pipeline exposes names only through its trailing stage.
        None
    }

    fn trailing_stage(&self) -> Option<&dyn Classifier> {
        self.estimator().map(|model| model as &dyn Classifier)
    }

    fn predict(&self, row: &FeatureVector) -> Result<u8, ClassifierError> {
        Ok(u8::from(self.proba_pos(row)? >= 0.5))
    }

    fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
        let p = self.proba_pos(row)?;
        Ok([1.0 - p, p])
    }
}

/// A hyper-parameter-search wrapper holding the chosen pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchModel {
    pub best_estimator: PipelineModel,

    /// Cross-validation score of the chosen candidate, if exported
    #[serde(default)]
    pub best_score: Option<f64>,
}

impl Classifier for SearchModel {
    fn fit_feature_names(&self) -> Option<Vec<String>> {
        None
    }

    fn best_estimator(&self) -> Option<&dyn Classifier> {
        Some(&self.best_estimator)
    }

    fn predict(&self, row: &FeatureVector) -> Result<u8, ClassifierError> {
        self.best_estimator.predict(row)
    }

    fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
        self.best_estimator.predict_proba(row)
    }
}

/// Model artifact as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Estimator(LogisticModel),
    Pipeline(PipelineModel),
    Search(SearchModel),
}

impl ModelArtifact {
    fn inner(&self) -> &dyn Classifier {
        match self {
            Self::Estimator(model) => model,
            Self::Pipeline(model) => model,
            Self::Search(model) => model,
        }
    }

    /// Sanity-check parameter arities before first use.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Estimator(model) => model.validate(),
            Self::Pipeline(model) => model.validate(),
            Self::Search(model) => model.best_estimator.validate(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Estimator(_) => "estimator",
            Self::Pipeline(_) => "pipeline",
            Self::Search(_) => "search",
        }
    }
}

impl Classifier for ModelArtifact {
    fn fit_feature_names(&self) -> Option<Vec<String>> {
        self.inner().fit_feature_names()
    }

    fn best_estimator(&self) -> Option<&dyn Classifier> {
        self.inner().best_estimator()
    }

    fn trailing_stage(&self) -> Option<&dyn Classifier> {
        self.inner().trailing_stage()
    }

    fn predict(&self, row: &FeatureVector) -> Result<u8, ClassifierError> {
        self.inner().predict(row)
    }

    fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
        self.inner().predict_proba(row)
    }
}

/// Load and validate a model artifact from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or fails
/// validation.
pub fn load_model(path: &Path) -> crate::Result<ModelArtifact> {
    let content = std::fs::read_to_string(path)?;
    let artifact: ModelArtifact = serde_json::from_str(&content)?;
    artifact.validate().map_err(ScreenError::Model)?;

    tracing::info!("Loaded {} model from {:?}", artifact.kind(), path);
    Ok(artifact)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureSchema;

    fn named_estimator() -> LogisticModel {
        LogisticModel {
            feature_names: Some(vec!["A1".into(), "A2".into()]),
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        }
    }

    fn row(names: &[&str], values: &[f64]) -> FeatureVector {
        let schema = FeatureSchema::from_names(names.iter().copied());
        let mut row = FeatureVector::zeroed(&schema);
        for (name, value) in names.iter().zip(values) {
            row.set(name, *value);
        }
        row
    }

    #[test]
    fn test_estimator_scores_by_name() {
        let model = named_estimator();
        // Extra columns in the row are ignored; gathering is by name.
        let input = row(&["A2", "A1", "Age_Mons"], &[1.0, 1.0, 24.0]);

        // z = 0.5 + 2*1 - 1*1 = 1.5
        let expected = sigmoid(1.5);
        let proba = model.predict_proba(&input).expect("Should score");
        assert!((proba[1] - expected).abs() < 1e-12);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&input).expect("Should score"), 1);
    }

    #[test]
    fn test_estimator_missing_feature() {
        let model = named_estimator();
        let input = row(&["A1"], &[1.0]);

        match model.predict(&input) {
            Err(ClassifierError::MissingFeature(name)) => assert_eq!(name, "A2"),
            other => panic!("Expected MissingFeature, got {other:?}"),
        }
    }

    #[test]
    fn test_nameless_estimator_scores_positionally() {
        let model = LogisticModel {
            feature_names: None,
            coefficients: vec![1.0, 1.0],
            intercept: -3.0,
        };
        let input = row(&["x", "y"], &[1.0, 1.0]);
        assert_eq!(model.predict(&input).expect("Should score"), 0);

        let wrong_arity = row(&["x"], &[1.0]);
        assert!(matches!(
            model.predict(&wrong_arity),
            Err(ClassifierError::ShapeMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_pipeline_standardizes_before_estimating() {
        let pipeline = PipelineModel {
            stages: vec![
                PipelineStage::Scaler(StandardScaler {
                    mean: vec![10.0, 0.5],
                    scale: vec![5.0, 0.5],
                }),
                PipelineStage::Estimator(named_estimator()),
            ],
        };
        let input = row(&["A1", "A2"], &[15.0, 0.5]);

        // Scaled: [(15-10)/5, (0.5-0.5)/0.5] = [1, 0]; z = 0.5 + 2*1 = 2.5
        let expected = sigmoid(2.5);
        let proba = pipeline.predict_proba(&input).expect("Should score");
        assert!((proba[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_pipeline_without_estimator() {
        let pipeline = PipelineModel {
            stages: vec![PipelineStage::Scaler(StandardScaler {
                mean: vec![0.0],
                scale: vec![1.0],
            })],
        };
        assert!(pipeline.validate().is_err());
        assert!(matches!(
            pipeline.predict(&row(&["A1"], &[1.0])),
            Err(ClassifierError::NoEstimator)
        ));
    }

    #[test]
    fn test_search_wrapper_delegates_and_probes() {
        let search = SearchModel {
            best_estimator: PipelineModel {
                stages: vec![PipelineStage::Estimator(named_estimator())],
            },
            best_score: Some(0.93),
        };
        let input = row(&["A1", "A2"], &[0.0, 0.0]);

        // z = 0.5
        let proba = search.predict_proba(&input).expect("Should score");
        assert!((proba[1] - sigmoid(0.5)).abs() < 1e-12);

        // Probe chain: no direct names, but the chosen pipeline's trailing
        // stage carries them.
        assert!(search.fit_feature_names().is_none());
        let names = search
            .best_estimator()
            .and_then(|best| best.trailing_stage())
            .and_then(|stage| stage.fit_feature_names())
            .expect("Trailing stage should carry names");
        assert_eq!(names, vec!["A1".to_string(), "A2".to_string()]);
    }

    #[test]
    fn test_validate_rejects_arity_mismatch() {
        let model = LogisticModel {
            feature_names: Some(vec!["A1".into()]),
            coefficients: vec![1.0, 2.0],
            intercept: 0.0,
        };
        assert!(model.validate().is_err());

        let pipeline = PipelineModel {
            stages: vec![
                PipelineStage::Scaler(StandardScaler {
                    mean: vec![0.0],
                    scale: vec![1.0],
                }),
                PipelineStage::Estimator(named_estimator()),
            ],
        };
        assert!(pipeline.validate().is_err());
    }

    #[test]
    fn test_artifact_json_round_trip() {
        let json = r#"{
            "kind": "search",
            "best_estimator": {
                "stages": [
                    {"kind": "scaler", "mean": [0.5, 0.5], "scale": [0.5, 0.5]},
                    {"kind": "estimator",
                     "feature_names": ["A1", "A2"],
                     "coefficients": [1.0, -1.0],
                     "intercept": 0.0}
                ]
            },
            "best_score": 0.91
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).expect("Should parse");
        assert!(artifact.validate().is_ok());
        assert_eq!(artifact.kind(), "search");
    }

    #[test]
    fn test_load_shipped_model() {
        let artifact =
            load_model(Path::new("models/qchat_model.json")).expect("Shipped model should load");
        let schema = crate::application::resolve_schema(&artifact);
        assert_eq!(schema.len(), 29);
        assert!(schema.contains("Ethnicity_asian"));
    }

    #[test]
    fn test_shipped_model_scores_a_session() {
        use crate::domain::SurveyResponses;
        use crate::ScreeningService;
        use std::sync::Arc;

        let artifact =
            load_model(Path::new("models/qchat_model.json")).expect("Shipped model should load");
        let service = ScreeningService::new(Arc::new(artifact));

        let responses = SurveyResponses {
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
        };

        let outcome = service.screen(&responses);
        let result = outcome.result().expect("Session should score");
        assert_eq!(result.qchat_score, 0);
        assert!((0.0..=1.0).contains(&result.probability));
    }
}
