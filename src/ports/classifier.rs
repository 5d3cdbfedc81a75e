//! Classifier port: Trait for the opaque, previously trained model.
//!
//! The training pipeline is external and its artifact shape is not under
//! this crate's control: it may be a plain estimator, a multi-stage
//! pipeline, or a hyper-parameter-search wrapper around a pipeline.
//! Schema discovery is therefore expressed as explicit introspection
//! probes on this trait rather than any reflection-style lookup.

use crate::domain::FeatureVector;

/// Errors raised by a classifier invocation.
///
/// These are per-session failures: the scorer catches them and surfaces
/// a `PredictionError` outcome, never retrying and never crashing the
/// process.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature '{0}' is not present in the input row")]
    MissingFeature(String),

    #[error("Expected {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Pipeline has no estimator stage")]
    NoEstimator,
}

/// Trait for the trained binary classifier.
///
/// Implementations expose:
/// - Optional fit-time feature names for schema discovery
/// - Optional structural probes (chosen estimator, trailing pipeline stage)
/// - Binary prediction and class probabilities over a tabular row
///
/// The encoder never mutates the classifier; all methods take `&self`.
pub trait Classifier: Send + Sync {
    /// Feature names recorded at fit time, if the artifact carries them.
    /// Order is significant and preserved verbatim by the resolver.
    fn fit_feature_names(&self) -> Option<Vec<String>>;

    /// The chosen underlying estimator, for search-style wrappers.
    fn best_estimator(&self) -> Option<&dyn Classifier> {
        None
    }

    /// The trailing pipeline stage, for multi-stage models. The trailing
    /// stage is the one that carries fit-time feature names.
    fn trailing_stage(&self) -> Option<&dyn Classifier> {
        None
    }

    /// Binary prediction over one row: 0 or 1.
    ///
    /// # Errors
    /// Returns `ClassifierError` when the row does not match the shape the
    /// model was trained on.
    fn predict(&self, row: &FeatureVector) -> Result<u8, ClassifierError>;

    /// Class probabilities over one row: `[p_negative, p_positive]`,
    /// summing to 1.
    ///
    /// # Errors
    /// Returns `ClassifierError` when the row does not match the shape the
    /// model was trained on.
    fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2], ClassifierError>;
}
