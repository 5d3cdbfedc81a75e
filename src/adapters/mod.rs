//! Adapters layer: Concrete implementations of the classifier port.
//!
//! These modules integrate the model artifacts exported by the external
//! training pipeline:
//! - `logistic`: logistic-regression artifacts (plain estimator,
//!   scaler pipeline, search wrapper) loaded from JSON

pub mod logistic;

pub use logistic::{load_model, LogisticModel, ModelArtifact, PipelineModel, SearchModel};
