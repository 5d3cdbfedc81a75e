//! # Qscreen
//!
//! Q-Chat-10 toddler autism screening: schema-adaptive feature encoder
//! and scorer.
//!
//! This crate turns the sixteen raw answers of one screening session into
//! the numeric row a previously trained binary classifier expects, invokes
//! the classifier, and packages the verdict together with a
//! model-independent additive Q-Chat-10 score.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core screening types (survey responses, feature schema, outcome)
//! - `ports`: Trait definition for the opaque classifier collaborator
//! - `application`: Response coding, feature-vector building, scoring
//! - `adapters`: Classifiers deserialized from the training pipeline's JSON export

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::ScreeningService;
pub use domain::{ScreeningOutcome, ScreeningResult, SurveyResponses, Verdict};

/// Result type for Qscreen operations
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Main error type for Qscreen.
///
/// Covers process-level failures (model artifact loading and validation).
/// Per-session failures are not errors: they surface as the `Incomplete`
/// and `PredictionError` variants of [`domain::ScreeningOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("Invalid model artifact: {0}")]
    Model(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
