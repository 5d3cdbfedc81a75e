//! Domain layer: Core screening types.
//!
//! This module contains pure Rust types with no external-system
//! dependencies. All types are serializable.

mod outcome;
mod schema;
mod survey;

pub use outcome::{Screening, ScreeningOutcome, ScreeningResult, Verdict};
pub use schema::{FeatureSchema, FeatureVector, DEFAULT_FEATURE_COLUMNS};
pub use survey::{
    SurveyResponses, EASE_OPTIONS, ETHNICITY_CHOICES, FREQUENCY_OPTIONS, RESPONDENT_CHOICES,
    STANDARD_OPTIONS, TYPICALITY_OPTIONS,
};
