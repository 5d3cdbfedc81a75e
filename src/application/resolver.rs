//! Schema resolver: discovers the column list a loaded classifier expects.
//!
//! The training process is external, so the artifact's shape varies. The
//! resolver runs an ordered chain of introspection probes; the first one
//! that yields names wins, and a miss on every probe falls back to the
//! static default list.

use crate::domain::FeatureSchema;
use crate::ports::Classifier;

/// Resolve the ordered feature-name list the classifier expects.
///
/// Probe order:
/// 1. the classifier's own fit-time feature names, verbatim;
/// 2. the chosen estimator of a search-style wrapper, reading its trailing
///    pipeline stage's fit-time names;
/// 3. the classifier's own trailing pipeline stage's fit-time names;
/// 4. the static default column list.
///
/// Never panics; duplicate names are dropped preserving first occurrence.
#[must_use]
pub fn resolve_schema(classifier: &dyn Classifier) -> FeatureSchema {
    if let Some(names) = classifier.fit_feature_names() {
        tracing::info!("Schema resolved from fit-time feature names ({})", names.len());
        return FeatureSchema::from_names(names);
    }

    if let Some(names) = classifier
        .best_estimator()
        .and_then(|best| best.trailing_stage())
        .and_then(|stage| stage.fit_feature_names())
    {
        tracing::info!(
            "Schema resolved from chosen estimator's trailing stage ({})",
            names.len()
        );
        return FeatureSchema::from_names(names);
    }

    if let Some(names) = classifier
        .trailing_stage()
        .and_then(|stage| stage.fit_feature_names())
    {
        tracing::info!("Schema resolved from trailing pipeline stage ({})", names.len());
        return FeatureSchema::from_names(names);
    }

    tracing::warn!("Classifier exposes no feature names, falling back to default column list");
    FeatureSchema::default_columns()
}
