//! Screening outcome types.
//!
//! Represents the result of scoring one Q-Chat-10 session, as handed to
//! the presentation collaborator.

use serde::{Deserialize, Serialize};

/// Binary verdict from the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// No ASD traits detected (prediction 0)
    NoTraits,
    /// Potential ASD traits detected (prediction 1)
    PotentialTraits,
}

impl Verdict {
    /// Map the classifier's raw binary prediction to a verdict.
    #[must_use]
    pub fn from_prediction(prediction: u8) -> Self {
        if prediction == 1 {
            Self::PotentialTraits
        } else {
            Self::NoTraits
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoTraits => "Behavioral patterns appear typical for this age",
            Self::PotentialTraits => {
                "High probability of ASD traits - consultation with a specialist advised"
            }
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTraits => write!(f, "NO TRAITS"),
            Self::PotentialTraits => write!(f, "POTENTIAL TRAITS"),
        }
    }
}

/// Result of one scored session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// Classifier verdict
    pub verdict: Verdict,

    /// Probability the classifier assigned to the positive class (0.0 to 1.0)
    pub probability: f64,

    /// Additive Q-Chat-10 score: sum of the ten coded items (0 to 10).
    /// Model-independent, interpretable alongside the verdict.
    pub qchat_score: u8,
}

impl ScreeningResult {
    /// Package a classifier invocation's outputs with the additive score.
    #[must_use]
    pub fn new(prediction: u8, probability: f64, qchat_score: u8) -> Self {
        Self {
            verdict: Verdict::from_prediction(prediction),
            probability,
            qchat_score,
        }
    }
}

/// Terminal outcome of one screening session.
///
/// This is the full contract with the presentation collaborator; rendering
/// beyond these three shapes is not this crate's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreeningOutcome {
    /// One or more of the sixteen inputs is absent; re-prompt, never score.
    Incomplete,
    /// The classifier invocation failed; message surfaced verbatim, not retried.
    PredictionError { message: String },
    /// The session was scored.
    Scored(ScreeningResult),
}

impl ScreeningOutcome {
    /// The scored result, if this session produced one.
    #[must_use]
    pub fn result(&self) -> Option<&ScreeningResult> {
        match self {
            Self::Scored(result) => Some(result),
            _ => None,
        }
    }
}

/// One session's outcome together with when it was produced.
///
/// Sessions are never persisted; the record exists only for presentation
/// and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screening {
    /// Terminal outcome for the session
    pub outcome: ScreeningOutcome,

    /// Timestamp of scoring
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Screening {
    /// Record an outcome at the current time.
    #[must_use]
    pub fn new(outcome: ScreeningOutcome) -> Self {
        Self {
            outcome,
            created_at: chrono::Utc::now(),
        }
    }
}
