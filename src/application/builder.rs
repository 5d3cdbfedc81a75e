//! Feature vector builder: encodes one complete session into the row the
//! classifier expects.
//!
//! The schema drives population: only columns present in it are written,
//! so a narrower (or empty) schema degrades to skipping fields rather
//! than failing.

use crate::application::coder::{code_response, ITEM_POLICIES};
use crate::domain::{FeatureSchema, FeatureVector, SurveyResponses};

/// Name prefix columns of the ethnicity dummy group share (compared
/// case-insensitively).
const ETHNICITY_GROUP_MARKER: &str = "ethnicity";

/// Name prefix columns of the respondent-role dummy group share.
const RESPONDENT_GROUP_MARKER: &str = "who completed";

/// Item code column names in questionnaire order.
const ITEM_COLUMNS: [&str; 10] = ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "A10"];

/// One session encoded for scoring.
#[derive(Debug, Clone)]
pub struct EncodedSession {
    /// The populated row over the schema's columns
    pub vector: FeatureVector,

    /// The ten coded item values, kept for the additive Q-Chat-10 score
    pub item_codes: [u8; 10],
}

impl EncodedSession {
    /// Sum of the ten coded items: the additive Q-Chat-10 score (0-10).
    #[must_use]
    pub fn qchat_score(&self) -> u8 {
        self.item_codes.iter().sum()
    }
}

/// Canonical form of a category value: lowercased, all whitespace removed.
#[must_use]
pub fn normalize_category(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// The category token of a dummy column name: everything after the last
/// underscore ("Ethnicity_White European" -> "White European").
#[must_use]
pub fn trailing_category_token(column: &str) -> &str {
    column.rsplit('_').next().unwrap_or(column)
}

/// Encode one session against the schema.
///
/// Returns `None` when any of the sixteen fields is absent; a partial
/// vector is never produced.
#[must_use]
pub fn encode_session(
    responses: &SurveyResponses,
    schema: &FeatureSchema,
) -> Option<EncodedSession> {
    let item_codes = code_items(responses)?;
    let age = responses.age_months?;
    let sex = responses.sex.as_deref()?;
    let jaundice = responses.jaundice.as_deref()?;
    let family_asd = responses.family_asd.as_deref()?;
    let ethnicity = responses.ethnicity.as_deref()?;
    let who_completed = responses.who_completed.as_deref()?;

    let mut vector = FeatureVector::zeroed(schema);

    for (column, code) in ITEM_COLUMNS.iter().zip(item_codes) {
        vector.set(column, f64::from(code));
    }
    vector.set("Age_Mons", age);
    vector.set("Sex", binary(sex == "Male"));
    vector.set("Jaundice", binary(jaundice == "Yes"));
    vector.set("Family_mem_with_ASD", binary(family_asd == "Yes"));

    set_dummy(&mut vector, schema, ETHNICITY_GROUP_MARKER, ethnicity);
    set_dummy(&mut vector, schema, RESPONDENT_GROUP_MARKER, who_completed);

    Some(EncodedSession { vector, item_codes })
}

fn code_items(responses: &SurveyResponses) -> Option<[u8; 10]> {
    let mut codes = [0u8; 10];
    for ((answer, policy), code) in responses
        .items()
        .into_iter()
        .zip(ITEM_POLICIES)
        .zip(codes.iter_mut())
    {
        *code = code_response(answer, policy)?;
    }
    Some(codes)
}

fn binary(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Set the matching dummy column of a categorical group to 1.
///
/// A column belongs to the group when its name contains `marker`
/// (case-insensitively); it matches when its trailing category token
/// equals the user's selection after normalization. At most one column is
/// set. A selection with no matching column leaves the whole group at 0:
/// the schema's category set may be narrower than the form's choices, so
/// this is a valid, silent outcome.
fn set_dummy(vector: &mut FeatureVector, schema: &FeatureSchema, marker: &str, selection: &str) {
    let wanted = normalize_category(selection);
    for column in schema.columns() {
        if !column.to_lowercase().contains(marker) {
            continue;
        }
        if normalize_category(trailing_category_token(column)) == wanted {
            vector.set(column, 1.0);
            return;
        }
    }
    tracing::debug!("No '{marker}' dummy column matches selection '{selection}'");
}
