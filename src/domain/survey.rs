//! Survey response types for one Q-Chat-10 screening session.
//!
//! Based on the Q-Chat-10 questionnaire for toddlers (12-36 months):
//! ten behavioral items plus age and five demographic fields.

use serde::{Deserialize, Serialize};

/// Raw answers for one screening session, as collected by the form.
///
/// Every field is optional: the form may be submitted with gaps, and a
/// session is only scorable once all sixteen fields are present. Item
/// answers are free-form labels; the coder matches them by keyword, so the
/// form may reword its option labels without breaking the contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyResponses {
    /// A1: Does the child look when called by name?
    pub a1: Option<String>,
    /// A2: How easy is it to get eye contact?
    pub a2: Option<String>,
    /// A3: Does the child point to indicate wants?
    pub a3: Option<String>,
    /// A4: Does the child point to share interest?
    pub a4: Option<String>,
    /// A5: Does the child pretend play?
    pub a5: Option<String>,
    /// A6: Does the child follow where the carer looks?
    pub a6: Option<String>,
    /// A7: Does the child try to comfort someone visibly upset?
    pub a7: Option<String>,
    /// A8: How would you describe the child's first words?
    pub a8: Option<String>,
    /// A9: Does the child use simple gestures?
    pub a9: Option<String>,
    /// A10: Does the child stare at nothing with no apparent purpose?
    /// Polarity is inverted relative to A1-A9.
    pub a10: Option<String>,

    /// Age in months (12-36 typical range)
    pub age_months: Option<f64>,
    /// Sex: "Male" or "Female"
    pub sex: Option<String>,
    /// Born with jaundice: "Yes" or "No"
    pub jaundice: Option<String>,
    /// Family member with ASD: "Yes" or "No"
    pub family_asd: Option<String>,
    /// Ethnicity, one of [`ETHNICITY_CHOICES`]
    pub ethnicity: Option<String>,
    /// Who is completing the test, one of [`RESPONDENT_CHOICES`]
    pub who_completed: Option<String>,
}

impl SurveyResponses {
    /// Whether all sixteen fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the fields still absent, in questionnaire order.
    ///
    /// Useful for re-prompting: an incomplete session is never scored, not
    /// even partially.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        let items = [
            (&self.a1, "a1"),
            (&self.a2, "a2"),
            (&self.a3, "a3"),
            (&self.a4, "a4"),
            (&self.a5, "a5"),
            (&self.a6, "a6"),
            (&self.a7, "a7"),
            (&self.a8, "a8"),
            (&self.a9, "a9"),
            (&self.a10, "a10"),
        ];
        for (answer, name) in items {
            if answer.is_none() {
                missing.push(name);
            }
        }

        if self.age_months.is_none() {
            missing.push("age_months");
        }
        let demographics = [
            (&self.sex, "sex"),
            (&self.jaundice, "jaundice"),
            (&self.family_asd, "family_asd"),
            (&self.ethnicity, "ethnicity"),
            (&self.who_completed, "who_completed"),
        ];
        for (answer, name) in demographics {
            if answer.is_none() {
                missing.push(name);
            }
        }

        missing
    }

    /// The ten item answers in questionnaire order.
    #[must_use]
    pub fn items(&self) -> [Option<&str>; 10] {
        [
            self.a1.as_deref(),
            self.a2.as_deref(),
            self.a3.as_deref(),
            self.a4.as_deref(),
            self.a5.as_deref(),
            self.a6.as_deref(),
            self.a7.as_deref(),
            self.a8.as_deref(),
            self.a9.as_deref(),
            self.a10.as_deref(),
        ]
    }
}

/// Option labels for the frequency-style items (A1, A3-A7, A9).
pub const STANDARD_OPTIONS: [&str; 2] = ["Always / Usually", "Sometimes / Rarely / Never"];

/// Option labels for the eye-contact item (A2).
pub const EASE_OPTIONS: [&str; 2] = ["Very Easy / Quite Easy", "Quite Difficult / Very Difficult"];

/// Option labels for the first-words item (A8).
pub const TYPICALITY_OPTIONS: [&str; 2] = ["Typical", "Non-typical / Delayed"];

/// Option labels for the staring item (A10, inverted polarity).
pub const FREQUENCY_OPTIONS: [&str; 2] = ["Never / Rarely", "Sometimes / Usually / Always"];

/// Ethnicity choices offered by the form.
///
/// The model's dummy-column set may be narrower than this list; a choice
/// without a matching column is a valid, silent outcome.
pub const ETHNICITY_CHOICES: [&str; 11] = [
    "Middle Eastern",
    "White European",
    "Hispanic",
    "Black",
    "Asian",
    "South Asian",
    "Native Indian",
    "Others",
    "Latino",
    "Mixed",
    "Pacifica",
];

/// Respondent-role choices offered by the form.
pub const RESPONDENT_CHOICES: [&str; 4] = [
    "Family member",
    "Health Care Professional",
    "Self",
    "Others",
];
