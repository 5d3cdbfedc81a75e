//! Response coder: maps one categorical item answer to a 0/1 code.
//!
//! Coding matches keywords by substring rather than enumerating exact
//! labels, so the form may offer variants ("Always / Usually",
//! "Very Easy / Quite Easy") without an exact string contract.

/// Keywords marking a typical / no-concern answer under standard coding.
const TYPICAL_KEYWORDS: [&str; 4] = ["Always", "Usually", "Easy", "Typical"];

/// Keywords marking a low-frequency answer under reverse coding.
const LOW_FREQUENCY_KEYWORDS: [&str; 2] = ["Never", "Rarely"];

/// Coding policy for one questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingPolicy {
    /// 0 when the answer contains a typical keyword, 1 otherwise.
    /// Applies to items A1-A9.
    Standard,
    /// 0 when the answer contains a low-frequency keyword, 1 otherwise.
    /// Applies to A10 only, whose polarity is inverted.
    Reverse,
}

/// Per-item coding policies in questionnaire order (A1..A10).
pub const ITEM_POLICIES: [CodingPolicy; 10] = [
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Standard,
    CodingPolicy::Reverse,
];

/// Code one answer under the given policy.
///
/// An absent answer codes to `None`; the caller propagates it as a
/// terminal incomplete session, never as a default code.
#[must_use]
pub fn code_response(answer: Option<&str>, policy: CodingPolicy) -> Option<u8> {
    let answer = answer?;
    let keywords: &[&str] = match policy {
        CodingPolicy::Standard => &TYPICAL_KEYWORDS,
        CodingPolicy::Reverse => &LOW_FREQUENCY_KEYWORDS,
    };
    if keywords.iter().any(|k| answer.contains(k)) {
        Some(0)
    } else {
        Some(1)
    }
}
