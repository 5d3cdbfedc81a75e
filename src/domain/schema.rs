//! Feature schema and feature vector types.
//!
//! The schema is whatever ordered column list the loaded classifier was
//! trained on; it is discovered once at startup and immutable afterwards.
//! Membership in the schema, not any fixed enumeration, decides which
//! fields the builder populates.

use serde::{Deserialize, Serialize};

/// Default column list, matching the training pipeline's export layout.
///
/// Used when the loaded classifier exposes no fit-time feature names.
pub const DEFAULT_FEATURE_COLUMNS: [&str; 29] = [
    "A1",
    "A2",
    "A3",
    "A4",
    "A5",
    "A6",
    "A7",
    "A8",
    "A9",
    "A10",
    "Age_Mons",
    "Sex",
    "Jaundice",
    "Family_mem_with_ASD",
    "Ethnicity_Hispanic",
    "Ethnicity_Latino",
    "Ethnicity_Native Indian",
    "Ethnicity_Others",
    "Ethnicity_Pacifica",
    "Ethnicity_White European",
    "Ethnicity_asian",
    "Ethnicity_black",
    "Ethnicity_middle eastern",
    "Ethnicity_mixed",
    "Ethnicity_south asian",
    "Who completed the test_Health Care Professional",
    "Who completed the test_Others",
    "Who completed the test_Self",
    "Who completed the test_family member",
];

/// Ordered list of unique feature column names a classifier expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema from introspected names, deduplicating while
    /// preserving first-occurrence order.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
        Self { columns }
    }

    /// The static default schema.
    #[must_use]
    pub fn default_columns() -> Self {
        Self::from_names(DEFAULT_FEATURE_COLUMNS)
    }

    /// An empty schema. Legal: every population step guards on column
    /// presence, so an empty schema degrades to skipping every field.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the named column is part of the schema.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A single tabular row keyed exactly by a schema's column names.
///
/// All values start at zero; the builder then writes direct features and at
/// most one dummy column per categorical group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create a zero-initialized row over the schema's columns.
    #[must_use]
    pub fn zeroed(schema: &FeatureSchema) -> Self {
        Self {
            columns: schema.columns().to_vec(),
            values: vec![0.0; schema.len()],
        }
    }

    /// Set a column's value. Returns `false` (and writes nothing) when the
    /// column is not part of the row.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.columns.iter().position(|c| c == name) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Look up a column's value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| self.values[idx])
    }

    /// Column names in row order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in row order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
