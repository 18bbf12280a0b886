//! Typed column headers and derived-key computation.

use serde::{Deserialize, Serialize};

/// Label of the identity column every table carries.
pub const IDENTITY_LABEL: &str = "Id";

/// Suffix marking a column as holding a serialized JSON value. The marker is
/// part of the stored header label but stripped from the derived key.
const JSON_SUFFIX: &str = " JSON";

/// Header labels that hold booleans without the `Is ` prefix.
const BOOLEAN_LABELS: &[&str] = &["Enabled", "Verified"];

/// How cells under a header are coerced during decode/encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Pass-through: strings, numbers, date-like strings.
    Text,
    /// Textual "true"/native true decodes to `true`, everything else `false`.
    Boolean,
    /// Cell holds a serialized structured value.
    Json,
}

/// One declared column: the stored label, the derived record key, and the
/// coercion kind. Built once at registry construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub label: String,
    pub key: String,
    pub kind: ColumnKind,
}

impl Header {
    /// Classifies a header label and derives its record key.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let kind = if label.ends_with(JSON_SUFFIX) {
            ColumnKind::Json
        } else if label.starts_with("Is ") || BOOLEAN_LABELS.contains(&label) {
            ColumnKind::Boolean
        } else {
            ColumnKind::Text
        };
        Self {
            label: label.to_string(),
            key: derive_key(label),
            kind,
        }
    }

    /// True for the identity column.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.label == IDENTITY_LABEL
    }
}

/// Derives a record key from a header label: title-cased words joined with
/// the first letter lower-cased, the JSON marker stripped.
///
/// `First Name` → `firstName`, `Specialties JSON` → `specialties`,
/// `Id` → `id`.
#[must_use]
pub fn derive_key(label: &str) -> String {
    let stripped = label.strip_suffix(JSON_SUFFIX).unwrap_or(label);
    let mut key = String::with_capacity(stripped.len());
    for (i, word) in stripped.split_whitespace().enumerate() {
        let mut chars = word.chars();
        let Some(first) = chars.next() else { continue };
        if i == 0 {
            key.extend(first.to_lowercase());
        } else {
            key.extend(first.to_uppercase());
        }
        key.extend(chars.flat_map(|c| c.to_lowercase()));
    }
    key
}
