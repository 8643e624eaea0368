//! Free-form batch input parsing.
//!
//! Accepts the formats users actually paste: comma-separated, space- or
//! tab-separated, newline-separated, or table copy-paste. Tokens that
//! are not numbers, or fall outside `[0, 1]`, are silently dropped.
//! The surviving values are normalized to exactly [`SLOT_COUNT`]
//! entries by truncation or zero-padding.

use serde::{Deserialize, Serialize};

use crate::grid::SLOT_COUNT;

/// Outcome of a batch parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParseStatus {
    /// Exactly 96 usable values were found.
    Success { count: usize },
    /// More than 96 usable values; only the first 96 were kept.
    Truncated { parsed: usize },
    /// Fewer than 96 usable values; zero-padded up to 96.
    Padded { parsed: usize },
    /// No usable value in the input; the dataset must not be touched.
    NoValidValues,
}

impl ParseStatus {
    /// Whether the parsed values may be applied to a dataset.
    pub fn is_usable(&self) -> bool {
        !matches!(self, ParseStatus::NoValidValues)
    }

    /// User-visible status line.
    pub fn message(&self) -> String {
        match self {
            ParseStatus::Success { count } => format!("Parsed {count} values"),
            ParseStatus::Truncated { parsed } => {
                format!("Too many values ({parsed}); using the first {SLOT_COUNT}")
            }
            ParseStatus::Padded { parsed } => {
                format!("Only {parsed} values; zero-padded to {SLOT_COUNT}")
            }
            ParseStatus::NoValidValues => "No valid values found".to_string(),
        }
    }
}

/// Parse free-form batch text into exactly [`SLOT_COUNT`] values.
///
/// Lines are split first, then each line on runs of commas, spaces and
/// tabs. A token survives only if it parses as a float within `[0, 1]`.
/// On [`ParseStatus::NoValidValues`] the returned vector is empty.
pub fn parse_batch(text: &str) -> (Vec<f64>, ParseStatus) {
    let mut values: Vec<f64> = Vec::new();

    for line in text.lines() {
        for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if let Ok(value) = token.parse::<f64>() {
                if (0.0..=1.0).contains(&value) {
                    values.push(value);
                }
            }
        }
    }

    let parsed = values.len();
    match parsed {
        0 => (Vec::new(), ParseStatus::NoValidValues),
        SLOT_COUNT => (values, ParseStatus::Success { count: parsed }),
        n if n > SLOT_COUNT => {
            values.truncate(SLOT_COUNT);
            (values, ParseStatus::Truncated { parsed })
        }
        _ => {
            values.resize(SLOT_COUNT, 0.0);
            (values, ParseStatus::Padded { parsed })
        }
    }
}

/// Render values as comma-separated two-decimal text, the format used
/// to seed the batch input box. `parse_batch` round-trips this for any
/// 96-value input on the 0.01 grid.
pub fn format_as_text(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}
