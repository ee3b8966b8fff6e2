//! Header validation and the confidence gate for direct template parsing.

use ahash::AHashMap;
use itertools::Itertools;

use super::schema::{ColumnType, TEMPLATE_COLUMNS};

/// Confidence threshold a sheet must reach before it is parsed directly
/// instead of being handed to the extraction oracle. A hard gate, not a hint.
pub const DIRECT_PARSE_THRESHOLD: f64 = 0.7;

/// Result of validating a sheet's headers against the column schema.
#[derive(Debug, Clone, Default)]
pub struct TemplateValidation {
    pub is_valid: bool,
    /// 0.0 to 1.0, blending required-column and overall match ratios.
    pub confidence: f64,
    /// Semantic type -> actual header text. Each type binds at most once.
    pub matched_columns: AHashMap<ColumnType, String>,
    pub missing_required: Vec<ColumnType>,
    pub unmatched_headers: Vec<String>,
    pub messages: Vec<String>,
}

impl TemplateValidation {
    /// Whether the sheet can be parsed without the oracle: valid headers and
    /// confidence at or above the direct-parse threshold.
    pub fn can_parse_directly(&self) -> bool {
        self.is_valid
            && self.confidence >= DIRECT_PARSE_THRESHOLD
            && self.missing_required.is_empty()
    }
}

/// Validates headers against the template column table.
///
/// Empty headers and spreadsheet placeholder columns ("Unnamed...") are
/// skipped. The first rule to match a header wins; a header matching an
/// already-bound type is ignored rather than rebinding it. Validity requires
/// every required type to be matched plus at least three matches overall,
/// a floor against accidental single-column matches.
pub fn validate_headers(headers: &[String]) -> TemplateValidation {
    let mut matched_columns: AHashMap<ColumnType, String> = AHashMap::new();
    let mut unmatched_headers: Vec<String> = Vec::new();

    for header in headers {
        let header = header.trim();
        if header.is_empty() || header.starts_with("Unnamed") {
            continue;
        }

        let matched = TEMPLATE_COLUMNS.iter().find(|rule| rule.matches(header));
        match matched {
            Some(rule) => {
                matched_columns
                    .entry(rule.column_type)
                    .or_insert_with(|| header.to_string());
            }
            None => unmatched_headers.push(header.to_string()),
        }
    }

    let missing_required: Vec<ColumnType> = TEMPLATE_COLUMNS
        .iter()
        .filter(|rule| rule.required && !matched_columns.contains_key(&rule.column_type))
        .map(|rule| rule.column_type)
        .collect();

    let required_total = TEMPLATE_COLUMNS.iter().filter(|rule| rule.required).count();
    let required_matched = required_total - missing_required.len();

    let required_score = if required_total > 0 {
        required_matched as f64 / required_total as f64
    } else {
        1.0
    };
    let overall_score = if TEMPLATE_COLUMNS.is_empty() {
        0.0
    } else {
        matched_columns.len() as f64 / TEMPLATE_COLUMNS.len() as f64
    };
    let confidence = required_score * 0.6 + overall_score * 0.4;

    let is_valid = missing_required.is_empty() && matched_columns.len() >= 3;

    let mut messages = Vec::new();
    if !missing_required.is_empty() {
        messages.push(format!(
            "Missing required columns: {}",
            missing_required.iter().map(|c| c.tag()).join(", ")
        ));
    }
    if !unmatched_headers.is_empty() {
        messages.push(format!(
            "Unrecognized columns (will be ignored): {}",
            unmatched_headers.iter().join(", ")
        ));
    }
    if !matched_columns.is_empty() {
        messages.push(format!("Matched {} template columns", matched_columns.len()));
    }

    TemplateValidation {
        is_valid,
        confidence,
        matched_columns,
        missing_required,
        unmatched_headers,
        messages,
    }
}
