use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::{Category, DEFAULT_FUZZY_THRESHOLD};

/// Default character budget for replacement text in unclassified columns.
pub const DEFAULT_SHORT_TEXT_MAX_CHARS: usize = 20;

/// Options for the masking engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskOptions {
    /// Fuzzy score a header must exceed to match identifier/email keywords.
    pub fuzzy_threshold: u8,
    /// Maximum length of generated text for unclassified text cells.
    pub short_text_max_chars: usize,
    /// Attempts at producing replacement text that differs from the original.
    pub max_attempts_text: u32,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            short_text_max_chars: DEFAULT_SHORT_TEXT_MAX_CHARS,
            max_attempts_text: 8,
        }
    }
}

/// Summary of one masked column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub column: String,
    pub category: Category,
    pub strategy: String,
    pub cells_total: u64,
    pub cells_masked: u64,
    pub cells_passthrough: u64,
}

/// Structured, non-fatal masking issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskingIssue {
    pub level: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl MaskingIssue {
    pub fn warning(code: &str, message: String, column: Option<&str>) -> Self {
        Self {
            level: "warning".to_string(),
            code: code.to_string(),
            message,
            column: column.map(str::to_string),
        }
    }
}

/// Report for a masking run over one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingReport {
    pub run_id: String,
    pub rows: u64,
    pub columns: Vec<ColumnReport>,
    pub cells_masked_total: u64,
    pub category_usage: BTreeMap<String, u64>,
    pub warnings_by_code: BTreeMap<String, u64>,
    pub warnings: Vec<MaskingIssue>,
    pub duration_ms: u64,
}

impl MaskingReport {
    pub fn new(run_id: String, rows: u64) -> Self {
        Self {
            run_id,
            rows,
            columns: Vec::new(),
            cells_masked_total: 0,
            category_usage: BTreeMap::new(),
            warnings_by_code: BTreeMap::new(),
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_column(&mut self, column: ColumnReport) {
        self.cells_masked_total += column.cells_masked;
        *self
            .category_usage
            .entry(column.category.as_str().to_string())
            .or_insert(0) += 1;
        self.columns.push(column);
    }

    pub fn record_warning(&mut self, issue: MaskingIssue) {
        *self.warnings_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        self.warnings.push(issue);
    }

    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|column| column.column == name)
    }
}
