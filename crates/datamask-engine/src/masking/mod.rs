//! Column masking: strategy lookup and per-cell dispatch.

pub mod primitives;

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info, warn};

use datamask_core::{Cell, DATE_DISPLAY_FORMAT, Number, Table};

use crate::classifier::{Category, ColumnClassifier, is_expiration_header};
use crate::errors::{GenerationError, MaskingError};
use crate::model::{ColumnReport, MaskOptions, MaskingIssue, MaskingReport};
use crate::synthetic::SyntheticGenerator;
use crate::value_type::{ValueKind, classify_value, looks_like_date};

pub use primitives::{integer_digits, mask_email, mask_numeric, mask_phone, mask_text};

pub const SALARY_RANGE: (i64, i64) = (2000, 10000);
pub const AGE_RANGE: (i64, i64) = (18, 100);
pub const FALLBACK_NUMBER_RANGE: (i64, i64) = (1000, 9999);

/// Kind of synthetic value a strategy asks the generator for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticKind {
    IdentifierNumber,
    Email,
    Name,
    Address,
    City,
    Word,
}

/// How the cells of a column are transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Generate a fresh value and partially mask it; the original is discarded.
    MaskedSynthetic(SyntheticKind),
    /// Replace the original with a generated value.
    FullSynthetic(SyntheticKind),
    /// Mask the digits of the original value, keeping the last two.
    PartialMask,
    /// Replace numeric cells with a random integer; other cells pass through.
    BoundedNumber {
        min: i64,
        max: i64,
        integers_only: bool,
    },
    /// Date column: non-date cells fall back to [`Strategy::ByValueType`].
    Date,
    /// Choose a replacement from the value type of each cell.
    ByValueType,
}

impl Strategy {
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::MaskedSynthetic(SyntheticKind::IdentifierNumber) => "masked.identifier",
            Strategy::MaskedSynthetic(SyntheticKind::Email) => "masked.email",
            Strategy::MaskedSynthetic(_) => "masked.synthetic",
            Strategy::FullSynthetic(SyntheticKind::Name) => "synthetic.name",
            Strategy::FullSynthetic(SyntheticKind::Address) => "synthetic.address",
            Strategy::FullSynthetic(SyntheticKind::City) => "synthetic.city",
            Strategy::FullSynthetic(SyntheticKind::Word) => "synthetic.word",
            Strategy::FullSynthetic(_) => "synthetic.other",
            Strategy::PartialMask => "mask.digits",
            Strategy::BoundedNumber { .. } => "number.range",
            Strategy::Date => "date",
            Strategy::ByValueType => "fallback.by_type",
        }
    }
}

/// Strategy lookup table.
pub fn strategy_for(category: Category) -> Strategy {
    match category {
        Category::Identifier => Strategy::MaskedSynthetic(SyntheticKind::IdentifierNumber),
        Category::Email => Strategy::MaskedSynthetic(SyntheticKind::Email),
        Category::Name => Strategy::FullSynthetic(SyntheticKind::Name),
        Category::Address => Strategy::FullSynthetic(SyntheticKind::Address),
        Category::PlaceOfBirth => Strategy::FullSynthetic(SyntheticKind::City),
        Category::Department => Strategy::FullSynthetic(SyntheticKind::Word),
        Category::Phone => Strategy::PartialMask,
        Category::Salary => Strategy::BoundedNumber {
            min: SALARY_RANGE.0,
            max: SALARY_RANGE.1,
            integers_only: false,
        },
        Category::Age => Strategy::BoundedNumber {
            min: AGE_RANGE.0,
            max: AGE_RANGE.1,
            integers_only: true,
        },
        Category::Date | Category::ExpirationDate => Strategy::Date,
        Category::Unclassified => Strategy::ByValueType,
    }
}

struct ColumnPlan {
    strategy: Strategy,
    expiring: bool,
}

/// Masks columns of a table according to their header classification.
pub struct MaskingEngine {
    classifier: ColumnClassifier,
    generator: Box<dyn SyntheticGenerator>,
    options: MaskOptions,
}

impl MaskingEngine {
    pub fn new(options: MaskOptions, generator: Box<dyn SyntheticGenerator>) -> Self {
        Self {
            classifier: ColumnClassifier::with_threshold(options.fuzzy_threshold),
            generator,
            options,
        }
    }

    pub fn classifier(&self) -> &ColumnClassifier {
        &self.classifier
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Mask one column; the result has the same length and order as `values`.
    pub fn mask_column(&mut self, name: &str, values: &[Cell]) -> Result<Vec<Cell>, MaskingError> {
        let (masked, _) = self
            .mask_values(name, values)
            .map_err(|source| MaskingError::Column {
                column: name.to_string(),
                source,
            })?;
        Ok(masked)
    }

    /// Mask the requested columns of `table` in place.
    ///
    /// Unknown column names are skipped with a warning. If any column fails,
    /// the table is left untouched and the error is returned.
    pub fn mask_table(
        &mut self,
        table: &mut Table,
        requested: &[String],
    ) -> Result<MaskingReport, MaskingError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = MaskingReport::new(run_id.clone(), table.row_count() as u64);
        let mut staged: Vec<(String, Vec<Cell>)> = Vec::new();
        let mut seen = HashSet::new();

        info!(
            run_id = %run_id,
            rows = table.row_count(),
            columns = requested.len(),
            "masking started"
        );

        for name in requested {
            if !seen.insert(name.as_str()) {
                debug!(column = %name, "column requested twice");
                continue;
            }

            let Some(column) = table.column(name) else {
                warn!(column = %name, "column not found in table");
                report.record_warning(MaskingIssue::warning(
                    "column_not_found",
                    format!("column '{name}' not found in table"),
                    Some(name),
                ));
                continue;
            };

            let (values, summary) = self
                .mask_values(name, &column.values)
                .map_err(|source| {
                    warn!(run_id = %run_id, column = %name, error = %source, "masking failed");
                    MaskingError::Column {
                        column: name.clone(),
                        source,
                    }
                })?;
            staged.push((name.clone(), values));
            report.record_column(summary);
        }

        for (name, values) in staged {
            if let Some(column) = table.column_mut(&name) {
                column.values = values;
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            columns_masked = report.columns.len(),
            cells_masked = report.cells_masked_total,
            warnings = report.warnings.len(),
            duration_ms = report.duration_ms,
            "masking completed"
        );
        Ok(report)
    }

    fn mask_values(
        &mut self,
        name: &str,
        values: &[Cell],
    ) -> Result<(Vec<Cell>, ColumnReport), GenerationError> {
        let category = self.classifier.classify(name);
        let plan = ColumnPlan {
            strategy: strategy_for(category),
            expiring: category == Category::ExpirationDate || is_expiration_header(name),
        };

        let mut masked = Vec::with_capacity(values.len());
        let mut cells_masked = 0_u64;
        for cell in values {
            match self.mask_cell(&plan, cell)? {
                Some(replacement) => {
                    cells_masked += 1;
                    masked.push(replacement);
                }
                None => masked.push(cell.clone()),
            }
        }

        let summary = ColumnReport {
            column: name.to_string(),
            category,
            strategy: plan.strategy.id().to_string(),
            cells_total: values.len() as u64,
            cells_masked,
            cells_passthrough: values.len() as u64 - cells_masked,
        };
        info!(
            column = %name,
            category = %category,
            strategy = plan.strategy.id(),
            cells = summary.cells_total,
            masked = summary.cells_masked,
            "column masked"
        );
        Ok((masked, summary))
    }

    /// `Ok(None)` keeps the original cell.
    ///
    /// Date cells take the date rule in every column; the strategy only
    /// decides the other value kinds.
    fn mask_cell(&mut self, plan: &ColumnPlan, cell: &Cell) -> Result<Option<Cell>, GenerationError> {
        let value = match classify_value(cell) {
            ValueKind::Empty => return Ok(None),
            ValueKind::Date(_) => return self.mask_date(plan.expiring).map(Some),
            value => value,
        };

        match plan.strategy {
            Strategy::MaskedSynthetic(kind) => {
                let generated = self.synthesize(kind)?;
                let masked = match kind {
                    SyntheticKind::Email => mask_email(&generated),
                    _ => mask_text(&generated),
                };
                Ok(Some(Cell::Text(masked)))
            }
            Strategy::FullSynthetic(kind) => Ok(Some(Cell::Text(self.synthesize(kind)?))),
            Strategy::PartialMask => match value {
                ValueKind::Text(text) => Ok(Some(Cell::Text(mask_phone(&text)))),
                ValueKind::Number(number) => {
                    Ok(Some(Cell::Text(mask_phone(&integer_digits(number)))))
                }
                _ => Ok(None),
            },
            Strategy::BoundedNumber {
                min,
                max,
                integers_only,
            } => match value {
                ValueKind::Number(number) if !integers_only || number.is_int() => {
                    let replacement = self.generator.fake_bounded_int(min, max)?;
                    Ok(Some(Cell::Number(Number::Int(replacement))))
                }
                _ => Ok(None),
            },
            Strategy::Date | Strategy::ByValueType => self.mask_by_type(value),
        }
    }

    fn mask_by_type(&mut self, value: ValueKind) -> Result<Option<Cell>, GenerationError> {
        match value {
            ValueKind::Text(text) if looks_like_date(&text) => {
                debug!(value_len = text.len(), "unparsable date left unchanged");
                Ok(None)
            }
            ValueKind::Text(text) => self.replacement_text(&text).map(Some),
            ValueKind::Number(_) => {
                let (min, max) = FALLBACK_NUMBER_RANGE;
                let replacement = self.generator.fake_bounded_int(min, max)?;
                Ok(Some(Cell::Number(Number::Int(replacement))))
            }
            ValueKind::Empty | ValueKind::Date(_) => Ok(None),
        }
    }

    fn synthesize(&mut self, kind: SyntheticKind) -> Result<String, GenerationError> {
        match kind {
            SyntheticKind::IdentifierNumber => self.generator.fake_identifier_number(),
            SyntheticKind::Email => self.generator.fake_email(),
            SyntheticKind::Name => self.generator.fake_name(),
            SyntheticKind::Address => self.generator.fake_address(),
            SyntheticKind::City => self.generator.fake_city(),
            SyntheticKind::Word => self.generator.fake_word(),
        }
    }

    fn mask_date(&mut self, expiring: bool) -> Result<Cell, GenerationError> {
        let date = if expiring {
            self.generator.fake_future_date()?
        } else {
            self.generator.fake_date_of_birth()?
        };
        Ok(Cell::Text(date.format(DATE_DISPLAY_FORMAT).to_string()))
    }

    fn replacement_text(&mut self, original: &str) -> Result<Cell, GenerationError> {
        let max_chars = self.options.short_text_max_chars;
        let mut candidate = self.generator.fake_short_text(max_chars)?;
        let mut attempts = 1;
        while candidate == original && attempts < self.options.max_attempts_text {
            candidate = self.generator.fake_short_text(max_chars)?;
            attempts += 1;
        }
        Ok(Cell::Text(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_table_covers_every_category() {
        assert_eq!(
            strategy_for(Category::Identifier),
            Strategy::MaskedSynthetic(SyntheticKind::IdentifierNumber)
        );
        assert_eq!(
            strategy_for(Category::Email),
            Strategy::MaskedSynthetic(SyntheticKind::Email)
        );
        assert_eq!(
            strategy_for(Category::PlaceOfBirth),
            Strategy::FullSynthetic(SyntheticKind::City)
        );
        assert_eq!(
            strategy_for(Category::Department),
            Strategy::FullSynthetic(SyntheticKind::Word)
        );
        assert_eq!(strategy_for(Category::Phone), Strategy::PartialMask);
        assert_eq!(strategy_for(Category::ExpirationDate), Strategy::Date);
        assert_eq!(strategy_for(Category::Unclassified), Strategy::ByValueType);
        assert_eq!(
            strategy_for(Category::Age),
            Strategy::BoundedNumber {
                min: 18,
                max: 100,
                integers_only: true
            }
        );
    }

    #[test]
    fn strategy_ids_are_stable() {
        assert_eq!(strategy_for(Category::Salary).id(), "number.range");
        assert_eq!(strategy_for(Category::Name).id(), "synthetic.name");
        assert_eq!(strategy_for(Category::Identifier).id(), "masked.identifier");
    }
}
