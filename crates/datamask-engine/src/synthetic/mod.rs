//! Synthetic value generation.
//!
//! Generators never see the real value they replace. The engine receives a
//! generator at construction time so tests can swap in a scripted one.

mod faker;

use chrono::NaiveDate;

use crate::errors::GenerationError;

pub use faker::FakerGenerator;

/// Inclusive range of state codes used in fake identifier numbers.
pub const IDENTIFIER_REGION_CODES: (i64, i64) = (1, 14);
/// Age bounds, in years, for generated birth dates.
pub const BIRTH_AGE_RANGE: (u32, u32) = (18, 100);

/// Source of replacement values for masked cells.
pub trait SyntheticGenerator: Send {
    fn fake_name(&mut self) -> Result<String, GenerationError>;

    fn fake_address(&mut self) -> Result<String, GenerationError>;

    fn fake_city(&mut self) -> Result<String, GenerationError>;

    fn fake_word(&mut self) -> Result<String, GenerationError>;

    /// Short sentence of at most `max_chars` characters.
    fn fake_short_text(&mut self, max_chars: usize) -> Result<String, GenerationError>;

    fn fake_email(&mut self) -> Result<String, GenerationError>;

    /// Uniform integer in `min..=max`.
    fn fake_bounded_int(&mut self, min: i64, max: i64) -> Result<i64, GenerationError>;

    /// Birth date of someone aged 18 to 100 today.
    fn fake_date_of_birth(&mut self) -> Result<NaiveDate, GenerationError>;

    /// Date strictly after today, before the end of the current century.
    fn fake_future_date(&mut self) -> Result<NaiveDate, GenerationError>;

    /// Identifier shaped `YYMMDD-RR-SSSS`: birth date, region code, serial.
    fn fake_identifier_number(&mut self) -> Result<String, GenerationError> {
        let birth_date = self.fake_date_of_birth()?;
        let (region_min, region_max) = IDENTIFIER_REGION_CODES;
        let region = self.fake_bounded_int(region_min, region_max)?;
        let serial = self.fake_bounded_int(0, 9999)?;
        Ok(format!(
            "{}-{region:02}-{serial:04}",
            birth_date.format("%y%m%d")
        ))
    }
}
