use chrono::{Datelike, Duration, Months, NaiveDate};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Word, Words};
use fake::faker::name::en::Name;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::errors::GenerationError;
use crate::synthetic::{BIRTH_AGE_RANGE, SyntheticGenerator};

/// [`SyntheticGenerator`] backed by the `fake` crate (English locale).
#[derive(Debug, Clone)]
pub struct FakerGenerator {
    rng: ChaCha8Rng,
    today: NaiveDate,
}

impl FakerGenerator {
    /// Seed from the operating system entropy source.
    pub fn from_entropy(today: NaiveDate) -> Result<Self, GenerationError> {
        let rng = ChaCha8Rng::try_from_os_rng()
            .map_err(|err| GenerationError::Entropy(err.to_string()))?;
        Ok(Self { rng, today })
    }

    /// Reproducible generator for a fixed seed.
    pub fn seeded(seed: u64, today: NaiveDate) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn years_before_today(&self, years: u32) -> Result<NaiveDate, GenerationError> {
        self.today
            .checked_sub_months(Months::new(years * 12))
            .ok_or_else(|| {
                GenerationError::DateOutOfRange(format!("{years} years before {}", self.today))
            })
    }

    fn date_between(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<NaiveDate, GenerationError> {
        if start > end {
            return Err(GenerationError::DateOutOfRange(format!(
                "empty date range {start}..={end}"
            )));
        }
        let span = (end - start).num_days();
        let offset = self.rng.random_range(0..=span);
        Ok(start + Duration::days(offset))
    }
}

impl SyntheticGenerator for FakerGenerator {
    fn fake_name(&mut self) -> Result<String, GenerationError> {
        Ok(Name().fake_with_rng(&mut self.rng))
    }

    fn fake_address(&mut self) -> Result<String, GenerationError> {
        let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateAbbr().fake_with_rng(&mut self.rng);
        let zip: String = ZipCode().fake_with_rng(&mut self.rng);
        Ok(format!("{number} {street}, {city}, {state} {zip}"))
    }

    fn fake_city(&mut self) -> Result<String, GenerationError> {
        Ok(CityName().fake_with_rng(&mut self.rng))
    }

    fn fake_word(&mut self) -> Result<String, GenerationError> {
        Ok(Word().fake_with_rng(&mut self.rng))
    }

    fn fake_short_text(&mut self, max_chars: usize) -> Result<String, GenerationError> {
        if max_chars == 0 {
            return Ok(String::new());
        }

        let words: Vec<String> = Words(2..6).fake_with_rng(&mut self.rng);
        let mut text = String::new();
        for word in words {
            let separator = usize::from(!text.is_empty());
            // keep one character for the closing period
            if text.chars().count() + separator + word.chars().count() + 1 > max_chars {
                break;
            }
            if separator == 1 {
                text.push(' ');
            }
            text.push_str(&word);
        }

        if text.is_empty() {
            let word: String = Word().fake_with_rng(&mut self.rng);
            text = word.chars().take(max_chars).collect();
        }
        if text.chars().count() < max_chars {
            text.push('.');
        }

        Ok(capitalize(&text))
    }

    fn fake_email(&mut self) -> Result<String, GenerationError> {
        Ok(SafeEmail().fake_with_rng(&mut self.rng))
    }

    fn fake_bounded_int(&mut self, min: i64, max: i64) -> Result<i64, GenerationError> {
        if min > max {
            return Err(GenerationError::InvalidRange { min, max });
        }
        Ok(self.rng.random_range(min..=max))
    }

    fn fake_date_of_birth(&mut self) -> Result<NaiveDate, GenerationError> {
        let (youngest, oldest) = BIRTH_AGE_RANGE;
        let start = self.years_before_today(oldest)?;
        let end = self.years_before_today(youngest)?;
        self.date_between(start, end)
    }

    fn fake_future_date(&mut self) -> Result<NaiveDate, GenerationError> {
        let start = self.today.succ_opt().ok_or_else(|| {
            GenerationError::DateOutOfRange(format!("no day after {}", self.today))
        })?;
        let century_end_year = self.today.year().div_euclid(100) * 100 + 99;
        let end = NaiveDate::from_ymd_opt(century_end_year, 12, 31).ok_or_else(|| {
            GenerationError::DateOutOfRange(format!("end of century {century_end_year}"))
        })?;
        if start > end {
            return Ok(start);
        }
        self.date_between(start, end)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default()
    }

    #[test]
    fn identifier_number_has_fixed_shape() {
        let mut generator = FakerGenerator::seeded(7, today());
        for _ in 0..200 {
            let id = generator.fake_identifier_number().expect("identifier");
            let bytes = id.as_bytes();
            assert_eq!(bytes.len(), 14, "{id}");
            assert_eq!(bytes[6], b'-');
            assert_eq!(bytes[9], b'-');
            let region: u32 = id[7..9].parse().expect("region digits");
            assert!((1..=14).contains(&region), "{id}");
            assert!(
                id.chars()
                    .enumerate()
                    .all(|(idx, ch)| idx == 6 || idx == 9 || ch.is_ascii_digit()),
                "{id}"
            );
        }
    }

    #[test]
    fn birth_dates_are_between_18_and_100_years_ago() {
        let mut generator = FakerGenerator::seeded(11, today());
        let earliest = NaiveDate::from_ymd_opt(1924, 6, 15).unwrap_or_default();
        let latest = NaiveDate::from_ymd_opt(2006, 6, 15).unwrap_or_default();
        for _ in 0..500 {
            let date = generator.fake_date_of_birth().expect("birth date");
            assert!(date >= earliest && date <= latest, "{date}");
        }
    }

    #[test]
    fn future_dates_stay_in_century() {
        let mut generator = FakerGenerator::seeded(3, today());
        let century_end = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or_default();
        for _ in 0..500 {
            let date = generator.fake_future_date().expect("future date");
            assert!(date > today() && date <= century_end, "{date}");
        }
    }

    #[test]
    fn future_date_on_last_day_of_century_is_tomorrow() {
        let last_day = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or_default();
        let mut generator = FakerGenerator::seeded(3, last_day);
        let date = generator.fake_future_date().expect("future date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2100, 1, 1).unwrap_or_default());
    }

    #[test]
    fn short_text_respects_limit() {
        let mut generator = FakerGenerator::seeded(5, today());
        for max in [1, 2, 5, 20, 40] {
            for _ in 0..50 {
                let text = generator.fake_short_text(max).expect("short text");
                assert!(!text.is_empty());
                assert!(text.chars().count() <= max, "{text:?} > {max}");
            }
        }
        assert_eq!(generator.fake_short_text(0).expect("empty text"), "");
    }

    #[test]
    fn bounded_int_checks_range() {
        let mut generator = FakerGenerator::seeded(9, today());
        for _ in 0..200 {
            let value = generator.fake_bounded_int(2000, 10000).expect("int");
            assert!((2000..=10000).contains(&value));
        }
        assert!(matches!(
            generator.fake_bounded_int(5, 1),
            Err(GenerationError::InvalidRange { min: 5, max: 1 })
        ));
    }

    #[test]
    fn emails_and_names_are_plausible() {
        let mut generator = FakerGenerator::seeded(1, today());
        let email = generator.fake_email().expect("email");
        let (local, domain) = email.split_once('@').expect("email has @");
        assert!(!local.is_empty());
        assert!(domain.contains('.'));
        assert!(!generator.fake_name().expect("name").is_empty());
        assert!(generator.fake_address().expect("address").contains(", "));
        assert!(!generator.fake_city().expect("city").is_empty());
        assert!(!generator.fake_word().expect("word").is_empty());
    }

    #[test]
    fn same_seed_same_values() {
        let mut left = FakerGenerator::seeded(42, today());
        let mut right = FakerGenerator::seeded(42, today());
        assert_eq!(left.fake_name().ok(), right.fake_name().ok());
        assert_eq!(
            left.fake_identifier_number().ok(),
            right.fake_identifier_number().ok()
        );
    }

    #[test]
    fn from_entropy_builds_a_generator() {
        let generator = FakerGenerator::from_entropy(today()).expect("os entropy");
        assert_eq!(generator.today(), today());
    }
}
