//! TD3 passport machine-readable zone decoding.
//!
//! The last OCR line is taken as MRZ line 2 and the one before it as line 1.
//! Fields are cut at fixed offsets without checking the line length first;
//! a short line simply yields empty or partial slices, which decode to `None`.

use std::ops::Range;

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::MRZ_DOCUMENT_MARKER;
use super::{DocumentExtractor, Result};
use crate::error::{ExtractionError, Missing};
use crate::models::{CheckDigitReport, ExtractionConfig, LineSequence, MrzDate, PassportMrzFields};

// Line 2 offsets, half-open.
const PASSPORT_NUMBER: Range<usize> = 0..9;
const PASSPORT_NUMBER_CHECK: usize = 9;
const BIRTH_DATE: Range<usize> = 13..19;
const BIRTH_DATE_CHECK: usize = 19;
const EXPIRATION_DATE: Range<usize> = 21..27;
const EXPIRATION_DATE_CHECK: usize = 27;
const PERSONAL_NUMBER: Range<usize> = 28..42;
const PERSONAL_NUMBER_CHECK: usize = 42;
const FINAL_CHECK: usize = 43;

const PERSONAL_NUMBER_KEPT: usize = 10;

/// Decodes the two-line MRZ block at the end of a passport page.
pub struct MrzPassportExtractor {
    country_prefix: String,
    century_pivot: u32,
    validate_check_digits: bool,
}

impl MrzPassportExtractor {
    pub fn new() -> Self {
        Self {
            country_prefix: "BGD".to_string(),
            century_pivot: 50,
            validate_check_digits: false,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_country_prefix(config.mrz_country_prefix.clone())
            .with_century_pivot(config.mrz_century_pivot)
            .with_check_digit_validation(config.validate_mrz_check_digits)
    }

    /// Country code removed from the front of the surname.
    pub fn with_country_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.country_prefix = prefix.into();
        self
    }

    /// Two-digit years at or above `pivot` are read as 19xx.
    pub fn with_century_pivot(mut self, pivot: u32) -> Self {
        self.century_pivot = pivot;
        self
    }

    /// Attach a [`CheckDigitReport`]. Never changes the status.
    pub fn with_check_digit_validation(mut self, validate: bool) -> Self {
        self.validate_check_digits = validate;
        self
    }

    /// Given names followed by the surname, upper-cased and unseparated.
    pub fn decode_name(&self, line: &str) -> Option<String> {
        let cleaned = MRZ_DOCUMENT_MARKER.replace(line, "").replace('<', " ");
        let mut parts = cleaned.split_whitespace();

        let first = parts.next()?;
        let surname = first.strip_prefix(self.country_prefix.as_str()).unwrap_or(first);
        let given_names: String = parts.collect();

        let name = format!("{}{}", given_names, surname).to_uppercase();
        if name.is_empty() { None } else { Some(name) }
    }

    /// `YYMMDD` to a calendar date using the century pivot.
    ///
    /// Stricter than a month-only check: a day the month does not have
    /// (e.g. `740231`) also decodes to `None`.
    pub fn decode_date(&self, yymmdd: &str) -> Option<MrzDate> {
        if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year: u32 = yymmdd[0..2].parse().ok()?;
        let month: u32 = yymmdd[2..4].parse().ok()?;
        let day: u32 = yymmdd[4..6].parse().ok()?;

        let full_year = if year >= self.century_pivot {
            1900 + year
        } else {
            2000 + year
        };

        NaiveDate::from_ymd_opt(full_year as i32, month, day).map(MrzDate)
    }

    fn decode_fields(&self, code: &str) -> PassportMrzFields {
        let personal_number = non_empty(slice(code, PERSONAL_NUMBER))
            .map(|p| p.chars().take(PERSONAL_NUMBER_KEPT).collect());

        PassportMrzFields {
            passport_number: non_empty(slice(code, PASSPORT_NUMBER)),
            passport_number_check_digit: digit_at(code, PASSPORT_NUMBER_CHECK),
            birth_date: self.decode_date(&slice(code, BIRTH_DATE)),
            birth_date_check_digit: digit_at(code, BIRTH_DATE_CHECK),
            expiration_date: self.decode_date(&slice(code, EXPIRATION_DATE)),
            expiration_date_check_digit: digit_at(code, EXPIRATION_DATE_CHECK),
            personal_number,
            personal_number_check_digit: digit_at(code, PERSONAL_NUMBER_CHECK),
            final_check_digit: digit_at(code, FINAL_CHECK),
            name: None,
            check_digits: None,
        }
    }
}

impl Default for MrzPassportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for MrzPassportExtractor {
    type Output = PassportMrzFields;

    fn extract(&self, lines: &LineSequence) -> Result<PassportMrzFields> {
        let code = lines
            .last()
            .map(|line| line.text.as_str())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ExtractionError::NotFound(Missing::MrzCode))?;

        debug!("MRZ code line: {}", code);

        let mut fields = self.decode_fields(code);
        fields.name = lines
            .second_to_last()
            .and_then(|line| self.decode_name(&line.text));

        if fields.name.is_none() {
            debug!("MRZ name line not found");
        }

        if self.validate_check_digits {
            fields.check_digits = Some(verify_check_digits(code));
        }

        debug!("MRZ decoded with status {}", fields.status());
        Ok(fields)
    }
}

/// Characters `range` of `text`, clipped to its length.
fn slice(text: &str, range: Range<usize>) -> String {
    text.chars().skip(range.start).take(range.len()).collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn digit_at(text: &str, index: usize) -> Option<u8> {
    text.chars()
        .nth(index)
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
}

/// ICAO 9303 check digit: weights 7, 3, 1 repeating over character values,
/// where digits count as themselves, `A`-`Z` as 10-35 and filler as 0.
pub fn compute_check_digit(field: &str) -> Option<u8> {
    const WEIGHTS: [u32; 3] = [7, 3, 1];

    let mut sum = 0u32;
    for (i, c) in field.chars().enumerate() {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            '<' => 0,
            _ => return None,
        };
        sum += value * WEIGHTS[i % 3];
    }

    Some((sum % 10) as u8)
}

/// Recompute every check digit of MRZ line 2 and compare with the printed one.
pub fn verify_check_digits(code: &str) -> CheckDigitReport {
    let check = |range: Range<usize>, at: usize| -> bool {
        let expected = digit_at(code, at);
        expected.is_some() && compute_check_digit(&slice(code, range)) == expected
    };

    let composite_field = format!(
        "{}{}{}",
        slice(code, 0..10),
        slice(code, 13..20),
        slice(code, 21..43)
    );
    let composite = {
        let expected = digit_at(code, FINAL_CHECK);
        expected.is_some() && compute_check_digit(&composite_field) == expected
    };

    CheckDigitReport {
        passport_number: check(PASSPORT_NUMBER, PASSPORT_NUMBER_CHECK),
        birth_date: check(BIRTH_DATE, BIRTH_DATE_CHECK),
        expiration_date: check(EXPIRATION_DATE, EXPIRATION_DATE_CHECK),
        personal_number: check(PERSONAL_NUMBER, PERSONAL_NUMBER_CHECK),
        composite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractionStatus;
    use pretty_assertions::assert_eq;

    const SPECIMEN_NAME: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
    const SPECIMEN_CODE: &str = "L898902C36UTO7408122F1204159ZE184226B<<<<<10";

    fn date(y: i32, m: u32, d: u32) -> MrzDate {
        MrzDate(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_specimen_passport() {
        let lines = LineSequence::new(["PASSPORT", SPECIMEN_NAME, SPECIMEN_CODE]);
        let fields = MrzPassportExtractor::new().extract(&lines).unwrap();

        assert_eq!(
            fields,
            PassportMrzFields {
                passport_number: Some("L898902C3".to_string()),
                passport_number_check_digit: Some(6),
                birth_date: Some(date(1974, 8, 12)),
                birth_date_check_digit: Some(2),
                expiration_date: Some(date(2012, 4, 15)),
                expiration_date_check_digit: Some(9),
                personal_number: Some("ZE184226B<".to_string()),
                personal_number_check_digit: Some(1),
                final_check_digit: Some(0),
                name: Some("ANNAMARIAUTOERIKSSON".to_string()),
                check_digits: None,
            }
        );
        assert_eq!(fields.birth_date.unwrap().to_string(), "12 Aug 1974");
        assert_eq!(fields.expiration_date.unwrap().to_string(), "15 Apr 2012");
        assert_eq!(fields.status(), ExtractionStatus::Success);
    }

    #[test]
    fn test_decode_name_strips_country_prefix() {
        let extractor = MrzPassportExtractor::new();

        assert_eq!(
            extractor.decode_name("P<BGDRAHMAN<<MD<ABDUL<<<<<<<<<<<<<<<<<<<<<<<<"),
            Some("MDABDULRAHMAN".to_string())
        );
        assert_eq!(
            extractor.decode_name("P<BGDkarim<<rahim<<<<"),
            Some("RAHIMKARIM".to_string())
        );
        assert_eq!(extractor.decode_name("<<<<<<"), None);
        assert_eq!(extractor.decode_name(""), None);
    }

    #[test]
    fn test_century_pivot() {
        let extractor = MrzPassportExtractor::new();

        assert_eq!(extractor.decode_date("490101"), Some(date(2049, 1, 1)));
        assert_eq!(extractor.decode_date("500101"), Some(date(1950, 1, 1)));
        assert_eq!(extractor.decode_date("020914").unwrap().to_string(), "14 Sep 2002");

        let shifted = MrzPassportExtractor::new().with_century_pivot(30);
        assert_eq!(shifted.decode_date("400101"), Some(date(1940, 1, 1)));
    }

    #[test]
    fn test_invalid_dates() {
        let extractor = MrzPassportExtractor::new();

        assert_eq!(extractor.decode_date("741312"), None);
        assert_eq!(extractor.decode_date("740012"), None);
        assert_eq!(extractor.decode_date("740231"), None);
        assert_eq!(extractor.decode_date("7408"), None);
        assert_eq!(extractor.decode_date("74O812"), None);
    }

    #[test]
    fn test_impossible_birth_day_fails_status() {
        let code = "L898902C36UTO7402312F1204159ZE184226B<<<<<10";
        let fields = MrzPassportExtractor::new()
            .extract(&LineSequence::new([SPECIMEN_NAME, code]))
            .unwrap();

        assert_eq!(fields.birth_date, None);
        assert_eq!(fields.birth_date_check_digit, Some(2));
        assert_eq!(fields.status(), ExtractionStatus::Fail);
    }

    #[test]
    fn test_short_code_line_yields_partial_result() {
        let lines = LineSequence::new(["P<UTOERIKSSON<<ANNA", "L898902C36UTO74081"]);
        let fields = MrzPassportExtractor::new().extract(&lines).unwrap();

        assert_eq!(fields.passport_number.as_deref(), Some("L898902C3"));
        assert_eq!(fields.passport_number_check_digit, Some(6));
        assert_eq!(fields.birth_date, None);
        assert_eq!(fields.expiration_date, None);
        assert_eq!(fields.personal_number, None);
        assert_eq!(fields.final_check_digit, None);
        assert_eq!(fields.status(), ExtractionStatus::Fail);
    }

    #[test]
    fn test_single_line_has_no_name() {
        let lines = LineSequence::new([SPECIMEN_CODE]);
        let fields = MrzPassportExtractor::new().extract(&lines).unwrap();

        assert_eq!(fields.name, None);
        assert_eq!(fields.status(), ExtractionStatus::Success);
    }

    #[test]
    fn test_missing_code_line() {
        let extractor = MrzPassportExtractor::new();

        assert_eq!(
            extractor.extract(&LineSequence::default()),
            Err(ExtractionError::NotFound(Missing::MrzCode))
        );
        assert!(extractor.extract(&LineSequence::new(["P<UTO", ""])).is_err());
    }

    #[test]
    fn test_filler_check_digit_is_none() {
        let fields = MrzPassportExtractor::new()
            .extract(&LineSequence::new(["L898902C3<UTO7408122F1204159ZE184226B<<<<<<<"]))
            .unwrap();

        assert_eq!(fields.passport_number_check_digit, None);
        assert_eq!(fields.personal_number_check_digit, None);
        assert_eq!(fields.final_check_digit, None);
    }

    #[test]
    fn test_compute_check_digit() {
        assert_eq!(compute_check_digit("L898902C3"), Some(6));
        assert_eq!(compute_check_digit("740812"), Some(2));
        assert_eq!(compute_check_digit("120415"), Some(9));
        assert_eq!(compute_check_digit("ZE184226B<<<<<"), Some(1));
        assert_eq!(compute_check_digit("l898"), None);
    }

    #[test]
    fn test_check_digit_report_is_opt_in() {
        let lines = LineSequence::new([SPECIMEN_NAME, SPECIMEN_CODE]);

        let plain = MrzPassportExtractor::new().extract(&lines).unwrap();
        assert_eq!(plain.check_digits, None);

        let checked = MrzPassportExtractor::new()
            .with_check_digit_validation(true)
            .extract(&lines)
            .unwrap();
        assert!(checked.check_digits.unwrap().all_valid());
    }

    #[test]
    fn test_bad_check_digit_keeps_status() {
        let tampered = "L898902C37UTO7408122F1204159ZE184226B<<<<<10";
        let fields = MrzPassportExtractor::new()
            .with_check_digit_validation(true)
            .extract(&LineSequence::new([SPECIMEN_NAME, tampered]))
            .unwrap();

        let report = fields.check_digits.unwrap();
        assert!(!report.passport_number);
        assert!(!report.composite);
        assert!(report.birth_date);
        assert_eq!(fields.status(), ExtractionStatus::Success);
    }
}
