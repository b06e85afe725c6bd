//! Birth registration number and date of birth from birth certificates.

use chrono::Datelike;
use tracing::debug;

use super::dates::{strip_ordinal_suffixes, DateFormat, DateNormalizer};
use super::patterns::{BIRTH_REGISTRATION_NUMBER, DOB_NOT_FOUND, DOB_PREFIX, IN_WORD_MARKER};
use super::{DocumentExtractor, Result};
use crate::error::{ExtractionError, Missing};
use crate::models::{BirthRegistrationResult, ExtractionConfig, LineSequence};

/// Extracts the 17-digit registration number and cross-checks the birth year.
pub struct BirthRegistrationExtractor {
    formats: Vec<DateFormat>,
}

impl BirthRegistrationExtractor {
    pub fn new() -> Self {
        Self {
            formats: DateFormat::BIRTH_CERTIFICATE.to_vec(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_formats(config.date_formats.clone())
    }

    /// Replace the ordered list of accepted date formats.
    pub fn with_formats(mut self, formats: Vec<DateFormat>) -> Self {
        self.formats = formats;
        self
    }

    fn find_registration_number(lines: &LineSequence) -> Option<String> {
        lines
            .iter()
            .find_map(|line| BIRTH_REGISTRATION_NUMBER.find(&line.text))
            .map(|m| m.as_str().to_string())
    }

    /// Raw date-of-birth text: the first line mentioning the year prefix,
    /// else the line after "In Word:", else a placeholder.
    fn raw_date_of_birth<'a>(
        lines: &'a LineSequence,
        registration_number: &str,
        year_prefix: &str,
    ) -> &'a str {
        let candidate = lines.iter().find(|line| {
            line.text.contains(year_prefix) && !line.text.contains(registration_number)
        });
        if let Some(line) = candidate {
            debug!("date of birth candidate at line {}", line.index);
            return &line.text;
        }

        let in_words = lines
            .iter()
            .find(|line| line.text.contains(IN_WORD_MARKER))
            .and_then(|line| lines.next_after(line))
            .filter(|line| !line.text.is_empty());
        if let Some(line) = in_words {
            debug!("date of birth taken after '{}' at line {}", IN_WORD_MARKER, line.index);
            return &line.text;
        }

        DOB_NOT_FOUND
    }
}

/// Drop a "Date of Birth:" label and ordinal suffixes.
pub fn clean_date_of_birth(raw: &str) -> String {
    let without_label = DOB_PREFIX.replace(raw, "");
    strip_ordinal_suffixes(&without_label).trim().to_string()
}

impl Default for BirthRegistrationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for BirthRegistrationExtractor {
    type Output = BirthRegistrationResult;

    fn extract(&self, lines: &LineSequence) -> Result<BirthRegistrationResult> {
        let registration_number = Self::find_registration_number(lines)
            .ok_or_else(|| ExtractionError::NotFound(Missing::RegistrationNumber))?;
        let year_prefix = &registration_number[..4];

        let raw = Self::raw_date_of_birth(lines, &registration_number, year_prefix);
        let cleaned = clean_date_of_birth(raw);
        let date_of_birth = DateNormalizer::try_parse(&cleaned, &self.formats)?;

        let year_matches = format!("{:04}", date_of_birth.year()) == year_prefix;
        if !year_matches {
            debug!(
                "birth year {} does not match registration prefix {}",
                date_of_birth.year(),
                year_prefix
            );
        }

        Ok(BirthRegistrationResult {
            registration_number,
            date_of_birth,
            year_matches,
        })
    }
}
