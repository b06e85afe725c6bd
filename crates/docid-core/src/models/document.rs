//! Structured results produced by the document extractors.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Overall outcome of a best-effort extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Success,
    Fail,
}

impl ExtractionStatus {
    pub fn from_success(success: bool) -> Self {
        if success { Self::Success } else { Self::Fail }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

/// Fields read from a national-ID style card.
///
/// Any subset may be present; the fields are not cross-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    pub name: Option<String>,

    /// Date of birth exactly as printed, label removed.
    #[serde(rename = "dob")]
    pub date_of_birth: Option<String>,

    /// Digits of the last line that contained any digit.
    #[serde(rename = "nid")]
    pub id_number: Option<String>,
}

impl IdentityFields {
    /// `success` as soon as one field was found.
    pub fn status(&self) -> ExtractionStatus {
        ExtractionStatus::from_success(
            self.name.is_some() || self.date_of_birth.is_some() || self.id_number.is_some(),
        )
    }
}

/// Registration number and date of birth read from a birth certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRegistrationResult {
    /// Always 17 ASCII digits.
    pub registration_number: String,

    /// Serialized as `YYYY-MM-DD`.
    pub date_of_birth: NaiveDate,

    /// First four digits of the registration number equal the birth year.
    pub year_matches: bool,
}

impl BirthRegistrationResult {
    /// Candidate birth year encoded in the registration number.
    pub fn year_prefix(&self) -> &str {
        self.registration_number
            .get(..4)
            .unwrap_or(&self.registration_number)
    }

    pub fn date_of_birth_iso(&self) -> String {
        self.date_of_birth.format("%Y-%m-%d").to_string()
    }
}

/// A date decoded from an MRZ `YYMMDD` field, shown as `D Mon YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MrzDate(pub NaiveDate);

impl MrzDate {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for MrzDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%-d %b %Y"))
    }
}

impl Serialize for MrzDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MrzDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, "%d %b %Y")
            .map(MrzDate)
            .map_err(serde::de::Error::custom)
    }
}

/// Passport data decoded from a TD3 machine-readable zone.
///
/// Check digits are carried as data. They are only verified when a
/// [`CheckDigitReport`] was requested, and even then never affect `status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportMrzFields {
    pub passport_number: Option<String>,
    pub passport_number_check_digit: Option<u8>,
    pub birth_date: Option<MrzDate>,
    pub birth_date_check_digit: Option<u8>,
    pub expiration_date: Option<MrzDate>,
    pub expiration_date_check_digit: Option<u8>,
    /// First 10 characters of the optional-data field.
    pub personal_number: Option<String>,
    pub personal_number_check_digit: Option<u8>,
    pub final_check_digit: Option<u8>,
    /// Given names followed by surname, upper-cased, without separators.
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_digits: Option<CheckDigitReport>,
}

impl PassportMrzFields {
    /// `success` when the four data fields decoded. The name does not count.
    pub fn status(&self) -> ExtractionStatus {
        ExtractionStatus::from_success(
            self.passport_number.is_some()
                && self.birth_date.is_some()
                && self.expiration_date.is_some()
                && self.personal_number.is_some(),
        )
    }
}

/// Outcome of recomputing each MRZ check digit from the field it covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDigitReport {
    pub passport_number: bool,
    pub birth_date: bool,
    pub expiration_date: bool,
    pub personal_number: bool,
    pub composite: bool,
}

impl CheckDigitReport {
    pub fn all_valid(&self) -> bool {
        self.passport_number
            && self.birth_date
            && self.expiration_date
            && self.personal_number
            && self.composite
    }
}
