//! Common regex patterns for identity document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Inline anchor labels, stripped once along with trailing colon/whitespace
    pub static ref NAME_LABEL: Regex = Regex::new(r"(?i)Name[:\s]*").unwrap();

    pub static ref DOB_LABEL: Regex = Regex::new(r"(?i)Date of Birth[:\s]*").unwrap();

    // Birth certificate. ASCII word boundaries, so a Bengali label glued to
    // the digits still leaves a boundary.
    pub static ref BIRTH_REGISTRATION_NUMBER: Regex =
        Regex::new(r"(?-u:\b)[0-9]{17}(?-u:\b)").unwrap();

    pub static ref DOB_PREFIX: Regex = Regex::new(r"(?i)Date of Birth:\s*").unwrap();

    pub static ref ORDINAL_SUFFIX: Regex =
        Regex::new(r"(?i)(?-u:\b)([0-9]+)(st|nd|rd|th)(?-u:\b)").unwrap();

    // Strict date shapes; month names are checked separately
    pub static ref DATE_DD_MM_YYYY: Regex = Regex::new(r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$").unwrap();

    pub static ref DATE_D_MMM_COMMA_YYYY: Regex =
        Regex::new(r"^([0-9]{1,2}) ([A-Za-z]+), ([0-9]{4})$").unwrap();

    pub static ref DATE_DD_MMMM_YYYY: Regex = Regex::new(r"^([0-9]{2}) ([A-Za-z]+) ([0-9]{4})$").unwrap();

    pub static ref DATE_D_MMM_YYYY: Regex = Regex::new(r"^([0-9]{1,2}) ([A-Za-z]+) ([0-9]{4})$").unwrap();

    pub static ref DATE_YYYY_MM_DD: Regex = Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap();

    // Passport MRZ name line
    pub static ref MRZ_DOCUMENT_MARKER: Regex = Regex::new(r"^P<").unwrap();
}

/// Marker line preceding a spelled-out date of birth on birth certificates.
pub const IN_WORD_MARKER: &str = "In Word:";

/// Substituted when no date-of-birth text could be located.
pub const DOB_NOT_FOUND: &str = "DOB not found";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_number_needs_word_boundary() {
        assert!(BIRTH_REGISTRATION_NUMBER.is_match("Reg No: 20011234567890123"));
        assert!(!BIRTH_REGISTRATION_NUMBER.is_match("200112345678901234"));
        assert!(!BIRTH_REGISTRATION_NUMBER.is_match("2001123456789012"));
    }

    #[test]
    fn test_registration_number_after_bengali_label() {
        let found = BIRTH_REGISTRATION_NUMBER.find("নিবন্ধন নং20011234567890123").unwrap();
        assert_eq!(found.as_str(), "20011234567890123");
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ORDINAL_SUFFIX.replace_all("1st Jan 2000", "${1}"), "1 Jan 2000");
        assert_eq!(ORDINAL_SUFFIX.replace_all("22ND March", "${1}"), "22 March");
        assert_eq!(ORDINAL_SUFFIX.replace_all("1stly", "${1}"), "1stly");
        assert_eq!(ORDINAL_SUFFIX.replace_all("জন্ম3rd Mar", "${1}"), "জন্ম3 Mar");
    }
}
