//! Configuration structures for extraction and the verification collaborator.

use serde::{Deserialize, Serialize};

use crate::error::DocidError;
use crate::extract::dates::DateFormat;

/// Main configuration for docid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocidConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Identity-verification API configuration.
    pub verification: VerificationConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Date formats tried, in order, on birth-certificate dates.
    pub date_formats: Vec<DateFormat>,

    /// Country code stripped from the front of the MRZ surname.
    pub mrz_country_prefix: String,

    /// Two-digit MRZ years at or above this value belong to the 1900s.
    pub mrz_century_pivot: u32,

    /// Attach a check-digit report to decoded passports.
    pub validate_mrz_check_digits: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_formats: DateFormat::BIRTH_CERTIFICATE.to_vec(),
            mrz_country_prefix: "BGD".to_string(),
            mrz_century_pivot: 50,
            validate_mrz_check_digits: false,
        }
    }
}

/// Identity-verification API configuration.
///
/// Handed to the HTTP collaborator only; extractors never see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Base URL of the verification API.
    pub base_url: String,

    /// Path of the basic national-ID verification endpoint.
    pub basic_nid_path: String,

    /// Path of the birth-registration autofill endpoint.
    pub birth_autofill_path: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.porichoybd.com".to_string(),
            basic_nid_path: "/api/v2/verifications/basic-nid".to_string(),
            birth_autofill_path: "/api/v1/verifications/autofill".to_string(),
            api_key_env: "PORICHOY_API_KEY".to_string(),
        }
    }
}

impl DocidConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, DocidError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), DocidError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), DocidError> {
        if self.extraction.date_formats.is_empty() {
            return Err(DocidError::Config(
                "extraction.date_formats must not be empty".to_string(),
            ));
        }
        if self.extraction.mrz_century_pivot > 99 {
            return Err(DocidError::Config(format!(
                "extraction.mrz_century_pivot must be within 0..=99, got {}",
                self.extraction.mrz_century_pivot
            )));
        }
        Ok(())
    }
}
