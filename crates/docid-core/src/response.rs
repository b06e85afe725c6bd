//! JSON envelopes handed back to API clients.
//!
//! Every extractor success answers 200, whatever its internal `status` or
//! `year_matches`. Hard failures map through [`ExtractionError::status_code`].

use serde::Serialize;

use crate::error::ExtractionError;
use crate::extract::ExtractedDocument;
use crate::models::{
    BirthRegistrationResult, ExtractionStatus, IdentityFields, PassportMrzFields,
};

const YEAR_MATCHES: &str = "Date of birth year matches the birth registration number.";
const YEAR_MISMATCH: &str = "Date of birth year does not match the birth registration number.";

/// National ID envelope: `{ "status", "nidData" }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NidResponse {
    pub status: ExtractionStatus,
    pub nid_data: IdentityFields,
}

/// Passport envelope: `{ "status", "passportData" }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportResponse {
    pub status: ExtractionStatus,
    pub passport_data: PassportMrzFields,
}

/// Birth certificate envelope: `{ "success", "message", "data" }`.
#[derive(Debug, Clone, Serialize)]
pub struct BirthRegistrationResponse {
    pub success: bool,
    pub message: String,
    pub data: BirthRegistrationData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRegistrationData {
    pub birth_registration_number: String,
    pub date_of_birth: String,
}

/// Failure envelope: `{ "message" }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status_code: u16,
    pub message: String,
}

impl From<IdentityFields> for NidResponse {
    fn from(fields: IdentityFields) -> Self {
        Self {
            status: fields.status(),
            nid_data: fields,
        }
    }
}

impl From<PassportMrzFields> for PassportResponse {
    fn from(fields: PassportMrzFields) -> Self {
        Self {
            status: fields.status(),
            passport_data: fields,
        }
    }
}

impl From<BirthRegistrationResult> for BirthRegistrationResponse {
    fn from(result: BirthRegistrationResult) -> Self {
        let message = if result.year_matches {
            YEAR_MATCHES
        } else {
            YEAR_MISMATCH
        };

        Self {
            success: result.year_matches,
            message: message.to_string(),
            data: BirthRegistrationData {
                date_of_birth: result.date_of_birth_iso(),
                birth_registration_number: result.registration_number,
            },
        }
    }
}

impl From<&ExtractionError> for ErrorResponse {
    fn from(err: &ExtractionError) -> Self {
        let message = match err {
            ExtractionError::NotFound(missing) => missing.message().to_string(),
            ExtractionError::InvalidDate { .. } => "Invalid date format".to_string(),
            ExtractionError::MissingField(_) => err.to_string(),
        };

        Self {
            status_code: err.status_code(),
            message,
        }
    }
}

/// Any envelope the extraction endpoints can answer with.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExtractionResponse {
    Nid(NidResponse),
    BirthRegistration(BirthRegistrationResponse),
    Passport(PassportResponse),
    Error(ErrorResponse),
}

impl ExtractionResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            ExtractionResponse::Error(err) => err.status_code,
            _ => 200,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExtractionResponse::Error(_))
    }
}

impl From<ExtractedDocument> for ExtractionResponse {
    fn from(document: ExtractedDocument) -> Self {
        match document {
            ExtractedDocument::NationalId(fields) => ExtractionResponse::Nid(fields.into()),
            ExtractedDocument::BirthRegistration(result) => {
                ExtractionResponse::BirthRegistration(result.into())
            }
            ExtractedDocument::Passport(fields) => ExtractionResponse::Passport(fields.into()),
        }
    }
}

impl From<Result<ExtractedDocument, ExtractionError>> for ExtractionResponse {
    fn from(result: Result<ExtractedDocument, ExtractionError>) -> Self {
        match result {
            Ok(document) => document.into(),
            Err(err) => ExtractionResponse::Error((&err).into()),
        }
    }
}
