//! Request payloads for the third-party identity-verification API.
//!
//! Only the payloads are built here. Sending them, and reading the API key
//! named in [`VerificationConfig::api_key_env`], is left to the HTTP layer.

use serde::Serialize;

use crate::error::ExtractionError;
use crate::extract::dates::{format_iso, DateFormat, DateNormalizer};
use crate::models::{BirthRegistrationResult, IdentityFields, VerificationConfig};

/// Basic national-ID verification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicNidRequest {
    pub national_id: String,
    /// `YYYY-MM-DD`.
    pub person_dob: String,
    pub person_fullname: String,
}

impl BasicNidRequest {
    /// Card dates are printed as `D Mon YYYY`, e.g. `14 Sep 2002`.
    pub fn from_identity(fields: &IdentityFields) -> Result<Self, ExtractionError> {
        let national_id = required(&fields.id_number, "nid")?;
        let dob = required(&fields.date_of_birth, "dob")?;
        let person_fullname = required(&fields.name, "name")?;

        let date = DateNormalizer::try_parse(dob.trim(), &[DateFormat::DayShortMonthYear])?;

        Ok(Self {
            national_id,
            person_dob: format_iso(date),
            person_fullname,
        })
    }
}

/// Birth-registration autofill request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthAutofillRequest {
    pub birth_registration_number: String,
    pub date_of_birth: String,
}

impl From<&BirthRegistrationResult> for BirthAutofillRequest {
    fn from(result: &BirthRegistrationResult) -> Self {
        Self {
            birth_registration_number: result.registration_number.clone(),
            date_of_birth: result.date_of_birth_iso(),
        }
    }
}

/// A payload together with the endpoint it is posted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VerificationRequest {
    BasicNid(BasicNidRequest),
    BirthAutofill(BirthAutofillRequest),
}

impl VerificationRequest {
    pub fn endpoint(&self, config: &VerificationConfig) -> String {
        let path = match self {
            VerificationRequest::BasicNid(_) => &config.basic_nid_path,
            VerificationRequest::BirthAutofill(_) => &config.birth_autofill_path,
        };
        format!("{}{}", config.base_url.trim_end_matches('/'), path)
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String, ExtractionError> {
    value
        .clone()
        .ok_or_else(|| ExtractionError::MissingField(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn card() -> IdentityFields {
        IdentityFields {
            name: Some("MD. ABDUL KARIM".into()),
            date_of_birth: Some("4 Sep 2002".into()),
            id_number: Some("1234567890".into()),
        }
    }

    #[test]
    fn test_basic_nid_request() {
        let request = BasicNidRequest::from_identity(&card()).unwrap();

        assert_eq!(
            request,
            BasicNidRequest {
                national_id: "1234567890".into(),
                person_dob: "2002-09-04".into(),
                person_fullname: "MD. ABDUL KARIM".into(),
            }
        );
    }

    #[test]
    fn test_basic_nid_request_missing_field() {
        let fields = IdentityFields {
            name: None,
            ..card()
        };
        assert_eq!(
            BasicNidRequest::from_identity(&fields),
            Err(ExtractionError::MissingField("name".into()))
        );
    }

    #[test]
    fn test_basic_nid_request_bad_date() {
        let fields = IdentityFields {
            date_of_birth: Some("04/09/2002".into()),
            ..card()
        };
        assert!(matches!(
            BasicNidRequest::from_identity(&fields),
            Err(ExtractionError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_autofill_request_and_endpoint() {
        let result = BirthRegistrationResult {
            registration_number: "20011234567890123".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 9, 22).unwrap(),
            year_matches: true,
        };
        let request = VerificationRequest::BirthAutofill((&result).into());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "birthRegistrationNumber": "20011234567890123",
                "dateOfBirth": "2001-09-22"
            })
        );
        assert_eq!(
            request.endpoint(&VerificationConfig::default()),
            "https://api.porichoybd.com/api/v1/verifications/autofill"
        );
    }
}
