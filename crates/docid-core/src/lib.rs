//! Core library for identity document OCR processing.
//!
//! This crate provides:
//! - An ordered line model for OCR output (plain text or raw detection blocks)
//! - National ID field extraction (name, date of birth, ID number)
//! - Birth certificate extraction with registration-number/birth-year cross-check
//! - TD3 passport MRZ decoding, with optional check-digit verification
//! - Response envelopes and verification API payloads
//!
//! Extraction is pure and synchronous; the OCR call itself happens elsewhere.

pub mod error;
pub mod extract;
pub mod models;
pub mod response;
pub mod verification;

pub use error::{DateParseError, DocidError, ExtractionError, Missing, Result};
pub use extract::{
    extract_document, BirthRegistrationExtractor, DateFormat, DateNormalizer, DocumentExtractor,
    DocumentKind, ExtractedDocument, IdentityFieldExtractor, MrzPassportExtractor,
};
pub use models::{
    BirthRegistrationResult, DocidConfig, ExtractionStatus, IdentityFields, Line, LineSequence,
    OcrDocument, PassportMrzFields,
};
pub use response::ExtractionResponse;
pub use verification::{BasicNidRequest, BirthAutofillRequest, VerificationRequest};
