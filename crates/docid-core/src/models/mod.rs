//! Data models: OCR lines, extraction results, configuration.

pub mod config;
pub mod document;
pub mod line;

pub use config::{DocidConfig, ExtractionConfig, VerificationConfig};
pub use document::{
    BirthRegistrationResult, CheckDigitReport, ExtractionStatus, IdentityFields, MrzDate,
    PassportMrzFields,
};
pub use line::{Line, LineSequence, OcrBlock, OcrDocument};
