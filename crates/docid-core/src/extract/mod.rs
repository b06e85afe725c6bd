//! Identity document field extraction module.

pub mod anchor;
pub mod birth;
pub mod dates;
pub mod identity;
pub mod mrz;
pub mod patterns;

pub use anchor::{Anchor, Placement};
pub use birth::BirthRegistrationExtractor;
pub use dates::{DateFormat, DateNormalizer};
pub use identity::IdentityFieldExtractor;
pub use mrz::MrzPassportExtractor;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::{
    BirthRegistrationResult, ExtractionConfig, IdentityFields, LineSequence, PassportMrzFields,
};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for document extractors.
///
/// Implementations are pure: the same lines always give the same result.
pub trait DocumentExtractor {
    /// The structured value this extractor produces.
    type Output;

    /// Extract fields from the recognized lines of one document.
    fn extract(&self, lines: &LineSequence) -> Result<Self::Output>;
}

/// Supported document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// National ID card.
    NationalId,
    /// Birth registration certificate.
    BirthRegistration,
    /// Passport data page with a TD3 MRZ.
    Passport,
}

/// Output of whichever extractor matched the document kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedDocument {
    NationalId(IdentityFields),
    BirthRegistration(BirthRegistrationResult),
    Passport(PassportMrzFields),
}

impl ExtractedDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            ExtractedDocument::NationalId(_) => DocumentKind::NationalId,
            ExtractedDocument::BirthRegistration(_) => DocumentKind::BirthRegistration,
            ExtractedDocument::Passport(_) => DocumentKind::Passport,
        }
    }
}

/// Run the extractor matching `kind`, configured from `config`.
pub fn extract_document(
    kind: DocumentKind,
    lines: &LineSequence,
    config: &ExtractionConfig,
) -> Result<ExtractedDocument> {
    debug!("Extracting {:?} from {} lines", kind, lines.len());

    match kind {
        DocumentKind::NationalId => IdentityFieldExtractor::new()
            .extract(lines)
            .map(ExtractedDocument::NationalId),
        DocumentKind::BirthRegistration => BirthRegistrationExtractor::from_config(config)
            .extract(lines)
            .map(ExtractedDocument::BirthRegistration),
        DocumentKind::Passport => MrzPassportExtractor::from_config(config)
            .extract(lines)
            .map(ExtractedDocument::Passport),
    }
}
