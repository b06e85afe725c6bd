//! Name, date of birth and ID number from national-ID style cards.

use tracing::debug;

use super::anchor::Anchor;
use super::patterns::{DOB_LABEL, NAME_LABEL};
use super::{DocumentExtractor, Result};
use crate::models::{IdentityFields, LineSequence};

/// Anchor/value heuristic extractor for national ID cards.
pub struct IdentityFieldExtractor {
    name: Anchor,
    date_of_birth: Anchor,
}

impl IdentityFieldExtractor {
    pub fn new() -> Self {
        Self {
            name: Anchor::new("Name", &NAME_LABEL),
            date_of_birth: Anchor::new("Date of Birth", &DOB_LABEL),
        }
    }

    /// Single forward pass. Every rule is checked on every line, and a later
    /// match overwrites an earlier one.
    pub fn extract_fields(&self, lines: &LineSequence) -> IdentityFields {
        let mut fields = IdentityFields::default();

        for line in lines {
            if let Some(name) = self.name.value(lines, line) {
                debug!("name anchor at line {}", line.index);
                fields.name = Some(name);
            }

            if let Some(dob) = self.date_of_birth.value(lines, line) {
                debug!("date of birth anchor at line {}", line.index);
                fields.date_of_birth = Some(dob);
            }

            // Last line with any digit wins, even if it is not an ID number.
            if line.text.chars().any(|c| c.is_ascii_digit()) {
                fields.id_number = Some(line.text.chars().filter(|c| c.is_ascii_digit()).collect());
            }
        }

        debug!("identity extraction finished with status {}", fields.status());
        fields
    }
}

impl Default for IdentityFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for IdentityFieldExtractor {
    type Output = IdentityFields;

    fn extract(&self, lines: &LineSequence) -> Result<IdentityFields> {
        Ok(self.extract_fields(lines))
    }
}
