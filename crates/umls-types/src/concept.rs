//! OHDSI Athena concept type.
//!
//! This module provides the `AthenaConcept` struct representing a row of the
//! Athena CONCEPT.csv vocabulary download.

use crate::{AthenaVocabulary, ConceptCode};

/// An OHDSI standard concept from the Athena CONCEPT.csv file.
///
/// Only the columns the lookup layer uses are kept: the canonical OHDSI
/// concept ID, the human-readable name, the owning vocabulary, and the code
/// within that vocabulary.
///
/// # Examples
///
/// ```
/// use umls_types::{AthenaConcept, AthenaVocabulary};
///
/// let concept = AthenaConcept {
///     concept_id: 201826,
///     concept_name: "Type 2 diabetes mellitus".to_string(),
///     vocabulary_id: "SNOMED".to_string(),
///     concept_code: "44054006".to_string(),
/// };
///
/// assert!(concept.is_from(AthenaVocabulary::Snomed));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AthenaConcept {
    /// Canonical OHDSI concept identifier.
    pub concept_id: i64,
    /// Human-readable concept name.
    pub concept_name: String,
    /// Owning vocabulary (VOCABULARY_ID column).
    pub vocabulary_id: String,
    /// The code within the owning vocabulary.
    pub concept_code: ConceptCode,
}

impl AthenaConcept {
    /// Returns true if this concept belongs to the given Athena vocabulary.
    pub fn is_from(&self, vocab: AthenaVocabulary) -> bool {
        self.vocabulary_id == vocab.vocabulary_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_from() {
        let concept = AthenaConcept {
            concept_id: 1127433,
            concept_name: "Acetaminophen 325 MG Oral Tablet".to_string(),
            vocabulary_id: "RxNorm".to_string(),
            concept_code: "313782".to_string(),
        };

        assert!(concept.is_from(AthenaVocabulary::RxNorm));
        assert!(!concept.is_from(AthenaVocabulary::RxNormExtension));
        assert!(!concept.is_from(AthenaVocabulary::Snomed));
    }
}
