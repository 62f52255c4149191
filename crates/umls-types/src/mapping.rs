//! UMLS concept mapping type.
//!
//! This module provides the `ConceptMapping` struct representing one row of
//! the MRCONSO.RRF concept names and sources file.

use crate::{ConceptCode, Cui, SourceVocabulary};

/// A UMLS concept mapping from the MRCONSO.RRF file.
///
/// Each row links a UMLS CUI to one code (and one atom string) in a source
/// vocabulary. Only the fields the lookup layer needs are kept: CUI, LAT,
/// SAB, CODE and STR.
///
/// # Examples
///
/// ```
/// use umls_types::{ConceptMapping, SourceVocabulary};
///
/// let mapping = ConceptMapping {
///     cui: "C0011849".to_string(),
///     language: "ENG".to_string(),
///     source: "SNOMEDCT_US".to_string(),
///     code: "73211009".to_string(),
///     term: "Diabetes mellitus".to_string(),
/// };
///
/// assert!(mapping.is_english());
/// assert!(mapping.is_from(SourceVocabulary::SnomedCtUs));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptMapping {
    /// UMLS Concept Unique Identifier.
    pub cui: Cui,
    /// Language of the term (three-letter abbreviation, e.g. `ENG`).
    pub language: String,
    /// Source vocabulary abbreviation (SAB), e.g. `SNOMEDCT_US`.
    pub source: String,
    /// The code within the source vocabulary.
    pub code: ConceptCode,
    /// The term string for this atom.
    pub term: String,
}

impl ConceptMapping {
    /// Language abbreviation for English atoms.
    pub const ENGLISH: &'static str = "ENG";

    /// Returns true if this mapping's term is in English.
    pub fn is_english(&self) -> bool {
        self.language == Self::ENGLISH
    }

    /// Returns true if this mapping belongs to the given source vocabulary.
    pub fn is_from(&self, vocab: SourceVocabulary) -> bool {
        self.source == vocab.sab()
    }
}
