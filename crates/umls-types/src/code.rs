//! Vocabulary identifier types.
//!
//! Concept codes are opaque strings: no numeric structure is assumed, since
//! the same lookup layer handles SNOMED CT SCTIDs, CPT codes, ICD codes and
//! UMLS concept unique identifiers alike.

/// A concept code within a source vocabulary.
///
/// Codes are opaque, immutable string identifiers. Equality is purely
/// string-level; it carries no claim that the code exists in any loaded
/// vocabulary.
///
/// # Examples
///
/// ```
/// use umls_types::ConceptCode;
///
/// let diabetes: ConceptCode = "73211009".to_string(); // SNOMED CT SCTID
/// let cpt_code: ConceptCode = "99213".to_string();    // CPT
/// ```
pub type ConceptCode = String;

/// A UMLS Concept Unique Identifier (CUI).
///
/// CUIs have the form `C` followed by seven digits (e.g. `C0011849`) and
/// identify a concept across all source vocabularies in the Metathesaurus.
pub type Cui = String;
