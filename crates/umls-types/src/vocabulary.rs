//! Vocabulary-scope enumerations.
//!
//! Point lookups accept a vocabulary parameter selecting which source
//! terminology a code belongs to. UMLS keys sources by SAB (source
//! abbreviation); OHDSI Athena keys them by VOCABULARY_ID, which uses
//! mixed-case display names for some vocabularies.

/// A UMLS source vocabulary, identified by its SAB value in MRCONSO.
///
/// # Examples
///
/// ```
/// use umls_types::SourceVocabulary;
///
/// assert_eq!(SourceVocabulary::SnomedCtUs.sab(), "SNOMEDCT_US");
/// assert_eq!(SourceVocabulary::from_sab("RXNORM"), Some(SourceVocabulary::RxNorm));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceVocabulary {
    /// SNOMED Clinical Terms - United States edition.
    SnomedCtUs,
    /// American Medical Association - Current Procedural Terminology.
    Cpt,
    /// International Classification of Diseases, Ninth Revision, Clinical Modification.
    Icd9Cm,
    /// International Classification of Diseases, Tenth Revision, Clinical Modification.
    Icd10Cm,
    /// Medical Dictionary for Regulatory Activities.
    Mdr,
    /// RxNorm normalized drug nomenclature.
    RxNorm,
}

impl SourceVocabulary {
    /// Returns the SAB value used for this vocabulary in MRCONSO rows.
    pub fn sab(self) -> &'static str {
        match self {
            Self::SnomedCtUs => "SNOMEDCT_US",
            Self::Cpt => "CPT",
            Self::Icd9Cm => "ICD9CM",
            Self::Icd10Cm => "ICD10CM",
            Self::Mdr => "MDR",
            Self::RxNorm => "RXNORM",
        }
    }

    /// Creates a SourceVocabulary from a SAB value.
    ///
    /// Returns `None` if the SAB doesn't match a supported vocabulary.
    pub fn from_sab(sab: &str) -> Option<Self> {
        match sab {
            "SNOMEDCT_US" => Some(Self::SnomedCtUs),
            "CPT" => Some(Self::Cpt),
            "ICD9CM" => Some(Self::Icd9Cm),
            "ICD10CM" => Some(Self::Icd10Cm),
            "MDR" => Some(Self::Mdr),
            "RXNORM" => Some(Self::RxNorm),
            _ => None,
        }
    }
}

/// An OHDSI Athena source vocabulary, identified by its VOCABULARY_ID.
///
/// Athena uses display names rather than SABs, so `RxNorm` and
/// `RxNorm Extension` appear with mixed case in CONCEPT.csv.
///
/// # Examples
///
/// ```
/// use umls_types::AthenaVocabulary;
///
/// assert_eq!(AthenaVocabulary::RxNorm.vocabulary_id(), "RxNorm");
/// assert_eq!(AthenaVocabulary::Snomed.vocabulary_id(), "SNOMED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AthenaVocabulary {
    /// Current Procedural Terminology - Version 4.
    Cpt4,
    /// International Classification of Diseases, 10th Revision.
    Icd10,
    /// International Classification of Diseases, 10th Revision, Clinical Modification.
    Icd10Cm,
    /// International Classification of Diseases, 10th Revision, Procedure Coding System.
    Icd10Pcs,
    /// International Classification of Diseases, 9th Revision, Clinical Modification.
    Icd9Cm,
    /// International Classification of Diseases, 9th Revision, Vol. 3 - Procedure Codes.
    Icd9Proc,
    /// RxNorm.
    RxNorm,
    /// RxNorm Extension.
    RxNormExtension,
    /// Healthcare Common Procedure Coding System.
    Hcpcs,
    /// Systematized Nomenclature of Medicine - Clinical Terms.
    Snomed,
}

impl AthenaVocabulary {
    /// Returns the VOCABULARY_ID value used for this vocabulary in CONCEPT.csv.
    pub fn vocabulary_id(self) -> &'static str {
        match self {
            Self::Cpt4 => "CPT4",
            Self::Icd10 => "ICD10",
            Self::Icd10Cm => "ICD10CM",
            Self::Icd10Pcs => "ICD10PCS",
            Self::Icd9Cm => "ICD9CM",
            Self::Icd9Proc => "ICD9Proc",
            Self::RxNorm => "RxNorm",
            Self::RxNormExtension => "RxNorm Extension",
            Self::Hcpcs => "HCPCS",
            Self::Snomed => "SNOMED",
        }
    }

    /// Creates an AthenaVocabulary from a VOCABULARY_ID value.
    ///
    /// Returns `None` if the ID doesn't match a supported vocabulary.
    pub fn from_vocabulary_id(id: &str) -> Option<Self> {
        match id {
            "CPT4" => Some(Self::Cpt4),
            "ICD10" => Some(Self::Icd10),
            "ICD10CM" => Some(Self::Icd10Cm),
            "ICD10PCS" => Some(Self::Icd10Pcs),
            "ICD9CM" => Some(Self::Icd9Cm),
            "ICD9Proc" => Some(Self::Icd9Proc),
            "RxNorm" => Some(Self::RxNorm),
            "RxNorm Extension" => Some(Self::RxNormExtension),
            "HCPCS" => Some(Self::Hcpcs),
            "SNOMED" => Some(Self::Snomed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sab_roundtrip() {
        for vocab in [
            SourceVocabulary::SnomedCtUs,
            SourceVocabulary::Cpt,
            SourceVocabulary::Icd9Cm,
            SourceVocabulary::Icd10Cm,
            SourceVocabulary::Mdr,
            SourceVocabulary::RxNorm,
        ] {
            assert_eq!(SourceVocabulary::from_sab(vocab.sab()), Some(vocab));
        }
        assert_eq!(SourceVocabulary::from_sab("NOT_A_SAB"), None);
    }

    #[test]
    fn test_athena_display_names() {
        assert_eq!(AthenaVocabulary::RxNormExtension.vocabulary_id(), "RxNorm Extension");
        assert_eq!(
            AthenaVocabulary::from_vocabulary_id("RxNorm Extension"),
            Some(AthenaVocabulary::RxNormExtension)
        );
        assert_eq!(AthenaVocabulary::from_vocabulary_id("rxnorm"), None);
    }
}
