//! SNOMED CT relationship and is-a edge types.
//!
//! `SnomedRelationship` mirrors a row of the RF2 relationship snapshot file;
//! `IsaEdge` is the reduced form the hierarchy index consumes, keeping only
//! the parent and child codes of an is-a relationship.

use crate::{well_known, ConceptCode};

/// A SNOMED CT relationship from an RF2 relationship snapshot file.
///
/// Represents a row from `sct2_Relationship_*.txt`. The source concept is
/// the subject (child for is-a rows) and the destination is the object
/// (parent for is-a rows).
///
/// # Examples
///
/// ```
/// use umls_types::SnomedRelationship;
///
/// let relationship = SnomedRelationship {
///     id: "100000028".to_string(),
///     active: true,
///     source_id: "73211009".to_string(),       // Diabetes mellitus
///     destination_id: "362969004".to_string(), // Disorder of endocrine system
///     type_id: "116680003".to_string(),        // IS_A
/// };
///
/// assert!(relationship.is_is_a());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnomedRelationship {
    /// Unique identifier for this relationship.
    pub id: ConceptCode,
    /// Whether this relationship is active.
    pub active: bool,
    /// Source concept (subject; the child in is-a rows).
    pub source_id: ConceptCode,
    /// Destination concept (object; the parent in is-a rows).
    pub destination_id: ConceptCode,
    /// Relationship type (e.g. IS_A, Finding site).
    pub type_id: ConceptCode,
}

impl SnomedRelationship {
    /// Returns true if this is an IS_A (subtype) relationship.
    ///
    /// IS_A relationships define the taxonomy/hierarchy of SNOMED CT.
    pub fn is_is_a(&self) -> bool {
        self.type_id == well_known::IS_A
    }

    /// Converts an is-a relationship into its hierarchy edge.
    ///
    /// Returns `None` for non-is-a relationship types.
    pub fn to_isa_edge(&self) -> Option<IsaEdge> {
        if self.is_is_a() {
            Some(IsaEdge {
                parent: self.destination_id.clone(),
                child: self.source_id.clone(),
            })
        } else {
            None
        }
    }
}

/// A single is-a edge of the concept hierarchy.
///
/// Meaning: `child` is a direct specialization of `parent`. The edge set of
/// a vocabulary is expected to form a directed acyclic graph; a concept may
/// have more than one parent (multiple inheritance).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsaEdge {
    /// The more general concept.
    pub parent: ConceptCode,
    /// The direct specialization of `parent`.
    pub child: ConceptCode,
}

impl IsaEdge {
    /// Creates a new edge from parent and child codes.
    pub fn new(parent: impl Into<ConceptCode>, child: impl Into<ConceptCode>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}
