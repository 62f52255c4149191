//! # umls-types
//!
//! Type definitions for working with UMLS Metathesaurus and SNOMED CT
//! vocabulary data.
//!
//! This crate provides the plain data types shared by the lookup layer:
//! concept codes, MRCONSO mapping rows, OHDSI Athena concept rows, SNOMED CT
//! relationship rows, and the vocabulary-scope enumerations used to select a
//! source terminology.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use umls_types::{ConceptMapping, IsaEdge, SourceVocabulary};
//! use umls_types::well_known;
//!
//! let mapping = ConceptMapping {
//!     cui: "C0011849".to_string(),
//!     language: "ENG".to_string(),
//!     source: "SNOMEDCT_US".to_string(),
//!     code: "73211009".to_string(),
//!     term: "Diabetes mellitus".to_string(),
//! };
//!
//! assert!(mapping.is_english());
//! assert!(mapping.is_from(SourceVocabulary::SnomedCtUs));
//!
//! let edge = IsaEdge::new("404684003", "25064002");
//! assert_eq!(edge.parent, well_known::CLINICAL_FINDING);
//! ```
//!
//! ## Without Serde
//!
//! To use this crate without serde (zero dependencies):
//!
//! ```toml
//! [dependencies]
//! umls-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod code;
mod concept;
mod mapping;
mod relationship;
mod vocabulary;
pub mod well_known;

// Re-export all public types at crate root
pub use code::{ConceptCode, Cui};
pub use concept::AthenaConcept;
pub use mapping::ConceptMapping;
pub use relationship::{IsaEdge, SnomedRelationship};
pub use vocabulary::{AthenaVocabulary, SourceVocabulary};
