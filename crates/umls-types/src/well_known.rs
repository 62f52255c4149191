//! Well-known SNOMED CT concept codes.
//!
//! This module provides constants for commonly used SNOMED CT identifiers,
//! including the root concept, top-level hierarchies, and the is-a
//! relationship type used to build the hierarchy index.
//!
//! # Examples
//!
//! ```
//! use umls_types::well_known;
//!
//! // Check if a relationship type is IS_A
//! let type_id = "116680003";
//! assert_eq!(type_id, well_known::IS_A);
//! ```

/// IS_A relationship type - 116680003.
///
/// Defines the taxonomic (hierarchical) relationships between concepts.
/// Only relationships of this type contribute edges to the hierarchy index.
pub const IS_A: &str = "116680003";

/// SNOMED CT root concept (138875005).
///
/// The single root of the entire SNOMED CT hierarchy.
pub const SNOMED_CT_ROOT: &str = "138875005";

/// Clinical finding (finding) - 404684003.
///
/// Represents disorders, diseases, symptoms, signs, and other clinical observations.
pub const CLINICAL_FINDING: &str = "404684003";

/// Procedure (procedure) - 71388002.
///
/// Represents medical procedures, interventions, and activities.
pub const PROCEDURE: &str = "71388002";

/// Body structure (body structure) - 123037004.
///
/// Represents anatomical structures and body parts.
pub const BODY_STRUCTURE: &str = "123037004";

/// Pharmaceutical/biologic product - 373873005.
///
/// Represents medications and biological products.
pub const PHARMACEUTICAL_PRODUCT: &str = "373873005";
