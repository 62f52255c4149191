//! Error and configuration types for vocabulary file processing.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during vocabulary loading and hierarchy queries.
#[derive(Error, Debug)]
pub enum LookupError {
    /// I/O error reading a vocabulary file.
    #[error("IO error reading vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Record has fewer fields than the format requires.
    #[error("Record in {file_type} file is missing field {index}")]
    MissingField {
        /// The file format the record came from.
        file_type: &'static str,
        /// The zero-based index of the missing field.
        index: usize,
    },

    /// Invalid OHDSI concept ID.
    #[error("Invalid concept ID: {value}")]
    InvalidConceptId {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Invalid boolean value.
    #[error("Invalid boolean value: {value} (expected 0 or 1)")]
    InvalidBoolean {
        /// The invalid boolean value.
        value: String,
    },

    /// Invalid header - column count mismatch.
    #[error("Invalid header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },

    /// The hierarchy index could not be built.
    ///
    /// This state is permanent for the lifetime of the owning service: no
    /// retry is attempted, and every current and future caller receives this
    /// variant. The embedding application decides whether to terminate.
    #[error("Hierarchy initialization failed: {message}")]
    InitializationFailed {
        /// Description of the original build failure.
        message: String,
    },

    /// The hierarchy index did not finish building within the wait bound.
    ///
    /// Distinct from [`LookupError::InitializationFailed`]: the build may
    /// still be in progress (or its thread may have died); this caller
    /// merely gave up waiting.
    #[error("Hierarchy initialization did not complete within {0:?}")]
    InitTimeout(Duration),
}

/// Result type for vocabulary operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Configuration for MRCONSO mapping parsing.
#[derive(Debug, Clone)]
pub struct MappingConfig {
    /// Language abbreviations to include (empty = all languages).
    pub languages: Vec<String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            languages: vec!["ENG".to_string()],
        }
    }
}

impl MappingConfig {
    /// Creates a config that keeps every language.
    pub fn all_languages() -> Self {
        Self { languages: vec![] }
    }
}

/// Configuration for relationship parsing.
#[derive(Debug, Clone)]
pub struct RelationshipConfig {
    /// Whether to filter to active rows only.
    pub active_only: bool,
    /// Relationship type IDs to include (empty = all types).
    pub type_ids: Vec<String>,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            active_only: true,
            type_ids: vec![],
        }
    }
}

impl RelationshipConfig {
    /// Creates a config for active IS_A relationships only.
    ///
    /// This is the edge set the hierarchy index is built from.
    pub fn is_a_only() -> Self {
        Self {
            active_only: true,
            type_ids: vec![umls_types::well_known::IS_A.to_string()],
        }
    }
}

/// Discovered vocabulary files in a data directory.
///
/// The expected layout matches the original distribution folders:
/// `UMLS/MRCONSO.RRF`, `OHDSI/CONCEPT.csv`, and a SNOMED CT release under
/// `SNOMEDCT_US/` containing a relationship snapshot file.
#[derive(Debug, Clone, Default)]
pub struct VocabFiles {
    /// Path to the MRCONSO.RRF concept mappings file.
    pub mrconso_file: Option<PathBuf>,
    /// Path to the Athena CONCEPT.csv file.
    pub athena_concept_file: Option<PathBuf>,
    /// Path to the SNOMED CT relationship snapshot file.
    pub snomed_relationship_file: Option<PathBuf>,
}

impl VocabFiles {
    /// Creates a new empty VocabFiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every vocabulary file was found.
    pub fn is_complete(&self) -> bool {
        self.mrconso_file.is_some()
            && self.athena_concept_file.is_some()
            && self.snomed_relationship_file.is_some()
    }

    /// Returns a list of missing vocabulary files.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.mrconso_file.is_none() {
            missing.push("MRCONSO.RRF");
        }
        if self.athena_concept_file.is_none() {
            missing.push("CONCEPT.csv");
        }
        if self.snomed_relationship_file.is_none() {
            missing.push("SNOMED relationship snapshot");
        }
        missing
    }
}
