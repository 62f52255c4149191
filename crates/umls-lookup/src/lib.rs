//! # umls-lookup
//!
//! In-memory lookup services over UMLS, OHDSI Athena, and SNOMED CT
//! vocabulary files.
//!
//! The crate loads three kinds of source files into queryable stores:
//!
//! - `MRCONSO.RRF` (UMLS concordance) into a [`MappingStore`] for
//!   CUI-to-code, code-to-CUI, and code-to-text lookups
//! - `CONCEPT.csv` (OHDSI Athena export) into an [`AthenaStore`] for
//!   resolving standard concept identifiers by code or name
//! - `sct2_Relationship_Snapshot` (SNOMED CT RF2) into a
//!   [`HierarchyIndex`] answering is-a subsumption queries
//!
//! The hierarchy index is expensive to build, so [`SnomedHierarchy`]
//! defers it to the first query and guarantees exactly one build no
//! matter how many threads race to it. [`VocabService`] ties all three
//! stores together behind one handle.
//!
//! ## Example
//!
//! ```no_run
//! use umls_lookup::{discover_vocab_files, VocabService};
//! use umls_types::SourceVocabulary;
//!
//! # fn main() -> umls_lookup::LookupResult<()> {
//! let files = discover_vocab_files("/data/vocab")?;
//! let service = VocabService::from_files(&files)?;
//!
//! let codes = service.source_codes_for_cui(SourceVocabulary::SnomedCtUs, "C0011849");
//! let related = service.is_descendant_of("44054006", "73211009")?;
//! # let _ = (codes, related);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod athena;
mod gate;
mod hierarchy;
mod loader;
mod mapping;
mod parser;
mod relationship;
mod service;
mod types;

pub use athena::AthenaStore;
pub use gate::InitGate;
pub use hierarchy::{ClosureBuilder, HierarchyIndex};
pub use loader::{count_lines, discover_vocab_files};
pub use mapping::{MappingFilter, MappingStore};
pub use parser::{parse, VocabParser, VocabRecord};
#[cfg(feature = "parallel")]
pub use relationship::collect_edges_parallel;
pub use relationship::{
    collect_edges, EdgeSource, RelationshipFileSource, RelationshipFilter, StaticEdgeSource,
};
pub use service::{SnomedHierarchy, VocabService, DEFAULT_INIT_TIMEOUT};
pub use types::{
    LookupError, LookupResult, MappingConfig, RelationshipConfig, VocabFiles,
};

// Re-export umls-types for convenience
pub use umls_types;
