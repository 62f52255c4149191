//! Query services over the vocabulary stores and the hierarchy index.
//!
//! `SnomedHierarchy` is the is-a query surface: it owns an edge source and
//! an [`InitGate`], and builds its transitive-closure index lazily on first
//! query. `VocabService` bundles the hierarchy with the point-lookup stores
//! into one handle.

use std::sync::Arc;
use std::time::Duration;

use umls_types::{ConceptCode, SourceVocabulary};

use crate::athena::AthenaStore;
use crate::gate::InitGate;
use crate::hierarchy::{ClosureBuilder, HierarchyIndex};
use crate::mapping::MappingStore;
use crate::relationship::{EdgeSource, RelationshipFileSource};
use crate::types::{LookupResult, MappingConfig, VocabFiles};

/// Default bound on how long a caller waits for another thread's build.
pub const DEFAULT_INIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Lazily-built is-a hierarchy over a concept graph.
///
/// The edge source is read exactly once, by whichever caller first needs the
/// index; concurrent first callers block until that single build resolves.
/// Every instance owns its own gate and index, so independent hierarchies
/// (separate vocabularies, tests) never share state.
///
/// All methods are safe to call from any number of threads with no external
/// locking.
///
/// # Example
///
/// ```
/// use umls_lookup::{SnomedHierarchy, StaticEdgeSource};
/// use umls_types::IsaEdge;
///
/// let hierarchy = SnomedHierarchy::new(StaticEdgeSource::new([
///     IsaEdge::new("404684003", "25064002"),
/// ]));
///
/// assert!(hierarchy.is_descendant_of("25064002", "404684003").unwrap());
/// assert!(!hierarchy.is_descendant_of("404684003", "25064002").unwrap());
/// ```
pub struct SnomedHierarchy<S: EdgeSource> {
    source: S,
    gate: InitGate<HierarchyIndex>,
    init_timeout: Duration,
}

impl<S: EdgeSource> SnomedHierarchy<S> {
    /// Creates a hierarchy over the given edge source.
    pub fn new(source: S) -> Self {
        Self::with_timeout(source, DEFAULT_INIT_TIMEOUT)
    }

    /// Creates a hierarchy with a custom bound on waiting for the build.
    ///
    /// The bound applies to callers waiting on another thread's build; the
    /// building caller itself is not interrupted.
    pub fn with_timeout(source: S, init_timeout: Duration) -> Self {
        Self {
            source,
            gate: InitGate::new(),
            init_timeout,
        }
    }

    /// Returns the hierarchy index, building it on first use.
    ///
    /// A build failure is permanent: every current and future caller gets
    /// [`LookupError::InitializationFailed`](crate::LookupError::InitializationFailed)
    /// and no partial index is ever published.
    pub fn index(&self) -> LookupResult<Arc<HierarchyIndex>> {
        self.gate.get_or_init(self.init_timeout, || {
            tracing::info!("Importing is-a relationships");
            let edges = self.source.edges()?;
            tracing::info!(edge_count = edges.len(), "Building hierarchy index");
            let index = ClosureBuilder::from_edges(edges).build();
            tracing::info!(
                parent_count = index.parent_count(),
                pair_count = index.pair_count(),
                "Hierarchy index ready"
            );
            Ok(index)
        })
    }

    /// Checks if a candidate concept is the same as, or a descendant of,
    /// the given ancestor concept.
    ///
    /// Unknown codes are not errors; they yield `false` unless the two
    /// codes are equal, which is always `true` at plain string level.
    pub fn is_descendant_of(&self, candidate: &str, ancestor: &str) -> LookupResult<bool> {
        // The reflexive case needs no index and must work even if the
        // graph was never loadable for these codes.
        if candidate == ancestor {
            return Ok(true);
        }
        Ok(self.index()?.is_descendant_of(candidate, ancestor))
    }

    /// Returns the full descendant set of a concept.
    ///
    /// Empty when the concept has no descendants or is unknown.
    pub fn descendants_of(&self, code: &str) -> LookupResult<Vec<ConceptCode>> {
        Ok(self
            .index()?
            .descendants_of(code)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Returns true if the index has already been built successfully.
    pub fn is_ready(&self) -> bool {
        self.gate.get().is_some()
    }
}

/// Combined vocabulary lookup service.
///
/// Owns the UMLS mapping store, the Athena concept store, and the lazy
/// SNOMED CT hierarchy. The stores load eagerly at construction (they are
/// single streaming passes); the hierarchy build is deferred to the first
/// is-a query.
pub struct VocabService {
    mappings: MappingStore,
    athena: AthenaStore,
    hierarchy: Option<SnomedHierarchy<RelationshipFileSource>>,
}

impl VocabService {
    /// Creates a service from discovered vocabulary files.
    ///
    /// Missing files disable the corresponding lookups rather than failing
    /// construction; [`VocabFiles::missing_files`] reports what is absent.
    pub fn from_files(files: &VocabFiles) -> LookupResult<Self> {
        let mut mappings = MappingStore::new();
        if let Some(ref path) = files.mrconso_file {
            tracing::info!(path = %path.display(), "Importing UMLS vocabulary mappings");
            let count = mappings.load_mappings(path, MappingConfig::default())?;
            tracing::info!(mapping_count = count, "UMLS mappings loaded");
        }

        let mut athena = AthenaStore::new();
        if let Some(ref path) = files.athena_concept_file {
            tracing::info!(path = %path.display(), "Importing OHDSI vocabulary definitions");
            let count = athena.load_concepts(path)?;
            tracing::info!(concept_count = count, "OHDSI concepts loaded");
        }

        let hierarchy = files
            .snomed_relationship_file
            .as_ref()
            .map(|path| SnomedHierarchy::new(RelationshipFileSource::new(path)));

        Ok(Self {
            mappings,
            athena,
            hierarchy,
        })
    }

    /// Returns the UMLS mapping store.
    pub fn mappings(&self) -> &MappingStore {
        &self.mappings
    }

    /// Returns the Athena concept store.
    pub fn athena(&self) -> &AthenaStore {
        &self.athena
    }

    /// Returns the SNOMED CT hierarchy, if a relationship file was found.
    pub fn hierarchy(&self) -> Option<&SnomedHierarchy<RelationshipFileSource>> {
        self.hierarchy.as_ref()
    }

    /// Checks a SNOMED CT is-a relationship.
    ///
    /// Equal codes are trivially related even without a hierarchy; beyond
    /// that, a missing relationship file means no code is anyone's
    /// descendant.
    pub fn is_descendant_of(&self, candidate: &str, ancestor: &str) -> LookupResult<bool> {
        if candidate == ancestor {
            return Ok(true);
        }
        match self.hierarchy {
            Some(ref hierarchy) => hierarchy.is_descendant_of(candidate, ancestor),
            None => Ok(false),
        }
    }

    /// Retrieves source-vocabulary codes for a UMLS CUI.
    pub fn source_codes_for_cui(&self, vocab: SourceVocabulary, cui: &str) -> Vec<&str> {
        self.mappings.source_codes_for_cui(vocab, cui)
    }

    /// Retrieves UMLS CUIs for a source-vocabulary code.
    pub fn cuis_for_source_code(&self, vocab: SourceVocabulary, code: &str) -> Vec<&str> {
        self.mappings.cuis_for_source_code(vocab, code)
    }

    /// Retrieves the preferred text for a source-vocabulary code.
    pub fn preferred_text(&self, vocab: SourceVocabulary, code: &str) -> Option<&str> {
        self.mappings.preferred_text(vocab, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationship::StaticEdgeSource;
    use crate::types::LookupError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use umls_types::IsaEdge;

    /// Edge source that counts how many times it is read.
    struct CountingSource {
        edges: Vec<IsaEdge>,
        reads: AtomicUsize,
    }

    impl CountingSource {
        fn new(edges: Vec<IsaEdge>) -> Self {
            Self {
                edges,
                reads: AtomicUsize::new(0),
            }
        }
    }

    impl EdgeSource for CountingSource {
        fn edges(&self) -> LookupResult<Vec<IsaEdge>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.edges.clone())
        }
    }

    /// Edge source whose read always fails.
    struct FailingSource;

    impl EdgeSource for FailingSource {
        fn edges(&self) -> LookupResult<Vec<IsaEdge>> {
            Err(LookupError::FileNotFound {
                path: "sct2_Relationship_Snapshot.txt".to_string(),
            })
        }
    }

    fn scenario_edges() -> Vec<IsaEdge> {
        vec![
            IsaEdge::new("A", "B"),
            IsaEdge::new("B", "C"),
            IsaEdge::new("D", "C"),
        ]
    }

    #[test]
    fn test_scenario_queries() {
        let hierarchy = SnomedHierarchy::new(StaticEdgeSource::new(scenario_edges()));

        assert!(hierarchy.is_descendant_of("C", "A").unwrap());
        assert!(hierarchy.is_descendant_of("C", "B").unwrap());
        assert!(hierarchy.is_descendant_of("C", "D").unwrap());
        assert!(!hierarchy.is_descendant_of("B", "D").unwrap());
        assert!(!hierarchy.is_descendant_of("A", "C").unwrap());
        assert!(hierarchy.is_descendant_of("A", "A").unwrap());
    }

    #[test]
    fn test_source_read_once_across_queries() {
        let source = Arc::new(CountingSource::new(scenario_edges()));
        let hierarchy = SnomedHierarchy::new(Arc::clone(&source));

        assert!(!hierarchy.is_ready());
        assert!(hierarchy.is_descendant_of("C", "A").unwrap());
        assert!(hierarchy.is_ready());
        assert!(hierarchy.is_descendant_of("B", "A").unwrap());
        assert!(!hierarchy.descendants_of("A").unwrap().is_empty());

        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_queries_build_once() {
        let source = Arc::new(CountingSource::new(scenario_edges()));
        let hierarchy = Arc::new(SnomedHierarchy::new(Arc::clone(&source)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let hierarchy = Arc::clone(&hierarchy);
                thread::spawn(move || hierarchy.is_descendant_of("C", "A"))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().unwrap());
        }
        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_build_propagates_to_all_callers() {
        let hierarchy = SnomedHierarchy::new(FailingSource);

        let err = hierarchy.is_descendant_of("C", "A").unwrap_err();
        assert!(matches!(err, LookupError::FileNotFound { .. }));

        // Subsequent callers observe the permanent failure state
        let err = hierarchy.is_descendant_of("C", "A").unwrap_err();
        assert!(matches!(err, LookupError::InitializationFailed { .. }));
        assert!(!hierarchy.is_ready());

        // The reflexive case never needs the index
        assert!(hierarchy.is_descendant_of("X", "X").unwrap());
    }

    #[test]
    fn test_reflexive_without_build() {
        let source = Arc::new(CountingSource::new(scenario_edges()));
        let hierarchy = SnomedHierarchy::new(Arc::clone(&source));

        assert!(hierarchy.is_descendant_of("A", "A").unwrap());
        assert!(hierarchy.is_descendant_of("UNKNOWN", "UNKNOWN").unwrap());
        assert_eq!(source.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_codes_are_soft() {
        let hierarchy = SnomedHierarchy::new(StaticEdgeSource::new(scenario_edges()));
        assert!(!hierarchy.is_descendant_of("UNKNOWN", "ALSO_UNKNOWN").unwrap());
        assert!(hierarchy.descendants_of("UNKNOWN").unwrap().is_empty());
    }

    #[test]
    fn test_service_without_hierarchy_file() {
        let service = VocabService::from_files(&VocabFiles::default()).unwrap();
        assert!(service.hierarchy().is_none());
        assert!(service.is_descendant_of("X", "X").unwrap());
        assert!(!service.is_descendant_of("C", "A").unwrap());
        assert!(service
            .source_codes_for_cui(SourceVocabulary::SnomedCtUs, "C0011849")
            .is_empty());
    }
}
