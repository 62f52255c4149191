//! SNOMED CT relationship snapshot parser and edge sources.
//!
//! The hierarchy index is built from the active IS_A rows of an RF2
//! relationship snapshot. `EdgeSource` abstracts where those edges come
//! from, so the hierarchy can also be fed from memory in tests or by
//! embedding applications with their own storage.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::StringRecord;
use umls_types::{IsaEdge, SnomedRelationship};

use crate::parser::{parse, VocabParser, VocabRecord};
use crate::types::{LookupResult, RelationshipConfig};

/// Expected columns in an RF2 relationship snapshot file.
const RELATIONSHIP_COLUMNS: &[&str] = &[
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "sourceId",
    "destinationId",
    "relationshipGroup",
    "typeId",
    "characteristicTypeId",
    "modifierId",
];

impl VocabRecord for SnomedRelationship {
    const DELIMITER: u8 = b'\t';
    const HAS_HEADERS: bool = true;
    const EXPECTED_COLUMNS: &'static [&'static str] = RELATIONSHIP_COLUMNS;
    const MIN_FIELDS: usize = 10;

    fn from_record(record: &StringRecord) -> LookupResult<Self> {
        Ok(SnomedRelationship {
            id: parse::field(record, 0, "Relationship")?.to_string(),
            active: parse::boolean(parse::field(record, 2, "Relationship")?)?,
            source_id: parse::field(record, 4, "Relationship")?.to_string(),
            destination_id: parse::field(record, 5, "Relationship")?.to_string(),
            type_id: parse::field(record, 7, "Relationship")?.to_string(),
        })
    }
}

/// Filter for relationships with type and activity filtering.
pub trait RelationshipFilter {
    /// Returns true if the relationship passes the filter config.
    fn passes_relationship_filter(&self, config: &RelationshipConfig) -> bool;
}

impl RelationshipFilter for SnomedRelationship {
    fn passes_relationship_filter(&self, config: &RelationshipConfig) -> bool {
        if config.active_only && !self.active {
            return false;
        }

        if !config.type_ids.is_empty() && !config.type_ids.contains(&self.type_id) {
            return false;
        }

        true
    }
}

/// A source of is-a edges for the hierarchy index.
///
/// Implementations yield the complete direct-edge set of the concept graph.
/// The hierarchy service reads it exactly once, at first use, from exactly
/// one thread; the graph is treated as immutable afterwards.
pub trait EdgeSource: Send + Sync {
    /// Reads the full set of is-a edges.
    ///
    /// Any error here is fatal to hierarchy initialization: no partial index
    /// is ever published.
    fn edges(&self) -> LookupResult<Vec<IsaEdge>>;
}

impl<S: EdgeSource + ?Sized> EdgeSource for Arc<S> {
    fn edges(&self) -> LookupResult<Vec<IsaEdge>> {
        (**self).edges()
    }
}

/// Edge source backed by an RF2 relationship snapshot file.
///
/// Non-is-a relationship kinds are filtered out here, before the edges reach
/// the hierarchy builder.
#[derive(Debug, Clone)]
pub struct RelationshipFileSource {
    path: PathBuf,
    config: RelationshipConfig,
}

impl RelationshipFileSource {
    /// Creates a source reading active IS_A rows from the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config: RelationshipConfig::is_a_only(),
        }
    }

    /// Creates a source with a custom relationship filter.
    pub fn with_config<P: AsRef<Path>>(path: P, config: RelationshipConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }
}

impl EdgeSource for RelationshipFileSource {
    #[cfg(not(feature = "parallel"))]
    fn edges(&self) -> LookupResult<Vec<IsaEdge>> {
        let parser = VocabParser::<_, SnomedRelationship>::from_path(&self.path)?;
        collect_edges(parser, &self.config)
    }

    #[cfg(feature = "parallel")]
    fn edges(&self) -> LookupResult<Vec<IsaEdge>> {
        collect_edges_parallel(&self.path, &self.config)
    }
}

/// Edge source backed by an in-memory edge list.
///
/// Useful for tests and for embedders that already hold the graph.
#[derive(Debug, Clone, Default)]
pub struct StaticEdgeSource {
    edges: Vec<IsaEdge>,
}

impl StaticEdgeSource {
    /// Creates a source from a list of edges.
    pub fn new(edges: impl IntoIterator<Item = IsaEdge>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
        }
    }
}

impl EdgeSource for StaticEdgeSource {
    fn edges(&self) -> LookupResult<Vec<IsaEdge>> {
        Ok(self.edges.clone())
    }
}

/// Collects is-a edges from a relationship parser, applying the filter.
pub fn collect_edges<R: Read>(
    parser: VocabParser<R, SnomedRelationship>,
    config: &RelationshipConfig,
) -> LookupResult<Vec<IsaEdge>> {
    let mut edges = Vec::new();

    for rel in parser {
        let rel = rel?;
        if rel.passes_relationship_filter(config) {
            if let Some(edge) = rel.to_isa_edge() {
                edges.push(edge);
            }
        }
    }

    Ok(edges)
}

/// Reads is-a edges from a relationship snapshot file using parallel parsing.
///
/// Reads the whole file into memory, then parses lines in parallel with
/// rayon. This is the default path of [`RelationshipFileSource`] when the
/// `parallel` feature is enabled; snapshot files run to millions of rows.
#[cfg(feature = "parallel")]
pub fn collect_edges_parallel<P: AsRef<Path>>(
    path: P,
    config: &RelationshipConfig,
) -> LookupResult<Vec<IsaEdge>> {
    use rayon::prelude::*;

    let lines = crate::loader::read_lines(path, true)?;

    Ok(lines
        .par_iter()
        .filter_map(|line| parse_relationship_line(line, config))
        .collect())
}

/// Parses a single relationship line into an is-a edge.
#[cfg(feature = "parallel")]
fn parse_relationship_line(line: &str, config: &RelationshipConfig) -> Option<IsaEdge> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 10 {
        return None;
    }

    let rel = SnomedRelationship {
        id: fields[0].to_string(),
        active: fields[2] == "1",
        source_id: fields[4].to_string(),
        destination_id: fields[5].to_string(),
        type_id: fields[7].to_string(),
    };

    if !rel.passes_relationship_filter(config) {
        return None;
    }

    rel.to_isa_edge()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELATIONSHIP_SAMPLE: &str = "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId\n\
100001\t20020131\t1\t900000000000207008\t44054006\t73211009\t0\t116680003\t900000000000011006\t900000000000451002\n\
100002\t20020131\t1\t900000000000207008\t73211009\t362969004\t0\t116680003\t900000000000011006\t900000000000451002\n\
100003\t20020131\t0\t900000000000207008\t44054006\t999999999\t0\t116680003\t900000000000011006\t900000000000451002\n\
100004\t20020131\t1\t900000000000207008\t44054006\t113331007\t0\t363698007\t900000000000011006\t900000000000451002\n";

    #[test]
    fn test_collect_is_a_edges() {
        let parser =
            VocabParser::<_, SnomedRelationship>::from_reader(RELATIONSHIP_SAMPLE.as_bytes())
                .unwrap();
        let edges = collect_edges(parser, &RelationshipConfig::is_a_only()).unwrap();

        // Inactive row and finding-site row are filtered out
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], IsaEdge::new("73211009", "44054006"));
        assert_eq!(edges[1], IsaEdge::new("362969004", "73211009"));
    }

    #[test]
    fn test_inactive_rows_kept_when_configured() {
        let parser =
            VocabParser::<_, SnomedRelationship>::from_reader(RELATIONSHIP_SAMPLE.as_bytes())
                .unwrap();
        let config = RelationshipConfig {
            active_only: false,
            type_ids: vec![umls_types::well_known::IS_A.to_string()],
        };
        let edges = collect_edges(parser, &config).unwrap();
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn test_static_source() {
        let source = StaticEdgeSource::new([IsaEdge::new("A", "B")]);
        let edges = source.edges().unwrap();
        assert_eq!(edges, vec![IsaEdge::new("A", "B")]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_collect_edges_parallel_matches_streaming() {
        let path = std::env::temp_dir().join("umls_lookup_rel_parallel.txt");
        std::fs::write(&path, RELATIONSHIP_SAMPLE).unwrap();

        let mut parallel =
            collect_edges_parallel(&path, &RelationshipConfig::is_a_only()).unwrap();

        let parser =
            VocabParser::<_, SnomedRelationship>::from_reader(RELATIONSHIP_SAMPLE.as_bytes())
                .unwrap();
        let mut streaming = collect_edges(parser, &RelationshipConfig::is_a_only()).unwrap();

        parallel.sort_by(|a, b| a.child.cmp(&b.child));
        streaming.sort_by(|a, b| a.child.cmp(&b.child));
        assert_eq!(parallel, streaming);
        assert_eq!(parallel.len(), 2);

        // The file source reads the same edge set
        let from_source = RelationshipFileSource::new(&path).edges().unwrap();
        assert_eq!(from_source.len(), 2);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let source = RelationshipFileSource::new("/no/such/file.txt");
        assert!(matches!(
            source.edges(),
            Err(crate::LookupError::FileNotFound { .. })
        ));
    }
}
