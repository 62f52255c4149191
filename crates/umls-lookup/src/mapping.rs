//! UMLS MRCONSO mapping parser and store.
//!
//! MRCONSO.RRF is the Metathesaurus "concept names and sources" file: one
//! pipe-delimited row per atom, no header, trailing delimiter. The store
//! indexes rows both by CUI and by source code so that CUI→code,
//! code→CUI and code→preferred-text lookups are all single hash probes.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use umls_types::{ConceptMapping, SourceVocabulary};

use crate::parser::{parse, VocabParser, VocabRecord};
use crate::types::{LookupResult, MappingConfig};

// MRCONSO.RRF field positions (per the Metathesaurus column reference).
const CUI_FIELD: usize = 0;
const LAT_FIELD: usize = 1;
const SAB_FIELD: usize = 11;
const CODE_FIELD: usize = 13;
const STR_FIELD: usize = 14;

impl VocabRecord for ConceptMapping {
    const DELIMITER: u8 = b'|';
    const HAS_HEADERS: bool = false;
    const EXPECTED_COLUMNS: &'static [&'static str] = &[];
    const MIN_FIELDS: usize = 15;

    fn from_record(record: &StringRecord) -> LookupResult<Self> {
        Ok(ConceptMapping {
            cui: parse::field(record, CUI_FIELD, "MRCONSO")?.to_string(),
            language: parse::field(record, LAT_FIELD, "MRCONSO")?.to_string(),
            source: parse::field(record, SAB_FIELD, "MRCONSO")?.to_string(),
            code: parse::field(record, CODE_FIELD, "MRCONSO")?.to_string(),
            term: parse::field(record, STR_FIELD, "MRCONSO")?.to_string(),
        })
    }
}

/// Language filter applied while loading mappings.
pub trait MappingFilter {
    /// Returns true if the mapping passes the filter config.
    fn passes_mapping_filter(&self, config: &MappingConfig) -> bool;
}

impl MappingFilter for ConceptMapping {
    fn passes_mapping_filter(&self, config: &MappingConfig) -> bool {
        config.languages.is_empty() || config.languages.contains(&self.language)
    }
}

/// In-memory store of UMLS concept mappings.
///
/// Holds the CUI↔source-code translation table parsed from MRCONSO.RRF.
/// All query methods are read-only and soft on not-found: an unknown CUI or
/// code yields an empty result, never an error.
///
/// # Example
///
/// ```ignore
/// use umls_lookup::{MappingStore, MappingConfig};
/// use umls_types::SourceVocabulary;
///
/// let mut store = MappingStore::new();
/// store.load_mappings("UMLS/MRCONSO.RRF", MappingConfig::default())?;
///
/// let codes = store.source_codes_for_cui(SourceVocabulary::SnomedCtUs, "C0011849");
/// ```
#[derive(Debug, Default)]
pub struct MappingStore {
    /// Mappings indexed by CUI.
    mappings_by_cui: HashMap<String, Vec<ConceptMapping>>,
    /// Mappings indexed by source code (for reverse lookup).
    mappings_by_code: HashMap<String, Vec<ConceptMapping>>,
}

impl MappingStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads concept mappings from an MRCONSO.RRF file.
    ///
    /// Returns the number of mappings that passed the language filter.
    pub fn load_mappings<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: MappingConfig,
    ) -> LookupResult<usize> {
        let parser = VocabParser::<_, ConceptMapping>::from_path(path)?;
        self.load_from_parser(parser, &config)
    }

    /// Loads concept mappings from any reader of MRCONSO-format data.
    pub fn load_mappings_from_reader<R: Read>(
        &mut self,
        reader: R,
        config: MappingConfig,
    ) -> LookupResult<usize> {
        let parser = VocabParser::<_, ConceptMapping>::from_reader(reader)?;
        self.load_from_parser(parser, &config)
    }

    fn load_from_parser<R: Read>(
        &mut self,
        parser: VocabParser<R, ConceptMapping>,
        config: &MappingConfig,
    ) -> LookupResult<usize> {
        let mut count = 0;

        for mapping in parser {
            let mapping = mapping?;
            if mapping.passes_mapping_filter(config) {
                self.insert_mapping(mapping);
                count += 1;
            }
        }

        Ok(count)
    }

    /// Loads concept mappings using parallel line parsing.
    ///
    /// Reads the whole file into memory, then parses lines in parallel with
    /// rayon. Significantly faster for full Metathesaurus subsets.
    #[cfg(feature = "parallel")]
    pub fn load_mappings_parallel<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: MappingConfig,
    ) -> LookupResult<usize> {
        use rayon::prelude::*;

        let lines = crate::loader::read_lines(path, false)?;

        let mappings: Vec<ConceptMapping> = lines
            .par_iter()
            .filter_map(|line| parse_mapping_line(line, &config))
            .collect();

        let count = mappings.len();
        for mapping in mappings {
            self.insert_mapping(mapping);
        }

        Ok(count)
    }

    /// Bulk inserts mappings.
    pub fn insert_mappings(&mut self, mappings: impl IntoIterator<Item = ConceptMapping>) {
        for mapping in mappings {
            self.insert_mapping(mapping);
        }
    }

    fn insert_mapping(&mut self, mapping: ConceptMapping) {
        self.mappings_by_code
            .entry(mapping.code.clone())
            .or_default()
            .push(mapping.clone());
        self.mappings_by_cui
            .entry(mapping.cui.clone())
            .or_default()
            .push(mapping);
    }

    // Query methods

    /// Retrieves the source-vocabulary codes equivalent to a UMLS CUI.
    ///
    /// UMLS→source is 1:n, so the result can hold several codes; it is empty
    /// when the CUI is unknown or has no atom in the given vocabulary.
    pub fn source_codes_for_cui(&self, vocab: SourceVocabulary, cui: &str) -> Vec<&str> {
        self.mappings_by_cui
            .get(cui)
            .map(|mappings| {
                mappings
                    .iter()
                    .filter(|m| m.is_from(vocab))
                    .map(|m| m.code.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Performs the inverse of [`source_codes_for_cui`](Self::source_codes_for_cui):
    /// retrieves the UMLS CUIs a source-vocabulary code maps to.
    ///
    /// Results can be chained back through `source_codes_for_cui` to convert
    /// between two source vocabularies via UMLS.
    pub fn cuis_for_source_code(&self, vocab: SourceVocabulary, code: &str) -> Vec<&str> {
        let mut cuis: Vec<&str> = Vec::new();
        if let Some(mappings) = self.mappings_by_code.get(code) {
            // A code usually maps to a handful of CUIs at most, so a linear
            // scan beats a set here; insertion order is kept.
            for mapping in mappings.iter().filter(|m| m.is_from(vocab)) {
                if !cuis.contains(&mapping.cui.as_str()) {
                    cuis.push(mapping.cui.as_str());
                }
            }
        }
        cuis
    }

    /// Retrieves the preferred text for a code within a source vocabulary.
    ///
    /// Returns the first matching term, or `None` if the code is unknown.
    pub fn preferred_text(&self, vocab: SourceVocabulary, code: &str) -> Option<&str> {
        self.mappings_by_code
            .get(code)?
            .iter()
            .find(|m| m.is_from(vocab))
            .map(|m| m.term.as_str())
    }

    /// Returns the number of mappings in the store.
    pub fn mapping_count(&self) -> usize {
        self.mappings_by_cui.values().map(|v| v.len()).sum()
    }

    /// Returns the number of distinct CUIs in the store.
    pub fn cui_count(&self) -> usize {
        self.mappings_by_cui.len()
    }
}

/// Parses a single MRCONSO line.
#[cfg(feature = "parallel")]
fn parse_mapping_line(line: &str, config: &MappingConfig) -> Option<ConceptMapping> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 15 {
        return None;
    }

    let language = fields[LAT_FIELD].to_string();
    if !config.languages.is_empty() && !config.languages.contains(&language) {
        return None;
    }

    Some(ConceptMapping {
        cui: fields[CUI_FIELD].to_string(),
        language,
        source: fields[SAB_FIELD].to_string(),
        code: fields[CODE_FIELD].to_string(),
        term: fields[STR_FIELD].to_string(),
    })
}
