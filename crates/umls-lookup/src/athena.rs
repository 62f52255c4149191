//! OHDSI Athena CONCEPT.csv parser and store.
//!
//! Athena vocabulary downloads ship CONCEPT.csv as a tab-delimited file
//! (despite the extension) with a header row. The store answers
//! code→concept-id and name→concept-id point lookups.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use umls_types::{AthenaConcept, AthenaVocabulary};

use crate::parser::{parse, VocabParser, VocabRecord};
use crate::types::LookupResult;

/// Expected columns in an Athena CONCEPT.csv file.
const CONCEPT_COLUMNS: &[&str] = &[
    "concept_id",
    "concept_name",
    "domain_id",
    "vocabulary_id",
    "concept_class_id",
    "standard_concept",
    "concept_code",
    "valid_start_date",
    "valid_end_date",
    "invalid_reason",
];

impl VocabRecord for AthenaConcept {
    const DELIMITER: u8 = b'\t';
    const HAS_HEADERS: bool = true;
    const EXPECTED_COLUMNS: &'static [&'static str] = CONCEPT_COLUMNS;
    const MIN_FIELDS: usize = 7;

    fn from_record(record: &StringRecord) -> LookupResult<Self> {
        Ok(AthenaConcept {
            concept_id: parse::concept_id(parse::field(record, 0, "CONCEPT")?)?,
            concept_name: parse::field(record, 1, "CONCEPT")?.to_string(),
            vocabulary_id: parse::field(record, 3, "CONCEPT")?.to_string(),
            concept_code: parse::field(record, 6, "CONCEPT")?.to_string(),
        })
    }
}

/// In-memory store of OHDSI Athena concepts.
///
/// Maps source-vocabulary codes and names to canonical OHDSI concept IDs.
/// Lookups are scoped by vocabulary, since the same code string can occur in
/// several terminologies.
#[derive(Debug, Default)]
pub struct AthenaStore {
    /// Concepts indexed by (vocabulary_id, concept_code).
    concepts_by_code: HashMap<(String, String), AthenaConcept>,
    /// Concept IDs indexed by (vocabulary_id, lowercased concept_name).
    concept_ids_by_name: HashMap<(String, String), i64>,
}

impl AthenaStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads concepts from an Athena CONCEPT.csv file.
    pub fn load_concepts<P: AsRef<Path>>(&mut self, path: P) -> LookupResult<usize> {
        let parser = VocabParser::<_, AthenaConcept>::from_path(path)?;
        self.load_from_parser(parser)
    }

    /// Loads concepts from any reader of CONCEPT.csv-format data.
    pub fn load_concepts_from_reader<R: Read>(&mut self, reader: R) -> LookupResult<usize> {
        let parser = VocabParser::<_, AthenaConcept>::from_reader(reader)?;
        self.load_from_parser(parser)
    }

    fn load_from_parser<R: Read>(
        &mut self,
        parser: VocabParser<R, AthenaConcept>,
    ) -> LookupResult<usize> {
        let mut count = 0;

        for concept in parser {
            self.insert_concept(concept?);
            count += 1;
        }

        Ok(count)
    }

    /// Bulk inserts concepts.
    pub fn insert_concepts(&mut self, concepts: impl IntoIterator<Item = AthenaConcept>) {
        for concept in concepts {
            self.insert_concept(concept);
        }
    }

    fn insert_concept(&mut self, concept: AthenaConcept) {
        self.concept_ids_by_name.insert(
            (
                concept.vocabulary_id.clone(),
                concept.concept_name.to_lowercase(),
            ),
            concept.concept_id,
        );
        self.concepts_by_code.insert(
            (concept.vocabulary_id.clone(), concept.concept_code.clone()),
            concept,
        );
    }

    // Query methods

    /// Gets the OHDSI concept ID for a code in a source vocabulary.
    ///
    /// Returns `None` when the code is unknown in that vocabulary.
    pub fn concept_id_for_code(&self, vocab: AthenaVocabulary, code: &str) -> Option<i64> {
        self.concepts_by_code
            .get(&(vocab.vocabulary_id().to_string(), code.to_string()))
            .map(|c| c.concept_id)
    }

    /// Gets the OHDSI concept ID for a concept name in a source vocabulary.
    ///
    /// Name matching is case-insensitive. Returns `None` when no concept in
    /// that vocabulary carries the name.
    pub fn concept_id_for_name(&self, vocab: AthenaVocabulary, name: &str) -> Option<i64> {
        self.concept_ids_by_name
            .get(&(vocab.vocabulary_id().to_string(), name.to_lowercase()))
            .copied()
    }

    /// Gets the full concept record for a code in a source vocabulary.
    pub fn concept_for_code(&self, vocab: AthenaVocabulary, code: &str) -> Option<&AthenaConcept> {
        self.concepts_by_code
            .get(&(vocab.vocabulary_id().to_string(), code.to_string()))
    }

    /// Returns the number of concepts in the store.
    pub fn concept_count(&self) -> usize {
        self.concepts_by_code.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONCEPT_SAMPLE: &str = "concept_id\tconcept_name\tdomain_id\tvocabulary_id\tconcept_class_id\tstandard_concept\tconcept_code\tvalid_start_date\tvalid_end_date\tinvalid_reason\n\
201826\tType 2 diabetes mellitus\tCondition\tSNOMED\tClinical Finding\tS\t44054006\t20020131\t20991231\t\n\
1127433\tAcetaminophen 325 MG Oral Tablet\tDrug\tRxNorm\tClinical Drug\tS\t313782\t19700101\t20991231\t\n\
2211359\tOffice outpatient visit 15 minutes\tProcedure\tCPT4\tCPT4\tS\t99213\t19700101\t20991231\t\n";

    fn load_sample() -> AthenaStore {
        let mut store = AthenaStore::new();
        let count = store
            .load_concepts_from_reader(CONCEPT_SAMPLE.as_bytes())
            .unwrap();
        assert_eq!(count, 3);
        store
    }

    #[test]
    fn test_concept_id_for_code() {
        let store = load_sample();

        assert_eq!(
            store.concept_id_for_code(AthenaVocabulary::Snomed, "44054006"),
            Some(201826)
        );
        assert_eq!(
            store.concept_id_for_code(AthenaVocabulary::RxNorm, "313782"),
            Some(1127433)
        );
        // Right code, wrong vocabulary
        assert_eq!(
            store.concept_id_for_code(AthenaVocabulary::Cpt4, "44054006"),
            None
        );
    }

    #[test]
    fn test_concept_id_for_name() {
        let store = load_sample();

        assert_eq!(
            store.concept_id_for_name(AthenaVocabulary::Snomed, "Type 2 diabetes mellitus"),
            Some(201826)
        );
        // Case-insensitive
        assert_eq!(
            store.concept_id_for_name(AthenaVocabulary::Snomed, "TYPE 2 DIABETES MELLITUS"),
            Some(201826)
        );
        assert_eq!(
            store.concept_id_for_name(AthenaVocabulary::Snomed, "No such concept"),
            None
        );
    }

    #[test]
    fn test_header_validation() {
        let bad_header = "wrong_id\tconcept_name\tdomain_id\tvocabulary_id\tconcept_class_id\tstandard_concept\tconcept_code\tvalid_start_date\tvalid_end_date\tinvalid_reason\n";
        let mut store = AthenaStore::new();
        let result = store.load_concepts_from_reader(bad_header.as_bytes());
        assert!(matches!(
            result,
            Err(crate::LookupError::UnexpectedColumn { position: 0, .. })
        ));
    }
}
