//! Generic delimited vocabulary file parser.
//!
//! The three supported formats differ in delimiter and header convention:
//! MRCONSO.RRF is pipe-delimited with no header row, while Athena
//! CONCEPT.csv and SNOMED CT RF2 snapshots are tab-delimited with a header.
//! `VocabParser` streams records of any type implementing [`VocabRecord`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{LookupError, LookupResult};

/// Trait for types that can be parsed from delimited vocabulary records.
pub trait VocabRecord: Sized {
    /// Field delimiter for this record's file format.
    const DELIMITER: u8;

    /// Whether the file format carries a header row.
    const HAS_HEADERS: bool;

    /// Expected column names, validated when `HAS_HEADERS` is true.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Minimum number of fields a usable row must have.
    ///
    /// Rows with fewer fields are skipped, not treated as errors; short rows
    /// occur in real distribution files.
    const MIN_FIELDS: usize;

    /// Parse a record from a CSV StringRecord.
    fn from_record(record: &StringRecord) -> LookupResult<Self>;
}

/// A streaming parser for delimited vocabulary files.
///
/// Reads record-by-record to avoid loading entire files into memory;
/// MRCONSO alone runs to millions of rows.
pub struct VocabParser<R: Read, T: VocabRecord> {
    reader: Reader<R>,
    records_read: usize,
    _marker: PhantomData<T>,
}

impl<T: VocabRecord> VocabParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or has invalid headers.
    pub fn from_path<P: AsRef<Path>>(path: P) -> LookupResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LookupError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }
}

impl<R: Read, T: VocabRecord> VocabParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R) -> LookupResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(T::DELIMITER)
            .has_headers(T::HAS_HEADERS)
            // None of the vocabulary formats quote fields; a stray '"' in a
            // term must not swallow delimiters.
            .quoting(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        if T::HAS_HEADERS {
            Self::validate_headers(&mut csv_reader)?;
        }

        Ok(Self {
            reader: csv_reader,
            records_read: 0,
            _marker: PhantomData,
        })
    }

    /// Validates that the file has the expected column headers.
    fn validate_headers(reader: &mut Reader<R>) -> LookupResult<()> {
        let headers = reader.headers()?;
        let expected = T::EXPECTED_COLUMNS;

        if headers.len() < expected.len() {
            return Err(LookupError::InvalidHeader {
                expected: expected.len(),
                found: headers.len(),
            });
        }

        for (i, expected_col) in expected.iter().enumerate() {
            let found = headers.get(i).unwrap_or("");
            // Handle UTF-8 BOM at start of file
            let found = found.trim_start_matches('\u{feff}');
            if found != *expected_col {
                return Err(LookupError::UnexpectedColumn {
                    position: i,
                    expected: expected_col.to_string(),
                    found: found.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Parses all records into a Vec.
    ///
    /// Note: This loads all matching records into memory.
    pub fn parse_all(mut self) -> LookupResult<Vec<T>> {
        let mut results = Vec::new();
        for record in self.by_ref() {
            results.push(record?);
        }
        Ok(results)
    }
}

impl<R: Read, T: VocabRecord> Iterator for VocabParser<R, T> {
    type Item = LookupResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;

                    // Skip empty and short records
                    if record.len() < T::MIN_FIELDS
                        || record.iter().all(|f| f.trim().is_empty())
                    {
                        continue;
                    }

                    return Some(T::from_record(&record));
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing vocabulary field values.
pub mod parse {
    use super::{LookupError, LookupResult, StringRecord};

    /// Returns a field by index, or a MissingField error naming the format.
    pub fn field<'a>(
        record: &'a StringRecord,
        index: usize,
        file_type: &'static str,
    ) -> LookupResult<&'a str> {
        record
            .get(index)
            .ok_or(LookupError::MissingField { file_type, index })
    }

    /// Parses an OHDSI concept ID from a string.
    pub fn concept_id(value: &str) -> LookupResult<i64> {
        value
            .parse::<i64>()
            .map_err(|_| LookupError::InvalidConceptId {
                value: value.to_string(),
            })
    }

    /// Parses an RF2 boolean from "0" or "1".
    pub fn boolean(value: &str) -> LookupResult<bool> {
        match value {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(LookupError::InvalidBoolean {
                value: value.to_string(),
            }),
        }
    }
}
