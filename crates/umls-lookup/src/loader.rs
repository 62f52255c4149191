//! Vocabulary file discovery utilities.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::types::{LookupError, LookupResult, VocabFiles};

/// Discovers vocabulary files under a base directory.
///
/// Searches for the UMLS `MRCONSO.RRF` concordance, the OHDSI Athena
/// `CONCEPT.csv` export, and a SNOMED CT RF2 relationship snapshot. Each
/// file is looked for in its conventional subdirectory first (`UMLS/`,
/// `OHDSI/`, `SNOMEDCT_US/`), then at the top level.
///
/// Absent files are left unset rather than treated as errors, so a partial
/// vocabulary set still yields a usable result; use
/// [`VocabFiles::missing_files`] to report what was not found.
pub fn discover_vocab_files<P: AsRef<Path>>(path: P) -> LookupResult<VocabFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(LookupError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = VocabFiles::default();

    files.mrconso_file = find_file(path, "UMLS", |name| name == "MRCONSO.RRF")?;
    files.athena_concept_file = find_file(path, "OHDSI", |name| name == "CONCEPT.csv")?;
    files.snomed_relationship_file = find_file(path, "SNOMEDCT_US", |name| {
        name.starts_with("sct2_Relationship_Snapshot") && name.ends_with(".txt")
    })?;

    for missing in files.missing_files() {
        tracing::warn!(file = missing, "Vocabulary file not found");
    }

    Ok(files)
}

/// Looks for a matching file in `base/subdir`, then in `base` itself.
fn find_file<F>(base: &Path, subdir: &str, matches: F) -> LookupResult<Option<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    let sub = base.join(subdir);
    if sub.is_dir() {
        if let Some(found) = scan_dir(&sub, &matches)? {
            return Ok(Some(found));
        }
    }
    scan_dir(base, &matches)
}

fn scan_dir<F>(dir: &Path, matches: &F) -> LookupResult<Option<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let filename = entry.file_name();
        if matches(&filename.to_string_lossy()) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

/// Reads a file into owned lines, dropping empties, for parallel parsing.
#[cfg(feature = "parallel")]
pub(crate) fn read_lines<P: AsRef<Path>>(path: P, skip_header: bool) -> LookupResult<Vec<String>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LookupError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader
        .lines()
        .skip(if skip_header { 1 } else { 0 })
        .filter_map(Result::ok)
        .filter(|line| !line.is_empty())
        .collect();
    Ok(lines)
}

/// Counts data lines in a vocabulary file, excluding the header row.
pub fn count_lines<P: AsRef<Path>>(path: P) -> LookupResult<usize> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let count = reader.lines().count();
    Ok(count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn make_tree(root: &Path) {
        fs::create_dir_all(root.join("UMLS")).unwrap();
        fs::create_dir_all(root.join("OHDSI")).unwrap();
        fs::create_dir_all(root.join("SNOMEDCT_US")).unwrap();

        File::create(root.join("UMLS").join("MRCONSO.RRF")).unwrap();
        File::create(root.join("OHDSI").join("CONCEPT.csv")).unwrap();
        File::create(
            root.join("SNOMEDCT_US")
                .join("sct2_Relationship_Snapshot_US1000124_20250301.txt"),
        )
        .unwrap();
    }

    #[test]
    fn test_discover_full_tree() {
        let root = std::env::temp_dir().join("umls_lookup_discover_full");
        let _ = fs::remove_dir_all(&root);
        make_tree(&root);

        let files = discover_vocab_files(&root).unwrap();
        assert!(files.is_complete());
        assert!(files.missing_files().is_empty());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_discover_flat_layout() {
        let root = std::env::temp_dir().join("umls_lookup_discover_flat");
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        File::create(root.join("MRCONSO.RRF")).unwrap();

        let files = discover_vocab_files(&root).unwrap();
        assert!(files.mrconso_file.is_some());
        assert!(files.athena_concept_file.is_none());
        assert!(!files.is_complete());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_discover_missing_directory() {
        let err = discover_vocab_files("/nonexistent/vocab/dir").unwrap_err();
        assert!(matches!(err, LookupError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_count_lines_excludes_header() {
        let path = std::env::temp_dir().join("umls_lookup_count_lines.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "concept_id\tconcept_name").unwrap();
        writeln!(file, "1\tDiabetes").unwrap();
        writeln!(file, "2\tHypertension").unwrap();
        drop(file);

        assert_eq!(count_lines(&path).unwrap(), 2);
        fs::remove_file(&path).ok();
    }
}
