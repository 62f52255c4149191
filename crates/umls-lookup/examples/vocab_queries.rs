//! Loads a vocabulary directory and runs a few representative lookups.
//!
//! ```text
//! VOCAB_DATA_PATH=/data/vocab cargo run --example vocab_queries
//! ```

use umls_lookup::{discover_vocab_files, VocabService};
use umls_types::{well_known, SourceVocabulary};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DATA_PATH: &str = "data/vocab";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let data_path =
        std::env::var("VOCAB_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

    tracing::info!("Loading vocabulary data from: {}", data_path);
    let files = discover_vocab_files(&data_path)?;
    let service = VocabService::from_files(&files)?;

    tracing::info!(
        "Loaded {} UMLS mappings across {} CUIs, {} Athena concepts",
        service.mappings().mapping_count(),
        service.mappings().cui_count(),
        service.athena().concept_count()
    );

    // C0011849 is the UMLS concept for diabetes mellitus
    let cui = "C0011849";
    let codes = service.source_codes_for_cui(SourceVocabulary::SnomedCtUs, cui);
    tracing::info!("SNOMED CT codes for {}: {:?}", cui, codes);

    if let Some(code) = codes.first() {
        match service.preferred_text(SourceVocabulary::SnomedCtUs, code) {
            Some(text) => tracing::info!("Preferred text for {}: {}", code, text),
            None => tracing::warn!("No English term recorded for {}", code),
        }
    }

    // The first is-a query triggers the one-time hierarchy build
    let diabetes = "73211009";
    let type2 = "44054006";
    let related = service.is_descendant_of(type2, diabetes)?;
    tracing::info!(
        "{} is-a descendant of {}: {}",
        type2,
        diabetes,
        related
    );

    let under_finding = service.is_descendant_of(diabetes, well_known::CLINICAL_FINDING)?;
    tracing::info!(
        "{} under clinical finding ({}): {}",
        diabetes,
        well_known::CLINICAL_FINDING,
        under_finding
    );

    Ok(())
}
