use super::trainer::TrainingSample;
use crate::application::record_source::{list_record_files, load_record};
use crate::domain::errors::TrainingError;
use crate::domain::ml::{LabelPolicy, extract_features};
use std::path::Path;
use tracing::{debug, info, warn};

/// Labeled samples built from a data directory.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub samples: Vec<TrainingSample>,
    pub skipped: usize,
}

/// Reads every record in `dir`, extracts features and labels them.
///
/// Files that cannot be read, decoded, or lack a company section are
/// logged and skipped. An empty result is an error.
pub fn load_corpus(dir: &Path, policy: &LabelPolicy) -> Result<Corpus, TrainingError> {
    let files = list_record_files(dir)?;
    let mut corpus = Corpus::default();

    for path in &files {
        let loaded = match load_record(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                corpus.skipped += 1;
                continue;
            }
        };

        if let Err(e) = loaded.company() {
            warn!("Skipping {}: {}", path.display(), e);
            corpus.skipped += 1;
            continue;
        }

        let features = extract_features(&loaded.record);
        let label = policy.label(&features);
        debug!("{} -> {} {:?}", loaded.identifier, label, features);

        corpus.samples.push(TrainingSample {
            identifier: loaded.identifier,
            features,
            label,
        });
    }

    if corpus.samples.is_empty() {
        return Err(TrainingError::NoData {
            dir: dir.to_path_buf(),
        });
    }

    info!(
        "Loaded {} training samples from {} ({} skipped)",
        corpus.samples.len(),
        dir.display(),
        corpus.skipped
    );
    Ok(corpus)
}
