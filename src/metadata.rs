use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{Challenge, DataCategory, FileAccession, LibraryPrep, Platform};
use crate::error::LrgaspError;

pub const ENTRY_JSON: &str = "entry.json";
pub const EXPERIMENT_JSON: &str = "experiment.json";

/// A challenge submission and the experiments it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub entry_id: String,
    pub team_id: String,
    pub challenge_id: Challenge,
    pub data_category: DataCategory,
    pub library_prep: LibraryPrep,
    pub platform: Platform,
    pub experiment_ids: Vec<String>,
    pub entry_dir: Utf8PathBuf,
    pub experiments: Vec<Experiment>,
}

impl Entry {
    pub fn has_experiment(&self, experiment_id: &str) -> bool {
        self.experiment_ids.iter().any(|id| id == experiment_id)
    }

    pub fn experiment_dir(&self, experiment_id: &str) -> Utf8PathBuf {
        self.entry_dir.join(experiment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experiment {
    pub experiment_id: String,
    pub challenge_id: Challenge,
    pub data_category: DataCategory,
    pub libraries: Vec<FileAccession>,
    pub experiment_dir: Utf8PathBuf,
}

/// Loads entry and experiment metadata.
pub trait EntrySource {
    fn load_dir(&self, entry_dir: &Utf8Path) -> Result<Entry, LrgaspError>;

    /// Populate `entry.experiments` with the metadata of `experiment_ids`, in order.
    fn load_experiments_metadata(
        &self,
        entry: &mut Entry,
        experiment_ids: &[String],
    ) -> Result<(), LrgaspError>;
}

#[derive(Debug, Deserialize)]
struct EntryDocument {
    entry_id: String,
    team_id: String,
    challenge_id: Challenge,
    data_category: DataCategory,
    library_prep: LibraryPrep,
    platform: Platform,
    experiment_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExperimentDocument {
    experiment_id: String,
    challenge_id: Challenge,
    data_category: DataCategory,
    libraries: Vec<FileAccession>,
}

/// Reads `entry.json` and per-experiment `experiment.json` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEntrySource;

impl JsonEntrySource {
    fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, LrgaspError> {
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|_| LrgaspError::MetadataRead(path.to_path_buf()))?;
        serde_json::from_str(&content).map_err(|err| LrgaspError::MetadataParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

impl EntrySource for JsonEntrySource {
    fn load_dir(&self, entry_dir: &Utf8Path) -> Result<Entry, LrgaspError> {
        let doc: EntryDocument = Self::read_json(&entry_dir.join(ENTRY_JSON))?;
        Ok(Entry {
            entry_id: doc.entry_id,
            team_id: doc.team_id,
            challenge_id: doc.challenge_id,
            data_category: doc.data_category,
            library_prep: doc.library_prep,
            platform: doc.platform,
            experiment_ids: doc.experiment_ids,
            entry_dir: entry_dir.to_path_buf(),
            experiments: Vec::new(),
        })
    }

    fn load_experiments_metadata(
        &self,
        entry: &mut Entry,
        experiment_ids: &[String],
    ) -> Result<(), LrgaspError> {
        for experiment_id in experiment_ids {
            let experiment_dir = entry.experiment_dir(experiment_id);
            let path = experiment_dir.join(EXPERIMENT_JSON);
            let doc: ExperimentDocument = Self::read_json(&path)?;
            if doc.experiment_id != *experiment_id {
                return Err(LrgaspError::invalid(format!(
                    "experiment_id {} in {path} does not match directory name {experiment_id}",
                    doc.experiment_id
                )));
            }
            entry.experiments.push(Experiment {
                experiment_id: doc.experiment_id,
                challenge_id: doc.challenge_id,
                data_category: doc.data_category,
                libraries: doc.libraries,
                experiment_dir,
            });
        }
        Ok(())
    }
}
