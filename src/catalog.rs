use std::collections::HashMap;
use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::domain::{FileAccession, LibraryPrep, Platform, Sample};
use crate::error::LrgaspError;

/// One sequencing run of the LRGASP reference RNA-Seq data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub run_acc: String,
    pub sample: Sample,
    pub library_prep: LibraryPrep,
    pub platform: Platform,
    #[serde(default)]
    pub files: Vec<FileAccession>,
}

/// Read-only view of the reference RNA-Seq metadata.
pub trait SampleCatalog {
    fn get_run_by_file_acc(&self, file_acc: &FileAccession) -> Result<&Run, LrgaspError>;
    fn get_runs_by_prep_platform(
        &self,
        library_prep: LibraryPrep,
        platform: Platform,
    ) -> Vec<&Run>;
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    runs: Vec<Run>,
}

#[derive(Debug, Clone, Default)]
pub struct RnaSeqCatalog {
    runs: Vec<Run>,
    by_file_acc: HashMap<FileAccession, usize>,
}

impl RnaSeqCatalog {
    pub fn new(runs: Vec<Run>) -> Self {
        let by_file_acc = runs
            .iter()
            .enumerate()
            .flat_map(|(idx, run)| run.files.iter().map(move |acc| (acc.clone(), idx)))
            .collect();
        Self { runs, by_file_acc }
    }

    pub fn load(path: &Utf8Path) -> Result<Self, LrgaspError> {
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|_| LrgaspError::MetadataRead(path.to_path_buf()))?;
        Self::from_json(path, &content)
    }

    pub fn from_json(path: &Utf8Path, content: &str) -> Result<Self, LrgaspError> {
        let document: CatalogDocument =
            serde_json::from_str(content).map_err(|err| LrgaspError::MetadataParse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        Ok(Self::new(document.runs))
    }
}

impl SampleCatalog for RnaSeqCatalog {
    fn get_run_by_file_acc(&self, file_acc: &FileAccession) -> Result<&Run, LrgaspError> {
        self.by_file_acc
            .get(file_acc)
            .map(|&idx| &self.runs[idx])
            .ok_or_else(|| LrgaspError::UnknownLibrary(file_acc.to_string()))
    }

    fn get_runs_by_prep_platform(
        &self,
        library_prep: LibraryPrep,
        platform: Platform,
    ) -> Vec<&Run> {
        self.runs
            .iter()
            .filter(|run| run.library_prep == library_prep && run.platform == platform)
            .collect()
    }
}
