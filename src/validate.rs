use camino::Utf8Path;
use tracing::{debug, info};

use crate::catalog::SampleCatalog;
use crate::consistency::validate_entry_consistency;
use crate::error::LrgaspError;
use crate::experiment::{
    validate_experiment_consistency, validate_experiment_data, validate_experiment_libraries,
};
use crate::metadata::{Entry, EntrySource, Experiment};
use crate::rules::challenge_desc;
use crate::tables::DataLoader;

#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Accept an entry that does not yet hold every experiment; skips entry-wide checks.
    pub allow_partial: bool,
    /// Validate only this experiment; implies partial validation.
    pub restrict_experiment_id: Option<String>,
}

impl ValidateOptions {
    pub fn restricted_to(experiment_id: impl Into<String>) -> Self {
        Self {
            allow_partial: false,
            restrict_experiment_id: Some(experiment_id.into()),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.allow_partial || self.restrict_experiment_id.is_some()
    }
}

/// Validates entries using the given metadata source, data loader and sample catalog.
#[derive(Clone)]
pub struct EntryValidator<E: EntrySource, D: DataLoader, C: SampleCatalog> {
    entries: E,
    loader: D,
    catalog: C,
}

impl<E: EntrySource, D: DataLoader, C: SampleCatalog> EntryValidator<E, D, C> {
    pub fn new(entries: E, loader: D, catalog: C) -> Self {
        Self {
            entries,
            loader,
            catalog,
        }
    }

    /// Load and validate all metadata and data files of the entry in `entry_dir`.
    ///
    /// The first failure aborts the run and is returned wrapped with the entry
    /// it belongs to.
    pub fn entry_data_validate(
        &self,
        entry_dir: &Utf8Path,
        options: &ValidateOptions,
    ) -> Result<Entry, LrgaspError> {
        let mut entry = self
            .entries
            .load_dir(entry_dir)
            .map_err(|err| err.context(format!("entry {entry_dir} validation failed")))?;
        info!(
            entry_id = %entry.entry_id,
            team_id = %entry.team_id,
            challenge = %entry.challenge_id,
            "validating entry for {}",
            challenge_desc(entry.challenge_id)
        );
        self.validate_entry(&mut entry, options)
            .map_err(|err| err.context(format!("entry {} validation failed", entry.entry_id)))?;
        info!(entry_id = %entry.entry_id, "entry valid");
        Ok(entry)
    }

    fn validate_entry(
        &self,
        entry: &mut Entry,
        options: &ValidateOptions,
    ) -> Result<(), LrgaspError> {
        let experiment_ids = match &options.restrict_experiment_id {
            Some(experiment_id) => {
                if !entry.has_experiment(experiment_id) {
                    return Err(LrgaspError::invalid(format!(
                        "entry {} does not contain experiment {experiment_id}",
                        entry.entry_id
                    )));
                }
                vec![experiment_id.clone()]
            }
            None => entry.experiment_ids.clone(),
        };
        self.entries.load_experiments_metadata(entry, &experiment_ids)?;

        for experiment in &entry.experiments {
            self.validate_experiment(entry, experiment)?;
        }

        if options.is_partial() {
            debug!(
                entry_id = %entry.entry_id,
                "partial validation, skipping entry consistency checks"
            );
            return Ok(());
        }
        validate_entry_consistency(entry, &self.catalog)
    }

    fn validate_experiment(
        &self,
        entry: &Entry,
        experiment: &Experiment,
    ) -> Result<(), LrgaspError> {
        debug!(experiment_id = %experiment.experiment_id, "validating experiment");
        validate_experiment_consistency(entry, experiment)?;
        validate_experiment_libraries(entry, experiment, &self.catalog)?;
        validate_experiment_data(entry, experiment, &self.loader)
    }
}
