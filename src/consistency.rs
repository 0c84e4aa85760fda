//! Entry-wide consistency of sample coverage, library prep and platform.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::{Run, SampleCatalog};
use crate::domain::{DataCategory, LibraryPrep, Platform, Sample, set_to_str};
use crate::error::LrgaspError;
use crate::metadata::Entry;
use crate::rules::{challenge_samples, data_category_platforms, is_long_read_platform};

/// Samples, preps and platforms actually used by an entry's libraries.
///
/// Preps and platforms only count long-read libraries and libraries on the
/// entry's own platform, so the short-read half of a `long_short` entry is
/// left out of the uniformity checks. Samples count every library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUsage {
    pub samples: BTreeSet<Sample>,
    pub library_preps: BTreeSet<LibraryPrep>,
    pub platforms: BTreeSet<Platform>,
}

impl EntryUsage {
    pub fn collect<C: SampleCatalog>(entry: &Entry, catalog: &C) -> Result<Self, LrgaspError> {
        let mut usage = Self::default();
        for experiment in &entry.experiments {
            for library in &experiment.libraries {
                usage.add(entry, catalog.get_run_by_file_acc(library)?);
            }
        }
        Ok(usage)
    }

    fn add(&mut self, entry: &Entry, run: &Run) {
        self.samples.insert(run.sample);
        if run.platform == entry.platform || is_long_read_platform(run.platform) {
            self.library_preps.insert(run.library_prep);
            self.platforms.insert(run.platform);
        }
    }
}

/// Samples an entry is expected to cover given its declared prep, platform,
/// data category and challenge.
pub fn required_entry_samples<C: SampleCatalog>(entry: &Entry, catalog: &C) -> BTreeSet<Sample> {
    let category_platforms = data_category_platforms(entry.data_category);
    let available = catalog
        .get_runs_by_prep_platform(entry.library_prep, entry.platform)
        .into_iter()
        .filter(|run| category_platforms.contains(&run.platform))
        .map(|run| run.sample)
        .collect::<BTreeSet<_>>();
    available
        .intersection(&challenge_samples(entry.challenge_id))
        .copied()
        .collect()
}

pub fn validate_entry_samples(
    entry: &Entry,
    required: &BTreeSet<Sample>,
    found: &BTreeSet<Sample>,
) -> Result<(), LrgaspError> {
    if required != found {
        return Err(LrgaspError::invalid(format!(
            "entry {} must use all of the samples available for challenge {} library_prep {} platform {}: required {{{}}}, found {{{}}}",
            entry.entry_id,
            entry.challenge_id,
            entry.library_prep,
            entry.platform,
            set_to_str(required),
            set_to_str(found)
        )));
    }
    Ok(())
}

pub fn validate_entry_library_preps(
    entry: &Entry,
    library_preps: &BTreeSet<LibraryPrep>,
) -> Result<(), LrgaspError> {
    if library_preps.len() > 1 {
        return Err(LrgaspError::invalid(format!(
            "entry {} must use only one library_prep across experiments, found {{{}}}",
            entry.entry_id,
            set_to_str(library_preps)
        )));
    }
    Ok(())
}

pub fn validate_entry_platforms(
    entry: &Entry,
    platforms: &BTreeSet<Platform>,
) -> Result<(), LrgaspError> {
    if platforms.len() > 1 {
        return Err(LrgaspError::invalid(format!(
            "entry {} must use only one platform across experiments, found {{{}}}",
            entry.entry_id,
            set_to_str(platforms)
        )));
    }
    Ok(())
}

/// Run the entry-wide checks over all loaded experiments; freestyle entries are exempt.
pub fn validate_entry_consistency<C: SampleCatalog>(
    entry: &Entry,
    catalog: &C,
) -> Result<(), LrgaspError> {
    if entry.data_category == DataCategory::Freestyle {
        debug!(entry_id = %entry.entry_id, "freestyle entry, skipping consistency checks");
        return Ok(());
    }
    let usage = EntryUsage::collect(entry, catalog)?;
    let required = required_entry_samples(entry, catalog);
    validate_entry_library_preps(entry, &usage.library_preps)?;
    validate_entry_platforms(entry, &usage.platforms)?;
    validate_entry_samples(entry, &required, &usage.samples)
}
