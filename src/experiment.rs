//! Per-experiment validation: metadata consistency, library usage and data files.

use camino::Utf8PathBuf;
use tracing::debug;

use crate::catalog::SampleCatalog;
use crate::domain::{Challenge, set_to_str};
use crate::error::LrgaspError;
use crate::metadata::{Entry, Experiment};
use crate::reconcile::{check_bidirectional, check_membership};
use crate::rules::{challenge_samples, challenge_to_experiment_type};
use crate::tables::{
    DataLoader, DeNovoRnaIdSet, EXPRESSION_TSV, ExpressionMatrix, MODELS_GTF, ModelSet,
    READ_MODEL_MAP_TSV, RNA_FASTA, ReadModelMap,
};

const MODELS: &str = "models";
const READ_MODEL_MAP: &str = "read-model_map";
const RNA: &str = "rna";

/// Every non-wildcard transcript of the map must be a model and vice versa.
pub fn validate_model_and_read_mapping(
    models: &ModelSet,
    read_model_map: &ReadModelMap,
) -> Result<(), LrgaspError> {
    check_bidirectional(
        &read_model_map.transcript_ids(),
        READ_MODEL_MAP,
        &models.transcript_ids(),
        MODELS,
    )
}

pub fn validate_de_novo_rna_and_read_mapping(
    rna_ids: &DeNovoRnaIdSet,
    read_model_map: &ReadModelMap,
) -> Result<(), LrgaspError> {
    check_bidirectional(
        &read_model_map.transcript_ids(),
        READ_MODEL_MAP,
        &rna_ids.ids(),
        RNA,
    )
}

/// Every matrix row must name a model; models absent from the matrix are fine.
pub fn validate_expression_and_model(
    models: &ModelSet,
    expression: &ExpressionMatrix,
) -> Result<(), LrgaspError> {
    check_membership(
        expression.ids(),
        "expression matrix ID",
        |id| models.contains(id),
        MODELS,
    )
}

/// The experiment must declare the same challenge and data category as its entry.
pub fn validate_experiment_consistency(
    entry: &Entry,
    experiment: &Experiment,
) -> Result<(), LrgaspError> {
    if experiment.data_category != entry.data_category {
        return Err(LrgaspError::invalid(format!(
            "experiment {} data_category {} does not match entry {} data_category {}",
            experiment.experiment_id,
            experiment.data_category,
            entry.entry_id,
            entry.data_category
        )));
    }
    if experiment.challenge_id != entry.challenge_id {
        return Err(LrgaspError::invalid(format!(
            "experiment {} challenge_id {} does not match entry {} challenge_id {}",
            experiment.experiment_id, experiment.challenge_id, entry.entry_id, entry.challenge_id
        )));
    }
    Ok(())
}

/// Each library must come from a sample that belongs to the entry's challenge.
pub fn validate_experiment_libraries<C: SampleCatalog>(
    entry: &Entry,
    experiment: &Experiment,
    catalog: &C,
) -> Result<(), LrgaspError> {
    let valid_samples = challenge_samples(entry.challenge_id);
    for library in &experiment.libraries {
        let sample = catalog.get_run_by_file_acc(library)?.sample;
        if !valid_samples.contains(&sample) {
            return Err(LrgaspError::invalid(format!(
                "library {library} sample {sample} is not valid for challenge {}, expected one of {}",
                entry.challenge_id,
                set_to_str(&valid_samples)
            )));
        }
    }
    Ok(())
}

/// Load the experiment's data files and reconcile them for its challenge.
pub fn validate_experiment_data<D: DataLoader>(
    entry: &Entry,
    experiment: &Experiment,
    loader: &D,
) -> Result<(), LrgaspError> {
    let dir = &experiment.experiment_dir;
    let (files, result) = match experiment.challenge_id {
        Challenge::IsoDetectRef => {
            let files = [dir.join(MODELS_GTF), dir.join(READ_MODEL_MAP_TSV)];
            let result = loader.load_models(&files[0]).and_then(|models| {
                let read_model_map = loader.load_read_model_map(&files[1])?;
                validate_model_and_read_mapping(&models, &read_model_map)
            });
            (files, result)
        }
        Challenge::IsoDetectDeNovo => {
            let files = [dir.join(RNA_FASTA), dir.join(READ_MODEL_MAP_TSV)];
            let result = loader.load_de_novo_rna(&files[0]).and_then(|rna_ids| {
                let read_model_map = loader.load_read_model_map(&files[1])?;
                validate_de_novo_rna_and_read_mapping(&rna_ids, &read_model_map)
            });
            (files, result)
        }
        Challenge::IsoQuant => {
            let files = [dir.join(MODELS_GTF), dir.join(EXPRESSION_TSV)];
            let result = loader.load_models(&files[0]).and_then(|models| {
                let expression = loader.load_expression(&files[1], experiment)?;
                validate_expression_and_model(&models, &expression)
            });
            (files, result)
        }
    };
    result.map_err(|err| err.context(data_failure_message(entry, experiment, &files)))?;
    debug!(
        experiment_id = %experiment.experiment_id,
        experiment_type = ?challenge_to_experiment_type(experiment.challenge_id),
        "experiment data consistent"
    );
    Ok(())
}

fn data_failure_message(entry: &Entry, experiment: &Experiment, files: &[Utf8PathBuf]) -> String {
    format!(
        "entry {} experiment {} challenge {} validation failed on {} and {}",
        entry.entry_id, experiment.experiment_id, experiment.challenge_id, files[0], files[1]
    )
}
