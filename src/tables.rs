//! In-memory data tables of an experiment and the loader seam that produces them.

use std::collections::{BTreeSet, HashMap, HashSet};

use camino::Utf8Path;

use crate::error::LrgaspError;
use crate::metadata::Experiment;

pub const MODELS_GTF: &str = "models.gtf";
pub const READ_MODEL_MAP_TSV: &str = "read_model_map.tsv";
pub const EXPRESSION_TSV: &str = "expression.tsv";
pub const RNA_FASTA: &str = "rna.fasta";

/// Transcript id of reads not assigned to any model.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    pub transcript_id: String,
    pub gene_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    models: Vec<TranscriptModel>,
    by_transcript_id: HashMap<String, usize>,
}

impl ModelSet {
    pub fn new(models: Vec<TranscriptModel>) -> Result<Self, LrgaspError> {
        let mut by_transcript_id = HashMap::with_capacity(models.len());
        for (idx, model) in models.iter().enumerate() {
            if by_transcript_id
                .insert(model.transcript_id.clone(), idx)
                .is_some()
            {
                return Err(LrgaspError::invalid(format!(
                    "duplicate transcript_id {} in models",
                    model.transcript_id
                )));
            }
        }
        Ok(Self {
            models,
            by_transcript_id,
        })
    }

    pub fn get(&self, transcript_id: &str) -> Option<&TranscriptModel> {
        self.by_transcript_id
            .get(transcript_id)
            .map(|&idx| &self.models[idx])
    }

    pub fn contains(&self, transcript_id: &str) -> bool {
        self.by_transcript_id.contains_key(transcript_id)
    }

    pub fn transcript_ids(&self) -> BTreeSet<&str> {
        self.models
            .iter()
            .map(|model| model.transcript_id.as_str())
            .collect()
    }
}

/// A read and the model it was assigned to; `None` is the `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadModelPair {
    pub read_id: String,
    pub transcript_id: Option<String>,
}

impl ReadModelPair {
    pub fn new(read_id: impl Into<String>, transcript_id: &str) -> Self {
        let transcript_id = (transcript_id != WILDCARD).then(|| transcript_id.to_string());
        Self {
            read_id: read_id.into(),
            transcript_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadModelMap {
    pairs: Vec<ReadModelPair>,
    by_transcript_id: HashMap<String, Vec<usize>>,
}

impl ReadModelMap {
    pub fn new(pairs: Vec<ReadModelPair>) -> Self {
        let mut by_transcript_id: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, pair) in pairs.iter().enumerate() {
            if let Some(transcript_id) = &pair.transcript_id {
                by_transcript_id
                    .entry(transcript_id.clone())
                    .or_default()
                    .push(idx);
            }
        }
        Self {
            pairs,
            by_transcript_id,
        }
    }

    pub fn get_by_transcript_id(&self, transcript_id: &str) -> Vec<&ReadModelPair> {
        self.by_transcript_id
            .get(transcript_id)
            .map(|idxs| idxs.iter().map(|&idx| &self.pairs[idx]).collect())
            .unwrap_or_default()
    }

    /// Distinct assigned transcript ids; wildcard pairs are skipped.
    pub fn transcript_ids(&self) -> BTreeSet<&str> {
        self.by_transcript_id.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Identifiers of transcripts assembled without a reference genome.
#[derive(Debug, Clone, Default)]
pub struct DeNovoRnaIdSet {
    ids: HashSet<String>,
}

impl DeNovoRnaIdSet {
    pub fn new(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn ids(&self) -> BTreeSet<&str> {
        self.ids.iter().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionRow {
    pub id: String,
    pub values: Vec<f64>,
}

/// Quantification table: one row per transcript, one column per replicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<ExpressionRow>,
}

impl ExpressionMatrix {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.id.as_str())
    }
}

/// Parses experiment data files into tables.
pub trait DataLoader {
    fn load_models(&self, path: &Utf8Path) -> Result<ModelSet, LrgaspError>;
    fn load_read_model_map(&self, path: &Utf8Path) -> Result<ReadModelMap, LrgaspError>;
    fn load_de_novo_rna(&self, path: &Utf8Path) -> Result<DeNovoRnaIdSet, LrgaspError>;
    fn load_expression(
        &self,
        path: &Utf8Path,
        experiment: &Experiment,
    ) -> Result<ExpressionMatrix, LrgaspError>;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn model(id: &str) -> TranscriptModel {
        TranscriptModel {
            transcript_id: id.to_string(),
            gene_id: "G1".to_string(),
        }
    }

    #[test]
    fn duplicate_transcript_ids_rejected() {
        let err = ModelSet::new(vec![model("T1"), model("T1")]).unwrap_err();
        assert_matches!(err, LrgaspError::Invalid(msg) if msg.contains("duplicate transcript_id T1"));
    }

    #[test]
    fn wildcard_is_unassigned() {
        let map = ReadModelMap::new(vec![
            ReadModelPair::new("r1", "T1"),
            ReadModelPair::new("r2", "*"),
            ReadModelPair::new("r3", "T1"),
        ]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.transcript_ids(), BTreeSet::from(["T1"]));
        assert_eq!(map.get_by_transcript_id("T1").len(), 2);
        assert!(map.get_by_transcript_id(WILDCARD).is_empty());
    }

    #[test]
    fn model_lookup() {
        let models = ModelSet::new(vec![model("T1"), model("T2")]).unwrap();
        assert!(models.contains("T2"));
        assert_eq!(models.get("T1").map(|m| m.gene_id.as_str()), Some("G1"));
        assert!(models.get("T3").is_none());
    }
}
