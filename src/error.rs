use std::error::Error as _;

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LrgaspError {
    #[error("{0}")]
    Invalid(String),

    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: Box<LrgaspError>,
    },

    #[error("library {0} not found in LRGASP RNA-Seq metadata")]
    UnknownLibrary(String),

    #[error("invalid file accession: {0}")]
    InvalidAccession(String),

    #[error("invalid {kind} identifier: {value}")]
    InvalidSymbol { kind: &'static str, value: String },

    #[error("failed to read metadata file at {0}")]
    MetadataRead(Utf8PathBuf),

    #[error("failed to parse metadata {path}: {message}")]
    MetadataParse { path: Utf8PathBuf, message: String },

    #[error("failed to load {path}: {message}")]
    DataLoad { path: Utf8PathBuf, message: String },
}

impl LrgaspError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LrgaspError::Invalid(message.into())
    }

    /// Wrap `self` as the cause of a broader failure.
    pub fn context(self, message: impl Into<String>) -> Self {
        LrgaspError::Context {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error of the cause chain.
    pub fn root_cause(&self) -> &LrgaspError {
        match self {
            LrgaspError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// All messages from this error down to the root cause, joined with `: `.
    pub fn chain(&self) -> String {
        let mut parts = vec![self.to_string()];
        let mut current = self.source();
        while let Some(err) = current {
            parts.push(err.to_string());
            current = err.source();
        }
        parts.join(": ")
    }
}
