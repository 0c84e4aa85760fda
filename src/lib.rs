//! Consistency validation of LRGASP challenge entries.
//!
//! An entry's experiments are checked against their challenge: transcript
//! models, read-model maps, de novo RNA sets and expression matrices must
//! agree with each other, and the sequencing libraries used must come from
//! samples valid for the challenge. Outside the freestyle category the entry
//! as a whole must also cover its samples with a single library prep and
//! platform.

pub mod catalog;
pub mod consistency;
pub mod domain;
pub mod error;
pub mod experiment;
pub mod metadata;
pub mod reconcile;
pub mod rules;
pub mod tables;
pub mod validate;

pub use error::LrgaspError;
pub use validate::{EntryValidator, ValidateOptions};
