//! Two-way reconciliation of transcript identifier sets.

use std::collections::BTreeSet;

use crate::error::LrgaspError;

/// Require `a` and `b` to contain exactly the same identifiers.
///
/// `a ⊆ b` is checked before `b ⊆ a`; within each direction the smallest
/// offending identifier is reported.
pub fn check_bidirectional(
    a: &BTreeSet<&str>,
    a_source: &str,
    b: &BTreeSet<&str>,
    b_source: &str,
) -> Result<(), LrgaspError> {
    check_subset(a, a_source, b, b_source)?;
    check_subset(b, b_source, a, a_source)
}

fn check_subset(
    ids: &BTreeSet<&str>,
    ids_source: &str,
    target: &BTreeSet<&str>,
    target_source: &str,
) -> Result<(), LrgaspError> {
    match ids.difference(target).next() {
        Some(id) => Err(LrgaspError::invalid(format!(
            "transcript in {ids_source} {id} not in {target_source}"
        ))),
        None => Ok(()),
    }
}

/// Require every identifier yielded by `ids` to satisfy `contains`.
pub fn check_membership<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    what: &str,
    contains: impl Fn(&str) -> bool,
    target_source: &str,
) -> Result<(), LrgaspError> {
    for id in ids {
        if !contains(id) {
            return Err(LrgaspError::invalid(format!(
                "{what} {id} not found in {target_source}"
            )));
        }
    }
    Ok(())
}
