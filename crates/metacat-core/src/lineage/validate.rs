//! Edge validation. Never fails; problems come back as an error list.

use serde::Serialize;

use crate::identifier::{parse, AssetKey, ParseOutcome};

use super::edge::LineageEdge;

/// Error reported for an edge whose endpoints are textually identical.
pub const SELF_LOOP: &str = "self-loop: from and to identifiers are identical";

/// Outcome of validating one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeValidation {
    valid: bool,
    errors: Vec<String>,
}

impl EdgeValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Validate an edge given its two endpoint identifiers.
pub fn validate_edge(from: &str, to: &str) -> EdgeValidation {
    match check_endpoints(from, to) {
        Ok(_) => EdgeValidation::from_errors(Vec::new()),
        Err(errors) => EdgeValidation::from_errors(errors),
    }
}

/// Validate a fully formed [`LineageEdge`].
pub fn validate_lineage_edge(edge: &LineageEdge) -> EdgeValidation {
    validate_edge(&edge.from, &edge.to)
}

/// Parse both endpoints and reject self-loops, returning the parsed keys.
pub(crate) fn check_endpoints(from: &str, to: &str) -> Result<(AssetKey, AssetKey), Vec<String>> {
    let mut errors = Vec::new();

    let from_key = collect(parse(from), "from", &mut errors);
    let to_key = collect(parse(to), "to", &mut errors);

    if from == to {
        errors.push(SELF_LOOP.to_string());
    }

    match (from_key, to_key) {
        (Some(f), Some(t)) if errors.is_empty() => Ok((f, t)),
        _ => Err(errors),
    }
}

fn collect(outcome: ParseOutcome, side: &str, errors: &mut Vec<String>) -> Option<AssetKey> {
    match outcome {
        ParseOutcome::Valid(key) => Some(key),
        ParseOutcome::Invalid(failure) => {
            errors.extend(
                failure
                    .errors()
                    .iter()
                    .map(|e| format!("invalid {} identifier: {}", side, e)),
            );
            None
        }
    }
}
