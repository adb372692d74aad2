//! Heuristic edge-kind inference from endpoint shapes.
//!
//! This is a fixed decision table over `(from prefix, to prefix)`, not a
//! proof. Callers that know the relationship should supply the kind and skip
//! inference entirely.

use serde::Serialize;

use crate::identifier::{AssetKey, Prefix};

use super::edge::EdgeKind;

/// Leading column segments that name the owning table.
const TABLE_SEGMENTS: usize = 3;

/// A best-guess edge kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferredKind {
    pub kind: EdgeKind,
    /// In `[0, 1]`.
    pub confidence: f64,
    /// One line explaining the guess.
    pub rationale: String,
}

impl InferredKind {
    fn new(kind: EdgeKind, confidence: f64, rationale: impl Into<String>) -> Self {
        Self {
            kind,
            confidence,
            rationale: rationale.into(),
        }
    }
}

/// Infer the relationship between two parsed endpoints.
pub fn infer_edge_kind(from: &AssetKey, to: &AssetKey) -> InferredKind {
    match (from.prefix(), to.prefix()) {
        (Prefix::Column, Prefix::Column) if same_table(from, to) => InferredKind::new(
            EdgeKind::Transforms,
            1.0,
            "column to column within the same table",
        ),
        (Prefix::Column, Prefix::Column) => InferredKind::new(
            EdgeKind::Transforms,
            0.9,
            "column to column across tables",
        ),
        (Prefix::Table, Prefix::Table) => InferredKind::new(
            EdgeKind::Ingests,
            0.6,
            "table to table is ambiguous: ingests or derives; supply a kind to override",
        ),
        (Prefix::Table, Prefix::Column) => InferredKind::new(
            EdgeKind::Transforms,
            0.9,
            "table feeding a column",
        ),
        (Prefix::Table, Prefix::View) => {
            InferredKind::new(EdgeKind::Serves, 1.0, "table exposed through a view")
        }
        (Prefix::Table, Prefix::Report) => {
            InferredKind::new(EdgeKind::Serves, 1.0, "table rendered by a report")
        }
        (Prefix::BusinessObject, Prefix::Api) => InferredKind::new(
            EdgeKind::Serves,
            1.0,
            "business object exposed through an api",
        ),
        (Prefix::Column, Prefix::Api) => {
            InferredKind::new(EdgeKind::Serves, 0.85, "column returned by an api")
        }
        (f, t) => InferredKind::new(
            EdgeKind::Derives,
            0.5,
            format!("no rule for {} -> {}; defaulting to derives", f, t),
        ),
    }
}

fn same_table(a: &AssetKey, b: &AssetKey) -> bool {
    let (a, b) = (a.segments(), b.segments());
    a.len() >= TABLE_SEGMENTS
        && b.len() >= TABLE_SEGMENTS
        && a[..TABLE_SEGMENTS] == b[..TABLE_SEGMENTS]
}
