//! Lineage edge types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Free-form edge annotations (source file, scanner name, ...).
pub type EdgeMetadata = BTreeMap<String, serde_json::Value>;

/// Relationship label of a lineage edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A's values are computed into B (column mappings, casts).
    Transforms,
    /// B loads data from A wholesale.
    Ingests,
    /// B is derived from A in some unspecified way.
    Derives,
    /// A is exposed through B (a view, report or API).
    Serves,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::Transforms,
        EdgeKind::Ingests,
        EdgeKind::Derives,
        EdgeKind::Serves,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transforms => "transforms",
            Self::Ingests => "ingests",
            Self::Derives => "derives",
            Self::Serves => "serves",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A typed, directed edge between two identifiers.
///
/// Examples:
/// - `db.col.afenda.public.invoices.amount` TRANSFORMS `db.col.afenda.mart.revenue.total`
/// - `db.rec.afenda.public.invoices` SERVES `ui.report.finance.ar_aging`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageEdge {
    /// Source identifier (upstream)
    #[serde(alias = "from_identifier")]
    pub from: String,
    /// Target identifier (downstream)
    #[serde(alias = "to_identifier")]
    pub to: String,
    /// Relationship label
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EdgeMetadata>,
}

impl LineageEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            metadata: None,
        }
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata
            .get_or_insert_with(EdgeMetadata::new)
            .insert(key.into(), value.into());
        self
    }
}

/// An edge as produced by a scanner: the kind may still be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEdge {
    #[serde(alias = "from_identifier")]
    pub from: String,
    #[serde(alias = "to_identifier")]
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EdgeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EdgeMetadata>,
}

impl CandidateEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: None,
            metadata: None,
        }
    }

    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Promote to a full edge with the given kind.
    pub fn into_edge(self, kind: EdgeKind) -> LineageEdge {
        LineageEdge {
            from: self.from,
            to: self.to,
            kind,
            metadata: self.metadata,
        }
    }
}

impl From<LineageEdge> for CandidateEdge {
    fn from(edge: LineageEdge) -> Self {
        Self {
            from: edge.from,
            to: edge.to,
            kind: Some(edge.kind),
            metadata: edge.metadata,
        }
    }
}
