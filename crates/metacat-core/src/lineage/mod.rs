//! Lineage engine: directed, typed edges between catalog identifiers.
//!
//! - [`validate_edge`] - total edge check (both endpoints valid, no self-loop)
//! - [`infer_edge_kind`] - heuristic kind + confidence from endpoint shapes
//! - [`triage`] - validate and resolve a scanner batch in one pass
//! - [`LineageGraph`] - topological order, cycle recovery, up/downstream walks
//!
//! Validation, triage and analysis never fail: bulk input from scanners can
//! be filtered without wrapping each item in error handling.

mod edge;
mod graph;
mod inference;
mod triage;
mod validate;

pub use edge::{CandidateEdge, EdgeKind, EdgeMetadata, LineageEdge};
pub use graph::{analyze_edges, GraphAnalysis, LineageGraph};
pub use inference::{infer_edge_kind, InferredKind};
pub use triage::{triage, AcceptedEdge, RejectedEdge, TriageReport};
pub use validate::{validate_edge, validate_lineage_edge, EdgeValidation, SELF_LOOP};
