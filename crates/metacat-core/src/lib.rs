pub mod config;
pub mod identifier;
pub mod lineage;

pub use config::{Config, ConfigError, LineageConfig, OutputConfig, OutputFormat};
pub use identifier::{
    assert_type_matches, build, canonicalize, derive_asset_type, parse, AssetKey, AssetType,
    ConsistencyError, ParseOutcome, Prefix, StructuralError, ValidationError,
};
pub use lineage::{
    analyze_edges, infer_edge_kind, triage, validate_edge, CandidateEdge, EdgeKind,
    GraphAnalysis, InferredKind, LineageEdge, LineageGraph, TriageReport,
};
