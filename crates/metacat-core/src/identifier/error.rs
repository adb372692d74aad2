//! Identifier error types.
//!
//! Only the fail-fast entry points return these. The parser never fails; it
//! reports problems inside [`ParseOutcome`](super::ParseOutcome).

use thiserror::Error;

use super::asset_type::AssetType;
use super::grammar::{GrammarConstraint, Prefix};

/// Raised by [`canonicalize`](super::canonicalize) for malformed raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Two primary delimiters in a row.
    #[error("empty segment in '{0}': doubled delimiter '..'")]
    EmptySegment(String),

    /// Text ends with the primary delimiter.
    #[error("trailing delimiter in '{0}'")]
    TrailingDelimiter(String),

    /// Text after the prefix starts with the primary delimiter.
    #[error("leading delimiter after prefix in '{0}'")]
    LeadingDelimiter(String),

    /// `:` used outside the `metric:` prefix.
    #[error("secondary delimiter ':' is reserved for the metric: prefix, found in '{0}'")]
    SecondaryDelimiter(String),

    /// `metric:` followed by nothing.
    #[error("metric identifier '{0}' has no segments after ':'")]
    EmptyMetric(String),

    /// `metric:` remainder containing another `:`.
    #[error("metric identifier '{0}' contains a second ':'")]
    RepeatedSecondaryDelimiter(String),

    /// A recognized prefix with nothing after it.
    #[error("identifier '{0}' has a prefix but no segments")]
    MissingSegments(String),

    /// No recognized prefix at the start of the text.
    #[error("unknown or missing prefix in '{0}'")]
    UnknownPrefix(String),
}

/// Raised by [`build`](super::build) for an explicitly constructed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Segment count outside the prefix's constraint.
    #[error("{prefix} expects {constraint} segments, got {actual}")]
    SegmentCount {
        prefix: Prefix,
        constraint: GrammarConstraint,
        actual: usize,
    },

    /// A segment that is the empty string.
    #[error("segment {index} is empty")]
    EmptySegment { index: usize },

    /// A segment with a character outside `[a-z0-9_\-/{}]`.
    #[error("segment {index} ('{segment}') contains invalid character '{found}'")]
    InvalidCharacter {
        index: usize,
        segment: String,
        found: char,
    },
}

/// Raised by [`assert_type_matches`](super::assert_type_matches).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// The identifier parses but derives a different type.
    #[error("asset type mismatch for '{identifier}': claimed {claimed}, derived {derived}")]
    TypeMismatch {
        identifier: String,
        claimed: AssetType,
        derived: AssetType,
    },

    /// The identifier is invalid, so no type can be derived.
    #[error("cannot derive asset type for invalid identifier '{identifier}' (claimed {claimed})")]
    Underivable { identifier: String, claimed: AssetType },
}
