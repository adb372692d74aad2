//! Total, never-failing identifier parser.
//!
//! Parsing runs in two phases. The structural phase finds the prefix and
//! splits off candidate segments; the validation phase checks the segment
//! count and every segment's alphabet, collecting every violation instead of
//! stopping at the first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::builder::build;
use super::error::ValidationError;
use super::grammar::{
    is_segment_char, DelimiterFamily, Prefix, PRIMARY_DELIMITER, SECONDARY_DELIMITER,
};

/// Error reported when no prefix can be recognized.
pub const UNKNOWN_PREFIX: &str = "unknown or missing prefix";

/// A structurally valid identifier: a prefix and its segments.
///
/// Only obtainable through [`parse`] or [`AssetKey::new`], so every value
/// satisfies the grammar. `Display` renders the canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    prefix: Prefix,
    segments: Vec<String>,
}

impl AssetKey {
    /// Build a key from explicit parts, validating eagerly.
    pub fn new<S: AsRef<str>>(prefix: Prefix, segments: &[S]) -> Result<Self, ValidationError> {
        build(prefix, segments)?;
        Ok(Self {
            prefix,
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix.token())?;
        if self.prefix.family() == DelimiterFamily::Dot {
            write!(f, "{}", PRIMARY_DELIMITER)?;
        }
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{}", PRIMARY_DELIMITER)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for AssetKey {
    type Err = Vec<String>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse(s) {
            ParseOutcome::Valid(key) => Ok(key),
            ParseOutcome::Invalid(failure) => Err(failure.errors),
        }
    }
}

impl Serialize for AssetKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssetKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|errors: Vec<String>| serde::de::Error::custom(errors.join("; ")))
    }
}

/// Everything known about an identifier that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    prefix: Option<Prefix>,
    segments: Vec<String>,
    errors: Vec<String>,
}

impl ParseFailure {
    /// The prefix, if the structural phase recognized one.
    pub fn prefix(&self) -> Option<Prefix> {
        self.prefix
    }

    /// Candidate segments as split from the input (empty if no prefix).
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every violation found. Never empty.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Result of [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Valid(AssetKey),
    Invalid(ParseFailure),
}

impl ParseOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn prefix(&self) -> Option<Prefix> {
        match self {
            Self::Valid(key) => Some(key.prefix),
            Self::Invalid(failure) => failure.prefix,
        }
    }

    pub fn segments(&self) -> &[String] {
        match self {
            Self::Valid(key) => &key.segments,
            Self::Invalid(failure) => &failure.segments,
        }
    }

    /// Violations, empty exactly when the outcome is valid.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(failure) => &failure.errors,
        }
    }

    pub fn key(&self) -> Option<&AssetKey> {
        match self {
            Self::Valid(key) => Some(key),
            Self::Invalid(_) => None,
        }
    }

    pub fn into_key(self) -> Option<AssetKey> {
        match self {
            Self::Valid(key) => Some(key),
            Self::Invalid(_) => None,
        }
    }
}

/// Flat wire shape: `{prefix, segments, valid, errors}`.
#[derive(Serialize)]
struct OutcomeView<'a> {
    prefix: Option<Prefix>,
    segments: &'a [String],
    valid: bool,
    errors: &'a [String],
}

impl Serialize for ParseOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OutcomeView {
            prefix: self.prefix(),
            segments: self.segments(),
            valid: self.is_valid(),
            errors: self.errors(),
        }
        .serialize(serializer)
    }
}

/// Parse any string into a [`ParseOutcome`]. Never panics.
///
/// The input is taken as-is: no trimming or lowercasing. Use
/// [`canonicalize`](super::canonicalize) first for authored text.
pub fn parse(input: &str) -> ParseOutcome {
    let Some((prefix, segments)) = split_structure(input) else {
        return ParseOutcome::Invalid(ParseFailure {
            prefix: None,
            segments: Vec::new(),
            errors: vec![UNKNOWN_PREFIX.to_string()],
        });
    };

    let errors = validate(input, prefix, &segments);
    if errors.is_empty() {
        ParseOutcome::Valid(AssetKey { prefix, segments })
    } else {
        ParseOutcome::Invalid(ParseFailure {
            prefix: Some(prefix),
            segments,
            errors,
        })
    }
}

fn split_structure(input: &str) -> Option<(Prefix, Vec<String>)> {
    if let Some(rest) = input.strip_prefix(Prefix::Metric.token()) {
        let segments = rest.split(PRIMARY_DELIMITER).map(str::to_string).collect();
        return Some((Prefix::Metric, segments));
    }

    let mut tokens = input.split(PRIMARY_DELIMITER);
    let head = tokens.next()?;
    let tail = tokens.next()?;
    let prefix = Prefix::from_dot_tokens(head, tail)?;
    Some((prefix, tokens.map(str::to_string).collect()))
}

fn validate(input: &str, prefix: Prefix, segments: &[String]) -> Vec<String> {
    let mut errors = Vec::new();

    if input.ends_with(PRIMARY_DELIMITER) {
        errors.push(format!("trailing delimiter '{}'", PRIMARY_DELIMITER));
    }

    let constraint = prefix.constraint();
    if !constraint.accepts(segments.len()) {
        errors.push(format!(
            "segment count mismatch: {} expects {} segments, found {}",
            prefix,
            constraint,
            segments.len()
        ));
    }

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            errors.push(format!("segment {} is empty", index));
        } else if !segment.chars().all(is_segment_char) {
            errors.push(format!(
                "segment {} ('{}') contains characters outside [a-z0-9_-/{{}}]",
                index,
                segment.escape_debug()
            ));
        }
    }

    if prefix.family() == DelimiterFamily::Dot && input.contains(SECONDARY_DELIMITER) {
        errors.push(format!(
            "secondary delimiter '{}' is reserved for the {} prefix",
            SECONDARY_DELIMITER,
            Prefix::Metric
        ));
    }

    errors
}
