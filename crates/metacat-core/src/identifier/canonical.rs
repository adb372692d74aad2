//! Strict, fail-fast normalization of raw identifier text.

use super::error::StructuralError;
use super::grammar::{Prefix, PRIMARY_DELIMITER, SECONDARY_DELIMITER};

/// Normalize raw identifier text.
///
/// Trims surrounding whitespace and lowercases, then rejects structurally
/// malformed text instead of repairing it. Segment counts and the segment
/// alphabet are left to [`parse`](super::parse).
///
/// The result is a fixed point: canonicalizing it again returns it unchanged.
pub fn canonicalize(raw: &str) -> Result<String, StructuralError> {
    let text = raw.trim().to_lowercase();

    if text.contains("..") {
        return Err(StructuralError::EmptySegment(text));
    }
    if text.ends_with(PRIMARY_DELIMITER) {
        return Err(StructuralError::TrailingDelimiter(text));
    }

    if let Some(rest) = text.strip_prefix(Prefix::Metric.token()) {
        if rest.is_empty() {
            return Err(StructuralError::EmptyMetric(text));
        }
        if rest.contains(SECONDARY_DELIMITER) {
            return Err(StructuralError::RepeatedSecondaryDelimiter(text));
        }
        if rest.starts_with(PRIMARY_DELIMITER) {
            return Err(StructuralError::LeadingDelimiter(text));
        }
        return Ok(text);
    }

    let mut parts = text.splitn(3, PRIMARY_DELIMITER);
    let prefix = match (parts.next(), parts.next()) {
        (Some(head), Some(tail)) => Prefix::from_dot_tokens(head, tail),
        _ => None,
    };
    if prefix.is_none() {
        return Err(StructuralError::UnknownPrefix(text));
    }
    if text.contains(SECONDARY_DELIMITER) {
        return Err(StructuralError::SecondaryDelimiter(text));
    }
    if parts.next().is_none() {
        return Err(StructuralError::MissingSegments(text));
    }

    Ok(text)
}
