//! Assemble canonical identifiers from known parts.

use super::error::ValidationError;
use super::grammar::{is_segment_char, DelimiterFamily, Prefix, PRIMARY_DELIMITER};

/// Build the canonical identifier for `prefix` and `segments`.
///
/// Fails on the first violation: segment count first, then each segment in
/// order. The output always parses back to exactly `prefix` and `segments`.
pub fn build<S: AsRef<str>>(prefix: Prefix, segments: &[S]) -> Result<String, ValidationError> {
    let constraint = prefix.constraint();
    if !constraint.accepts(segments.len()) {
        return Err(ValidationError::SegmentCount {
            prefix,
            constraint,
            actual: segments.len(),
        });
    }

    for (index, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        if segment.is_empty() {
            return Err(ValidationError::EmptySegment { index });
        }
        if let Some(found) = segment.chars().find(|c| !is_segment_char(*c)) {
            return Err(ValidationError::InvalidCharacter {
                index,
                segment: segment.to_string(),
                found,
            });
        }
    }

    let separator = PRIMARY_DELIMITER.to_string();
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(&separator);

    Ok(match prefix.family() {
        DelimiterFamily::Dot => format!("{}{}{}", prefix.token(), PRIMARY_DELIMITER, joined),
        DelimiterFamily::Colon => format!("{}{}", prefix.token(), joined),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dot_family() {
        assert_eq!(
            build(Prefix::Table, &["afenda", "public", "invoices"]).unwrap(),
            "db.rec.afenda.public.invoices"
        );
        assert_eq!(
            build(Prefix::Pipeline, &["airflow", "nightly_load", "year_{yyyy}"]).unwrap(),
            "etl.job.airflow.nightly_load.year_{yyyy}"
        );
    }

    #[test]
    fn test_build_metric() {
        assert_eq!(build(Prefix::Metric, &["revenue"]).unwrap(), "metric:revenue");
        assert_eq!(
            build(Prefix::Metric, &["a", "b", "c", "d", "e"]).unwrap(),
            "metric:a.b.c.d.e"
        );
    }

    #[test]
    fn test_rejects_count() {
        let err = build(Prefix::Table, &["afenda", "public"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SegmentCount {
                prefix: Prefix::Table,
                constraint: Prefix::Table.constraint(),
                actual: 2,
            }
        );
        assert!(build::<&str>(Prefix::Metric, &[]).is_err());
    }

    #[test]
    fn test_rejects_first_bad_segment() {
        assert_eq!(
            build(Prefix::Table, &["afenda", "", "Bad"]).unwrap_err(),
            ValidationError::EmptySegment { index: 1 }
        );
        assert_eq!(
            build(Prefix::Table, &["afenda", "pub.lic", "x"]).unwrap_err(),
            ValidationError::InvalidCharacter {
                index: 1,
                segment: "pub.lic".to_string(),
                found: '.',
            }
        );
    }
}
