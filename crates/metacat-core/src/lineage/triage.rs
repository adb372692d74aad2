//! Batch triage of scanner-produced candidate edges.
//!
//! Every candidate ends up in exactly one of `accepted` or `rejected`;
//! nothing is dropped.

use serde::Serialize;
use tracing::debug;

use crate::config::LineageConfig;

use super::edge::{CandidateEdge, LineageEdge};
use super::inference::{infer_edge_kind, InferredKind};
use super::validate::check_endpoints;

/// A candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedEdge {
    pub edge: LineageEdge,
    /// Present when the kind was inferred rather than supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<InferredKind>,
}

/// A candidate that failed validation, with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEdge {
    pub index: usize,
    pub candidate: CandidateEdge,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriageReport {
    pub accepted: Vec<AcceptedEdge>,
    pub rejected: Vec<RejectedEdge>,
}

impl TriageReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Clone out the accepted edges, e.g. to feed graph analysis.
    pub fn edges(&self) -> Vec<LineageEdge> {
        self.accepted.iter().map(|a| a.edge.clone()).collect()
    }
}

/// Validate every candidate and resolve missing kinds.
pub fn triage<I>(candidates: I, config: &LineageConfig) -> TriageReport
where
    I: IntoIterator<Item = CandidateEdge>,
{
    let mut report = TriageReport::default();

    for (index, candidate) in candidates.into_iter().enumerate() {
        let (from, to) = match check_endpoints(&candidate.from, &candidate.to) {
            Ok(keys) => keys,
            Err(errors) => {
                report.rejected.push(RejectedEdge {
                    index,
                    candidate,
                    errors,
                });
                continue;
            }
        };

        if let Some(kind) = candidate.kind {
            report.accepted.push(AcceptedEdge {
                edge: candidate.into_edge(kind),
                inferred: None,
            });
            continue;
        }

        if !config.infer_missing_kinds {
            report.rejected.push(RejectedEdge {
                index,
                candidate,
                errors: vec!["edge kind missing and inference is disabled".to_string()],
            });
            continue;
        }

        let inferred = infer_edge_kind(&from, &to);
        if inferred.confidence < config.min_confidence {
            let error = format!(
                "inferred kind '{}' has confidence {:.2}, below minimum {:.2} ({})",
                inferred.kind, inferred.confidence, config.min_confidence, inferred.rationale
            );
            report.rejected.push(RejectedEdge {
                index,
                candidate,
                errors: vec![error],
            });
            continue;
        }

        report.accepted.push(AcceptedEdge {
            edge: candidate.into_edge(inferred.kind),
            inferred: Some(inferred),
        });
    }

    debug!(
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        "triaged candidate edges"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::EdgeKind;

    const TABLE: &str = "db.rec.afenda.public.invoices";
    const OTHER_TABLE: &str = "db.rec.afenda.mart.invoices";
    const VIEW: &str = "db.view.afenda.public.open_invoices";

    #[test]
    fn test_supplied_kind_is_kept() {
        let report = triage(
            [CandidateEdge::new(TABLE, OTHER_TABLE).with_kind(EdgeKind::Derives)],
            &LineageConfig::default(),
        );
        assert!(report.is_clean());
        assert_eq!(report.accepted[0].edge.kind, EdgeKind::Derives);
        assert!(report.accepted[0].inferred.is_none());
    }

    #[test]
    fn test_missing_kind_is_inferred() {
        let report = triage([CandidateEdge::new(TABLE, VIEW)], &LineageConfig::default());
        let accepted = &report.accepted[0];
        assert_eq!(accepted.edge.kind, EdgeKind::Serves);
        assert_eq!(accepted.inferred.as_ref().map(|i| i.confidence), Some(1.0));
    }

    #[test]
    fn test_invalid_edges_reported_with_index() {
        let report = triage(
            [
                CandidateEdge::new(TABLE, VIEW),
                CandidateEdge::new(TABLE, TABLE),
                CandidateEdge::new("bogus", VIEW),
            ],
            &LineageConfig::default(),
        );
        assert_eq!(report.accepted.len(), 1);
        let indexes: Vec<_> = report.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indexes, [1, 2]);
    }

    #[test]
    fn test_inference_disabled() {
        let config = LineageConfig {
            infer_missing_kinds: false,
            ..LineageConfig::default()
        };
        let report = triage([CandidateEdge::new(TABLE, VIEW)], &config);
        assert!(report.accepted.is_empty());
        assert!(report.rejected[0].errors[0].contains("inference is disabled"));
    }

    #[test]
    fn test_min_confidence_rejects_ambiguous_guess() {
        let config = LineageConfig {
            min_confidence: 0.75,
            ..LineageConfig::default()
        };
        let report = triage(
            [
                CandidateEdge::new(TABLE, OTHER_TABLE),
                CandidateEdge::new(TABLE, VIEW),
            ],
            &config,
        );
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.rejected[0].index, 0);
        assert!(report.rejected[0].errors[0].contains("0.60"));
    }
}
