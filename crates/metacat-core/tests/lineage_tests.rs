use metacat_core::lineage::{validate_lineage_edge, SELF_LOOP};
use metacat_core::{
    analyze_edges, infer_edge_kind, parse, triage, validate_edge, AssetKey, CandidateEdge,
    EdgeKind, LineageConfig, LineageEdge, LineageGraph,
};

const INVOICES: &str = "db.rec.afenda.public.invoices";
const INVOICES_MART: &str = "db.rec.afenda.mart.invoices";
const OPEN_INVOICES: &str = "db.view.afenda.mart.open_invoices";
const AGING_REPORT: &str = "ui.report.finance.ar_aging";

#[test]
fn test_self_loop_invalid_for_every_kind() {
    for kind in EdgeKind::ALL {
        let edge = LineageEdge::new(INVOICES, INVOICES, kind);
        let result = validate_lineage_edge(&edge);
        assert!(!result.is_valid());
        assert!(result.errors().iter().any(|e| e == SELF_LOOP));
    }
}

#[test]
fn test_invalid_endpoints_reported_not_raised() {
    let result = validate_edge("db.rec.afenda", "");
    assert!(!result.is_valid());
    assert!(result.errors().iter().any(|e| e.starts_with("invalid from identifier")));
    assert!(result.errors().iter().any(|e| e.starts_with("invalid to identifier")));
}

#[test]
fn test_inference_uses_parsed_shapes() {
    let from = parse(INVOICES).into_key().unwrap();
    let to: AssetKey = OPEN_INVOICES.parse().unwrap();
    let guess = infer_edge_kind(&from, &to);
    assert_eq!(guess.kind, EdgeKind::Serves);
    assert_eq!(guess.confidence, 1.0);
}

#[test]
fn test_three_cycle() {
    let edges = [
        LineageEdge::new("a", "b", EdgeKind::Derives),
        LineageEdge::new("b", "c", EdgeKind::Derives),
        LineageEdge::new("c", "a", EdgeKind::Derives),
    ];
    let result = analyze_edges(&edges);
    assert!(result.sorted.len() < 3);
    assert_eq!(result.cycles.len(), 1);

    // Closed path: some rotation of a, b, c with the start repeated.
    let cycle = &result.cycles[0];
    assert_eq!(cycle.len(), 4);
    assert_eq!(cycle[0], cycle[3]);
    let mut members = cycle[..3].to_vec();
    members.sort();
    assert_eq!(members, ["a", "b", "c"]);
}

#[test]
fn test_acyclic_order() {
    let edges = [
        LineageEdge::new("a", "b", EdgeKind::Derives),
        LineageEdge::new("b", "c", EdgeKind::Derives),
    ];
    let result = analyze_edges(&edges);
    assert_eq!(result.sorted, ["a", "b", "c"]);
    assert!(result.cycles.is_empty());
}

#[test]
fn test_order_respects_every_edge() {
    let pairs = [
        ("d", "e"),
        ("a", "c"),
        ("b", "c"),
        ("c", "d"),
        ("a", "e"),
        ("f", "a"),
    ];
    let result = LineageGraph::from_pairs(pairs).analyze();
    assert_eq!(result.sorted.len(), 6);
    let pos = |id: &str| result.sorted.iter().position(|s| s == id).unwrap();
    for (from, to) in pairs {
        assert!(pos(from) < pos(to), "{from} before {to}");
    }
}

#[test]
fn test_dense_graph_terminates() {
    let ids: Vec<String> = (0..60).map(|i| format!("n{}", i)).collect();
    let mut pairs = Vec::new();
    for a in &ids {
        for b in &ids {
            pairs.push((a.as_str(), b.as_str()));
        }
    }
    let result = LineageGraph::from_pairs(pairs).analyze();
    assert!(result.sorted.is_empty());
    assert!(!result.cycles.is_empty());
    for cycle in &result.cycles {
        assert_eq!(cycle.first(), cycle.last());
    }
}

#[test]
fn test_empty_graph() {
    let result = analyze_edges(&[]);
    assert!(result.sorted.is_empty());
    assert!(result.cycles.is_empty());
}

#[test]
fn test_triage_then_analyze() {
    let candidates = vec![
        CandidateEdge::new(INVOICES, INVOICES_MART),
        CandidateEdge::new(INVOICES_MART, OPEN_INVOICES),
        CandidateEdge::new(INVOICES, AGING_REPORT).with_kind(EdgeKind::Serves),
        CandidateEdge::new(OPEN_INVOICES, OPEN_INVOICES),
        CandidateEdge::new("db.rec.Afenda.public.x", AGING_REPORT),
    ];
    let report = triage(candidates, &LineageConfig::default());
    assert_eq!(report.accepted.len(), 3);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.rejected[0].index, 3);
    assert_eq!(report.rejected[1].index, 4);

    let ambiguous = report.accepted[0].inferred.as_ref().unwrap();
    assert_eq!(ambiguous.kind, EdgeKind::Ingests);
    assert_eq!(ambiguous.confidence, 0.6);

    let analysis = analyze_edges(&report.edges());
    assert!(analysis.is_acyclic());
    assert_eq!(analysis.sorted[0], INVOICES);

    let graph = LineageGraph::from_edges(&report.edges());
    assert_eq!(
        graph.downstream(INVOICES),
        [INVOICES_MART, AGING_REPORT, OPEN_INVOICES]
    );
    assert_eq!(graph.upstream(OPEN_INVOICES), [INVOICES_MART, INVOICES]);
}
