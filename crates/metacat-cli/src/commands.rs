//! Command handlers. Each prints to stdout and returns the process exit code.

use std::path::Path;
use std::process::ExitCode;

use color_eyre::eyre::{eyre, Result};
use serde::Serialize;
use tracing::{info, info_span};

use metacat_core::identifier::grammar_table;
use metacat_core::{
    analyze_edges, assert_type_matches, derive_asset_type, parse as parse_identifier, triage,
    AssetType, Config, GraphAnalysis, LineageConfig, LineageGraph, OutputFormat, ParseOutcome,
    Prefix, TriageReport,
};

use crate::settings;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[derive(Serialize)]
struct ParsedLine<'a> {
    input: &'a str,
    #[serde(flatten)]
    outcome: &'a ParseOutcome,
}

pub fn parse(ids: &[String], config: &Config) -> Result<ExitCode> {
    let outcomes: Vec<ParseOutcome> = {
        let _span = info_span!("parse", count = ids.len()).entered();
        ids.iter().map(|id| parse_identifier(id)).collect()
    };
    let all_valid = outcomes.iter().all(ParseOutcome::is_valid);

    match config.output.format {
        OutputFormat::Json => {
            let lines: Vec<_> = ids
                .iter()
                .zip(&outcomes)
                .map(|(input, outcome)| ParsedLine {
                    input: input.as_str(),
                    outcome,
                })
                .collect();
            print_json(&lines)?;
        }
        OutputFormat::Text => {
            for (id, outcome) in ids.iter().zip(&outcomes) {
                match outcome {
                    ParseOutcome::Valid(key) => println!(
                        "{}  valid  {} [{}]",
                        id,
                        key.prefix().asset_type(),
                        key.segments().join(", ")
                    ),
                    ParseOutcome::Invalid(failure) => {
                        let prefix = failure
                            .prefix()
                            .map_or_else(|| "-".to_string(), |p| p.to_string());
                        println!("{}  invalid  prefix {}", id, prefix);
                        for error in failure.errors() {
                            println!("  - {}", error);
                        }
                    }
                }
            }
        }
    }

    Ok(exit(all_valid))
}

pub fn canonicalize(id: &str, config: &Config) -> Result<ExitCode> {
    let canonical = metacat_core::canonicalize(id)?;
    match config.output.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({ "input": id, "canonical": canonical }))?
        }
        OutputFormat::Text => println!("{}", canonical),
    }
    Ok(ExitCode::SUCCESS)
}

pub fn build(prefix: &str, segments: &[String], config: &Config) -> Result<ExitCode> {
    let prefix = Prefix::from_token(prefix).ok_or_else(|| {
        let known: Vec<_> = Prefix::ALL.iter().map(|p| p.token()).collect();
        eyre!("unknown prefix '{}'; expected one of: {}", prefix, known.join(", "))
    })?;
    let id = metacat_core::build(prefix, segments)?;
    match config.output.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "identifier": id }))?,
        OutputFormat::Text => println!("{}", id),
    }
    Ok(ExitCode::SUCCESS)
}

pub fn asset_type(id: &str, expect: Option<AssetType>, config: &Config) -> Result<ExitCode> {
    let derived = match expect {
        Some(claimed) => Some(assert_type_matches(id, claimed)?),
        None => derive_asset_type(id),
    };
    match config.output.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({ "input": id, "asset_type": derived }))?
        }
        OutputFormat::Text => match derived {
            Some(t) => println!("{}", t),
            None => println!("(none: '{}' is not a valid identifier)", id),
        },
    }
    Ok(exit(derived.is_some()))
}

pub fn grammar(config: &Config) -> Result<ExitCode> {
    let rows = grammar_table();
    match config.output.format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            for row in rows {
                println!(
                    "{:<12} {:<16} {:<12} {}",
                    row.token,
                    row.asset_type,
                    row.constraint.to_string(),
                    row.description
                );
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct LineageOutput<'a> {
    triage: &'a TriageReport,
    analysis: &'a GraphAnalysis,
}

pub fn lineage(file: &Path, config: &Config) -> Result<ExitCode> {
    let candidates = settings::load_candidates(file)?;
    let span = info_span!("lineage", file = %file.display(), candidates = candidates.len());
    let _guard = span.enter();

    let report = triage(candidates, &config.lineage);
    let analysis = analyze_edges(&report.edges());
    info!(
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        cycles = analysis.cycles.len(),
        "lineage checked"
    );

    match config.output.format {
        OutputFormat::Json => print_json(&LineageOutput {
            triage: &report,
            analysis: &analysis,
        })?,
        OutputFormat::Text => print_lineage_text(&report, &analysis),
    }

    Ok(exit(lineage_ok(&report, &analysis, &config.lineage)))
}

/// No rejected edges, and no cycles unless the config tolerates them.
fn lineage_ok(report: &TriageReport, analysis: &GraphAnalysis, config: &LineageConfig) -> bool {
    report.is_clean() && (analysis.is_acyclic() || !config.fail_on_cycles)
}

fn print_lineage_text(report: &TriageReport, analysis: &GraphAnalysis) {
    println!(
        "accepted {}, rejected {}",
        report.accepted.len(),
        report.rejected.len()
    );

    for rejected in &report.rejected {
        println!(
            "  [{}] {} -> {}",
            rejected.index, rejected.candidate.from, rejected.candidate.to
        );
        for error in &rejected.errors {
            println!("      - {}", error);
        }
    }

    let inferred: Vec<_> = report
        .accepted
        .iter()
        .filter_map(|a| a.inferred.as_ref().map(|i| (&a.edge, i)))
        .collect();
    if !inferred.is_empty() {
        println!("inferred kinds:");
        for (edge, guess) in inferred {
            println!(
                "  {} -> {}  {} ({:.2}): {}",
                edge.from, edge.to, guess.kind, guess.confidence, guess.rationale
            );
        }
    }

    println!("order:");
    for (i, id) in analysis.sorted.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, id);
    }

    if !analysis.cycles.is_empty() {
        println!("cycles:");
        for cycle in &analysis.cycles {
            println!("  {}", cycle.join(" -> "));
        }
    }
}

pub fn impact(file: &Path, id: &str, upstream: bool, config: &Config) -> Result<ExitCode> {
    let candidates = settings::load_candidates(file)?;
    let report = triage(candidates, &config.lineage);
    let graph = LineageGraph::from_edges(&report.edges());

    if !graph.contains(id) {
        return Err(eyre!(
            "'{}' does not appear in any accepted edge in {}",
            id,
            file.display()
        ));
    }

    let nodes = if upstream {
        graph.upstream(id)
    } else {
        graph.downstream(id)
    };

    match config.output.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "identifier": id,
            "direction": if upstream { "upstream" } else { "downstream" },
            "nodes": nodes,
        }))?,
        OutputFormat::Text => {
            for node in nodes {
                println!("{}", node);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn show_config(config: &Config) -> Result<ExitCode> {
    match config.output.format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Text => print!("{}", config.to_toml_string()),
    }
    Ok(ExitCode::SUCCESS)
}
