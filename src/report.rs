use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;

use crate::analyzer::Analyzer;
use crate::inputs::{collect_inputs, Input};
use crate::patterns::{self, CompiledPatterns};
use crate::reputation::SimulatedReputation;
use crate::risk::{PredictionResponse, RiskAssessment};
use crate::stats::AnalysisResult;
use crate::Args;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputReport {
    pub source: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    /// Names of indicators leaning towards phishing.
    pub flagged: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<InputReport>,
}

pub fn run_analysis(args: &Args) -> Result<Report> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "analysis",
        "Starting phishing parameter extraction"
    );

    let patterns = patterns::load_patterns(args.patterns.as_deref())?;
    let inputs = collect_inputs(args)?;
    let mut results = analyze_inputs(&inputs, &patterns, args.workers, args.seed)?;

    if let Some(path) = &args.prediction {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read prediction file {:?}", path))?;
        let risk = PredictionResponse::parse(&body)?.risk();
        info!(action = "attach", component = "prediction", file_path = ?path, has_risk = risk.is_some(), "Attached prediction");
        if let Some(first) = results.first_mut() {
            first.risk = risk;
        }
    }

    info!(
        action = "complete",
        component = "analysis",
        input_count = results.len(),
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );

    Ok(Report {
        generated_at: Utc::now(),
        results,
    })
}

/// Analyzes every input on a dedicated rayon pool, keeping input order.
///
/// With a seed, input `i` gets a provider seeded with `seed + i`, so a run is
/// reproducible regardless of scheduling.
pub fn analyze_inputs(
    inputs: &[Input],
    patterns: &CompiledPatterns,
    max_workers: Option<usize>,
    seed: Option<u64>,
) -> Result<Vec<InputReport>> {
    let max_workers = max_workers.unwrap_or_else(|| {
        let cpu_count = num_cpus::get();
        std::cmp::min(cpu_count, 8)
    });

    info!(
        action = "configure",
        component = "analysis",
        worker_count = max_workers,
        "Using workers for processing"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_workers)
        .build()
        .context("Failed to build worker pool")?;

    let analyzer = Analyzer::new(patterns);
    let reports: Vec<InputReport> = pool.install(|| {
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| {
                let analysis = match seed {
                    Some(seed) => {
                        let seed = seed.wrapping_add(index as u64);
                        let mut provider = SimulatedReputation::seeded(patterns, seed);
                        analyzer.analyze(&input.content, &mut provider)
                    }
                    None => {
                        let mut provider = SimulatedReputation::from_entropy(patterns);
                        analyzer.analyze(&input.content, &mut provider)
                    }
                };
                InputReport {
                    source: input.source.clone(),
                    flagged: analysis
                        .parameters
                        .flagged()
                        .into_iter()
                        .map(|i| i.name())
                        .collect(),
                    analysis,
                    risk: None,
                }
            })
            .collect()
    });

    Ok(reports)
}

pub fn print_report(report: &Report, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, report)?;
    } else {
        serde_json::to_writer(&mut out, report)?;
    }
    writeln!(out)?;
    Ok(())
}
