use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use harmony_core::{HarmonyConfig, MetricSample, keys};
use harmony_scorer::{MetricsScorer, Trend, TrendReport};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Prometheus,
}

pub fn evaluate(input: &str, config_path: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => HarmonyConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => HarmonyConfig::default(),
    };

    let samples = if input == "-" {
        read_samples(io::stdin().lock())?
    } else {
        let file = File::open(input).with_context(|| format!("opening {input}"))?;
        read_samples(BufReader::new(file))?
    };
    info!(samples = samples.len(), "evaluating samples");

    print!("{}", run(&samples, &config, format)?);
    Ok(())
}

/// Parse one JSON sample per line. Blank lines and `#` comments are skipped.
pub fn read_samples(reader: impl BufRead) -> anyhow::Result<Vec<MetricSample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let sample: MetricSample = serde_json::from_str(trimmed)
            .with_context(|| format!("line {}: invalid metric sample", idx + 1))?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Score every sample in order and render the output.
///
/// A numeric `timestamp` key on a sample is used as its capture time, so
/// replayed input keeps its original spacing against the recovery window.
/// Samples without one are stamped with the wall clock.
pub fn run(
    samples: &[MetricSample],
    config: &HarmonyConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut scorer = MetricsScorer::new(config.scorer.clone());
    let mut out = String::new();

    for (idx, sample) in samples.iter().enumerate() {
        let snapshot = scorer.evaluate(sample, sample.get(keys::TIMESTAMP));
        let directive = scorer.get_directive(snapshot.state);
        debug!(line = idx + 1, state = %snapshot.state, "scored sample");

        match format {
            OutputFormat::Text => {
                out.push_str(&format!(
                    "[{}] {} score={:.4} alignment={:.4} entropy={:.4} harmony={:.4} mesh={:.4}\n",
                    idx + 1,
                    snapshot.state,
                    snapshot.score,
                    snapshot.frequency_alignment,
                    snapshot.entropy,
                    snapshot.harmony_index,
                    snapshot.mesh_health,
                ));
                out.push_str(&format!(
                    "    interval={}s route={} scaling={} alert={} healing={}\n",
                    directive.monitoring_interval_sec,
                    directive.route_preference,
                    directive.scaling_action,
                    directive.alert_level,
                    directive.enable_aggressive_healing,
                ));
                out.push_str(&format!("    {}\n", directive.message));
            }
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "snapshot": snapshot,
                    "directive": directive,
                });
                out.push_str(&serde_json::to_string(&line)?);
                out.push('\n');
            }
            OutputFormat::Prometheus => {}
        }
    }

    let trend = scorer.get_trend(Some(config.trend.window));
    match format {
        OutputFormat::Text => {
            if let Some(latest) = scorer.history().latest() {
                out.push_str(&format!("{}\n", latest.summary()));
            }
            out.push_str(&format_trend(&trend, scorer.history().len(), config.trend.window));
        }
        OutputFormat::Json => {
            out.push_str(&serde_json::to_string(&trend)?);
            out.push('\n');
        }
        OutputFormat::Prometheus => {
            if let Some(latest) = scorer.history().latest() {
                out.push_str(&harmony_metrics::render_prometheus(&[(
                    config.export.instance.as_str(),
                    latest,
                )]));
            }
        }
    }

    Ok(out)
}

fn format_trend(report: &TrendReport, history_len: usize, window: usize) -> String {
    match (report.trend, report.stats) {
        (Trend::InsufficientData, _) | (_, None) => {
            format!("trend: insufficient_data ({history_len}/{window} snapshots)\n")
        }
        (trend, Some(stats)) => format!(
            "trend: {trend} slope={:.4} current={:.4} mean={:.4}\n",
            stats.slope,
            stats.current_score,
            stats.mean_score,
        ),
    }
}
