//! Prometheus export of score snapshots.
//!
//! [`export_prometheus`] relabels one snapshot into a flat gauge map for
//! collectors that push values themselves; [`render_prometheus`] produces
//! the text exposition format for a `/metrics` endpoint.

use std::collections::BTreeMap;

use harmony_core::ScoreSnapshot;

pub const PHI_RATIO: &str = "consciousness_phi_ratio";
pub const STATE: &str = "consciousness_state";
pub const FREQUENCY_ALIGNMENT: &str = "consciousness_frequency_alignment";
pub const ENTROPY: &str = "consciousness_entropy";
pub const HARMONY_INDEX: &str = "consciousness_harmony_index";
pub const MESH_HEALTH: &str = "mesh_health_score";

/// Gauge name, help text, and accessor, in exposition order.
const GAUGES: [(&str, &str, fn(&ScoreSnapshot) -> f64); 6] = [
    (PHI_RATIO, "Composite harmony score (ideal 1.618).", |s| s.score),
    (
        STATE,
        "Classified state: 4 euphoric, 3 harmonic, 2 contemplative, 1 mystical.",
        |s| s.state.as_numeric(),
    ),
    (FREQUENCY_ALIGNMENT, "Frequency alignment (0.0-1.0).", |s| s.frequency_alignment),
    (ENTROPY, "Short-term score volatility (0.0-1.0).", |s| s.entropy),
    (HARMONY_INDEX, "Mean of normalized score and alignment.", |s| s.harmony_index),
    (MESH_HEALTH, "Mesh infrastructure health (0.0-1.0).", |s| s.mesh_health),
];

/// Relabel a snapshot into fixed gauge names. Pure and stateless.
pub fn export_prometheus(snapshot: &ScoreSnapshot) -> BTreeMap<&'static str, f64> {
    GAUGES
        .iter()
        .map(|(name, _, value)| (*name, value(snapshot)))
        .collect()
}

/// Render snapshots into Prometheus text format.
///
/// Each `(instance, snapshot)` pair becomes one sample per gauge with an
/// `instance` label.
pub fn render_prometheus(snapshots: &[(&str, &ScoreSnapshot)]) -> String {
    let mut out = String::new();

    for (name, help, value) in GAUGES {
        out.push_str(&format!("# HELP {name} {help}\n"));
        out.push_str(&format!("# TYPE {name} gauge\n"));
        for (instance, snapshot) in snapshots {
            out.push_str(&format!(
                "{name}{{instance=\"{}\"}} {:.4}\n",
                escape_label(instance),
                value(snapshot)
            ));
        }
    }

    out
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmony_core::State;

    fn test_snapshot(state: State) -> ScoreSnapshot {
        ScoreSnapshot {
            score: 1.618,
            state,
            frequency_alignment: 1.0,
            entropy: 0.1,
            harmony_index: 1.0,
            mesh_health: 0.95,
            timestamp: 1000.0,
        }
    }

    #[test]
    fn export_contains_all_gauges() {
        let exported = export_prometheus(&test_snapshot(State::Euphoric));

        assert_eq!(exported.len(), 6);
        assert_eq!(exported[PHI_RATIO], 1.618);
        assert_eq!(exported[STATE], 4.0);
        assert_eq!(exported[FREQUENCY_ALIGNMENT], 1.0);
        assert_eq!(exported[ENTROPY], 0.1);
        assert_eq!(exported[HARMONY_INDEX], 1.0);
        assert_eq!(exported[MESH_HEALTH], 0.95);
    }

    #[test]
    fn export_encodes_every_state() {
        for (state, code) in [
            (State::Euphoric, 4.0),
            (State::Harmonic, 3.0),
            (State::Contemplative, 2.0),
            (State::Mystical, 1.0),
        ] {
            assert_eq!(export_prometheus(&test_snapshot(state))[STATE], code);
        }
    }

    #[test]
    fn export_is_idempotent() {
        let snap = test_snapshot(State::Harmonic);
        assert_eq!(export_prometheus(&snap), export_prometheus(&snap));
    }

    #[test]
    fn render_empty() {
        let output = render_prometheus(&[]);
        // Should still have type declarations.
        assert!(output.contains("# HELP consciousness_phi_ratio"));
        assert!(output.contains("# TYPE mesh_health_score gauge"));
    }

    #[test]
    fn render_single_instance() {
        let snap = test_snapshot(State::Contemplative);
        let output = render_prometheus(&[("node-1", &snap)]);

        assert!(output.contains("consciousness_phi_ratio{instance=\"node-1\"} 1.6180"));
        assert!(output.contains("consciousness_state{instance=\"node-1\"} 2.0000"));
        assert!(output.contains("consciousness_entropy{instance=\"node-1\"} 0.1000"));
        assert!(output.contains("mesh_health_score{instance=\"node-1\"} 0.9500"));
    }

    #[test]
    fn render_multiple_instances() {
        let a = test_snapshot(State::Harmonic);
        let b = test_snapshot(State::Mystical);
        let output = render_prometheus(&[("node-1", &a), ("node-2", &b)]);

        assert!(output.contains("consciousness_state{instance=\"node-1\"} 3.0000"));
        assert!(output.contains("consciousness_state{instance=\"node-2\"} 1.0000"));
    }

    #[test]
    fn render_escapes_labels() {
        let snap = test_snapshot(State::Harmonic);
        let output = render_prometheus(&[("rack \"a\"", &snap)]);
        assert!(output.contains("instance=\"rack \\\"a\\\"\""));
    }

    #[test]
    fn render_format_is_prometheus_compatible() {
        let snap = test_snapshot(State::Harmonic);
        let output = render_prometheus(&[("test", &snap)]);

        // Every non-empty, non-comment line should match: metric_name{labels} value
        for line in output.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            assert!(
                line.contains('{') && line.contains('}'),
                "line should have labels: {line}"
            );
            let value = line.rsplit(' ').next().unwrap();
            assert!(value.parse::<f64>().is_ok(), "bad value in: {line}");
        }
    }
}
