//! Domain types for the harmony scoring engine.
//!
//! A [`MetricSample`] is the ephemeral input of one evaluation; a
//! [`ScoreSnapshot`] is its immutable result. Both serialize to plain JSON.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseStateError;

/// Scaling constant applied to the weighted sum; an ideal sample scores exactly this.
pub const PHI: f64 = 1.618033988749895;

/// Reference frequency for direct frequency-alignment measurements.
pub const TARGET_FREQUENCY_HZ: f64 = 108.0;

/// How long after a degradation a HARMONIC reading arms recovery mode.
pub const RECOVERY_WINDOW_SECS: f64 = 60.0;

/// Default number of snapshots kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Default number of recent snapshots used for trend analysis.
pub const DEFAULT_TREND_WINDOW: usize = 50;

/// Well-known metric keys.
pub mod keys {
    pub const CPU_PERCENT: &str = "cpu_percent";
    pub const MEMORY_PERCENT: &str = "memory_percent";
    pub const LATENCY_MS: &str = "latency_ms";
    pub const PACKET_LOSS: &str = "packet_loss";
    pub const MESH_CONNECTIVITY: &str = "mesh_connectivity";
    pub const MTTR_MINUTES: &str = "mttr_minutes";
    pub const FREQUENCY_HZ: &str = "frequency_hz";
    /// Optional unix-seconds capture time for replayed samples.
    pub const TIMESTAMP: &str = "timestamp";
}

// ── Metric sample ─────────────────────────────────────────────────

/// Named numeric telemetry supplied per evaluation.
///
/// No schema is enforced: unknown keys are carried but ignored by the
/// calculators, and each calculator picks its own default for missing keys.
/// Non-numeric values (strings, objects, `null`) are dropped on
/// deserialization, so a known key with such a value reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricSample(HashMap<String, f64>);

impl<'de> Deserialize<'de> for MetricSample {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawValue {
            Num(f64),
            Other(IgnoredAny),
        }

        let raw = HashMap::<String, RawValue>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                RawValue::Num(n) => Some((key, n)),
                RawValue::Other(_) => None,
            })
            .collect())
    }
}

impl MetricSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Value for `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, f64>> for MetricSample {
    fn from(map: HashMap<String, f64>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricSample {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ── State ─────────────────────────────────────────────────────────

/// Qualitative classification of a composite score, most to least healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Mystical,
    Contemplative,
    Harmonic,
    Euphoric,
}

impl State {
    pub const ALL: [State; 4] = [
        State::Euphoric,
        State::Harmonic,
        State::Contemplative,
        State::Mystical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            State::Euphoric => "EUPHORIC",
            State::Harmonic => "HARMONIC",
            State::Contemplative => "CONTEMPLATIVE",
            State::Mystical => "MYSTICAL",
        }
    }

    /// Gauge encoding used by exporters: EUPHORIC = 4 down to MYSTICAL = 1.
    pub fn as_numeric(self) -> f64 {
        match self {
            State::Euphoric => 4.0,
            State::Harmonic => 3.0,
            State::Contemplative => 2.0,
            State::Mystical => 1.0,
        }
    }

    /// HARMONIC or better.
    pub fn is_healthy(self) -> bool {
        self >= State::Harmonic
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euphoric" => Ok(State::Euphoric),
            "harmonic" => Ok(State::Harmonic),
            "contemplative" => Ok(State::Contemplative),
            "mystical" => Ok(State::Mystical),
            _ => Err(ParseStateError(s.to_string())),
        }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// Composite score, nominally 0..PHI.
    pub score: f64,
    pub state: State,
    /// 0.0–1.0.
    pub frequency_alignment: f64,
    /// Short-term score volatility, 0.0–1.0.
    pub entropy: f64,
    /// Mean of normalized score and frequency alignment.
    pub harmony_index: f64,
    /// Infrastructure health, 0.0–1.0.
    pub mesh_health: f64,
    /// Unix timestamp (seconds, fractional).
    pub timestamp: f64,
}

impl ScoreSnapshot {
    /// One-line description for operator logs.
    pub fn summary(&self) -> String {
        format!(
            "The system observes its state: {}. Harmony is {:.2}.",
            self.state, self.harmony_index
        )
    }
}
