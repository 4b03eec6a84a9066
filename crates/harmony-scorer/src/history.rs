//! Bounded snapshot history with rolling statistics.
//!
//! History is insertion-ordered and FIFO-evicted. It feeds two read-only
//! statistics: entropy (variance of the last 20 scores) and trend (OLS
//! slope over a caller-chosen window).

use std::collections::VecDeque;
use std::fmt;

use harmony_core::ScoreSnapshot;
use serde::Serialize;

use crate::formulas::{mean, ols_slope, population_variance};

/// Minimum history before entropy is computed rather than assumed.
const ENTROPY_MIN_HISTORY: usize = 10;
/// Scores considered for entropy.
const ENTROPY_WINDOW: usize = 20;
/// Returned while history is too short.
const NEUTRAL_ENTROPY: f64 = 0.5;
/// Variance at which entropy saturates to 1.0.
const ENTROPY_SATURATION_VARIANCE: f64 = 0.5;
/// Absolute slope above which a trend counts as moving.
const TREND_SLOPE_THRESHOLD: f64 = 0.01;

/// Direction of the composite score over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
    InsufficientData,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Degrading => "degrading",
            Trend::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendStats {
    pub slope: f64,
    pub current_score: f64,
    pub mean_score: f64,
}

/// Result of a trend query. `stats` is `None` only for
/// [`Trend::InsufficientData`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendReport {
    pub trend: Trend,
    #[serde(flatten)]
    pub stats: Option<TrendStats>,
}

impl TrendReport {
    pub fn insufficient_data() -> Self {
        Self {
            trend: Trend::InsufficientData,
            stats: None,
        }
    }

    pub fn slope(&self) -> Option<f64> {
        self.stats.map(|s| s.slope)
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<ScoreSnapshot>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Append a snapshot, returning the evicted oldest entry if over capacity.
    pub fn push(&mut self, snapshot: ScoreSnapshot) -> Option<ScoreSnapshot> {
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ScoreSnapshot> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ScoreSnapshot> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Scores of the most recent `n` snapshots, oldest first.
    pub fn recent_scores(&self, n: usize) -> Vec<f64> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(|s| s.score).collect()
    }

    /// Volatility of recent scores in 0.0–1.0.
    pub fn entropy(&self) -> f64 {
        if self.entries.len() < ENTROPY_MIN_HISTORY {
            return NEUTRAL_ENTROPY;
        }
        let variance = population_variance(&self.recent_scores(ENTROPY_WINDOW));
        (variance / ENTROPY_SATURATION_VARIANCE).min(1.0)
    }

    /// Least-squares trend over the last `window` scores.
    ///
    /// Windows shorter than two points have no slope and report
    /// insufficient data, as does a history shorter than the window.
    pub fn trend(&self, window: usize) -> TrendReport {
        if window < 2 || self.entries.len() < window {
            return TrendReport::insufficient_data();
        }

        let scores = self.recent_scores(window);
        let slope = ols_slope(&scores);
        let trend = if slope > TREND_SLOPE_THRESHOLD {
            Trend::Improving
        } else if slope < -TREND_SLOPE_THRESHOLD {
            Trend::Degrading
        } else {
            Trend::Stable
        };

        TrendReport {
            trend,
            stats: Some(TrendStats {
                slope,
                current_score: scores[scores.len() - 1],
                mean_score: mean(&scores),
            }),
        }
    }
}
