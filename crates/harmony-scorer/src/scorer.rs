//! MetricsScorer — turns metric samples into snapshots.
//!
//! One scorer per monitored resource. `evaluate` is the only entry point
//! that mutates anything: it appends to history and may move the
//! classifier in or out of recovery mode.

use std::time::{SystemTime, UNIX_EPOCH};

use harmony_core::{Directive, MetricSample, ScoreSnapshot, ScorerConfig, State, keys};
use tracing::debug;

use crate::classifier::StateClassifier;
use crate::formulas;
use crate::history::{History, TrendReport};

pub struct MetricsScorer {
    config: ScorerConfig,
    history: History,
    classifier: StateClassifier,
}

impl MetricsScorer {
    pub fn new(config: ScorerConfig) -> Self {
        debug!(
            history_capacity = config.history_capacity,
            enable_advanced_metrics = config.enable_advanced_metrics,
            "metrics scorer created"
        );
        Self {
            history: History::with_capacity(config.history_capacity),
            classifier: StateClassifier::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn recovery_mode(&self) -> bool {
        self.classifier.recovery_mode()
    }

    pub fn last_degraded(&self) -> Option<f64> {
        self.classifier.last_degraded()
    }

    pub fn calculate_score(&self, sample: &MetricSample) -> f64 {
        formulas::composite_score(sample)
    }

    /// Volatility of recent scores; 0.5 until ten snapshots exist.
    pub fn calculate_entropy(&self) -> f64 {
        self.history.entropy()
    }

    pub fn calculate_frequency_alignment(&self, score: f64, frequency_hz: Option<f64>) -> f64 {
        formulas::frequency_alignment(score, frequency_hz)
    }

    pub fn calculate_mesh_health(&self, sample: &MetricSample) -> f64 {
        formulas::mesh_health(sample)
    }

    /// Classify against the wall clock.
    pub fn evaluate_state(&mut self, score: f64) -> State {
        self.evaluate_state_at(score, now_secs())
    }

    /// Classify with an explicit clock reading (unix seconds).
    pub fn evaluate_state_at(&mut self, score: f64, now: f64) -> State {
        self.classifier.classify(score, now)
    }

    /// Score a sample, classify it, and record the snapshot.
    ///
    /// `timestamp` defaults to now and is also the clock the recovery
    /// window is measured against.
    pub fn evaluate(&mut self, sample: &MetricSample, timestamp: Option<f64>) -> ScoreSnapshot {
        let timestamp = timestamp.unwrap_or_else(now_secs);

        let score = self.calculate_score(sample);
        let state = self.evaluate_state_at(score, timestamp);
        let frequency_alignment =
            self.calculate_frequency_alignment(score, sample.get(keys::FREQUENCY_HZ));
        let entropy = self.calculate_entropy();
        let mesh_health = self.calculate_mesh_health(sample);

        let snapshot = ScoreSnapshot {
            score,
            state,
            frequency_alignment,
            entropy,
            harmony_index: formulas::harmony_index(score, frequency_alignment),
            mesh_health,
            timestamp,
        };

        if let Some(evicted) = self.history.push(snapshot) {
            debug!(evicted_timestamp = evicted.timestamp, "history full, evicted oldest snapshot");
        }

        debug!(
            score,
            state = %state,
            entropy,
            mesh_health,
            recovery_mode = self.recovery_mode(),
            "sample evaluated"
        );
        snapshot
    }

    pub fn get_directive(&self, state: State) -> Directive {
        Directive::for_state(state)
    }

    /// Trend over the last `window` snapshots (default 50).
    pub fn get_trend(&self, window: Option<usize>) -> TrendReport {
        self.history
            .trend(window.unwrap_or(harmony_core::DEFAULT_TREND_WINDOW))
    }
}

impl Default for MetricsScorer {
    fn default() -> Self {
        Self::new(ScorerConfig::default())
    }
}

pub(crate) fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
