//! Cloneable, task-safe handle around a [`MetricsScorer`].
//!
//! History and recovery state are not safe to mutate concurrently, so every
//! call goes through one async mutex. Clones share the same scorer.

use std::sync::Arc;

use harmony_core::{Directive, MetricSample, ScoreSnapshot, ScorerConfig, State};
use tokio::sync::Mutex;

use crate::history::TrendReport;
use crate::scorer::MetricsScorer;

#[derive(Clone)]
pub struct SharedScorer {
    inner: Arc<Mutex<MetricsScorer>>,
}

impl SharedScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self::from_scorer(MetricsScorer::new(config))
    }

    pub fn from_scorer(scorer: MetricsScorer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scorer)),
        }
    }

    pub async fn evaluate(&self, sample: &MetricSample, timestamp: Option<f64>) -> ScoreSnapshot {
        self.inner.lock().await.evaluate(sample, timestamp)
    }

    /// Evaluate and look up the directive under a single lock.
    pub async fn evaluate_with_directive(
        &self,
        sample: &MetricSample,
        timestamp: Option<f64>,
    ) -> (ScoreSnapshot, Directive) {
        let mut scorer = self.inner.lock().await;
        let snapshot = scorer.evaluate(sample, timestamp);
        let directive = scorer.get_directive(snapshot.state);
        (snapshot, directive)
    }

    pub async fn get_trend(&self, window: Option<usize>) -> TrendReport {
        self.inner.lock().await.get_trend(window)
    }

    pub async fn latest(&self) -> Option<ScoreSnapshot> {
        self.inner.lock().await.history().latest().copied()
    }

    pub async fn history_len(&self) -> usize {
        self.inner.lock().await.history().len()
    }

    pub async fn recovery_mode(&self) -> bool {
        self.inner.lock().await.recovery_mode()
    }

    /// Directive lookup needs no scorer state.
    pub fn get_directive(&self, state: State) -> Directive {
        Directive::for_state(state)
    }
}

impl Default for SharedScorer {
    fn default() -> Self {
        Self::new(ScorerConfig::default())
    }
}
