//! harmony-scorer — composite scoring, classification, and trend analysis.
//!
//! Maps a [`MetricSample`](harmony_core::MetricSample) to a
//! [`ScoreSnapshot`](harmony_core::ScoreSnapshot), keeping a bounded history
//! for entropy and trend statistics.
//!
//! # Pipeline
//!
//! ```text
//! MetricsScorer::evaluate(sample)
//!   ├── formulas::composite_score()      weighted factors × PHI
//!   ├── StateClassifier::classify()      thresholds + recovery hysteresis
//!   ├── formulas::frequency_alignment()  measured Hz or score proxy
//!   ├── History::entropy()               variance of last 20 scores
//!   ├── formulas::mesh_health()          peers / delivery / latency / MTTR
//!   └── History::push()                  FIFO, bounded
//!
//! MetricsScorer::get_trend(window)        OLS slope over recent scores
//! MetricsScorer::get_directive(state)     static lookup
//! ```
//!
//! `MetricsScorer` is single-owner and synchronous. Use [`SharedScorer`]
//! when several tasks feed the same scorer.

pub mod classifier;
pub mod formulas;
pub mod history;
pub mod scorer;
pub mod shared;

pub use classifier::StateClassifier;
pub use formulas::ScoreFactors;
pub use history::{History, Trend, TrendReport, TrendStats};
pub use scorer::MetricsScorer;
pub use shared::SharedScorer;
