//! harmony-core — shared domain types for the harmony scoring engine.
//!
//! Raw telemetry arrives as a [`MetricSample`], is scored into a
//! [`ScoreSnapshot`] by `harmony-scorer`, and the snapshot's [`State`]
//! selects a static [`Directive`] for the control loop that consumes it.
//!
//! # Layout
//!
//! ```text
//! types      MetricSample, State, ScoreSnapshot, constants
//! directive  State → Directive lookup table
//! config     harmony.toml parsing and validation
//! error      ConfigError, ParseStateError
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod types;

pub use config::{ExportConfig, HarmonyConfig, ScorerConfig, TrendConfig};
pub use directive::{AlertLevel, Directive, RoutePreference, ScalingAction};
pub use error::{ConfigError, ConfigResult, ParseStateError};
pub use types::*;
