//! harmony-metrics — Prometheus export for harmony score snapshots.
//!
//! # Architecture
//!
//! ```text
//! ScoreSnapshot
//!   ├── export_prometheus() → flat gauge map (name → value)
//!   └── render_prometheus() → text/plain for a /metrics endpoint
//! ```
//!
//! State is exported numerically: EUPHORIC 4, HARMONIC 3, CONTEMPLATIVE 2,
//! MYSTICAL 1.

pub mod prometheus;

pub use prometheus::{export_prometheus, render_prometheus};
