//! Pure scoring functions.
//!
//! Nothing here touches history or classifier state. Clamping is
//! deliberately uneven: the packet and mesh factors are bounded, the CPU,
//! memory, and latency factors are not, so pathological samples can push
//! the composite score below zero or above [`PHI`].

use harmony_core::{MetricSample, PHI, TARGET_FREQUENCY_HZ, keys};

const CPU_TARGET: f64 = 60.0;
const MEMORY_TARGET: f64 = 65.0;
const LATENCY_TARGET_MS: f64 = 85.0;
/// Packet loss (percent) at which the packet factor reaches zero.
const PACKET_LOSS_CEILING: f64 = 1.6;
/// Peer count at which the mesh factor saturates.
const MESH_SATURATION_PEERS: f64 = 100.0;

const WEIGHT_CPU: f64 = 0.15;
const WEIGHT_MEMORY: f64 = 0.15;
const WEIGHT_LATENCY: f64 = 0.30;
const WEIGHT_PACKET: f64 = 0.25;
const WEIGHT_MESH: f64 = 0.15;

// Mesh-health sub-score parameters.
const HEALTH_SATURATION_PEERS: f64 = 10.0;
const HEALTH_MAX_LOSS: f64 = 10.0;
const HEALTH_MAX_LATENCY_MS: f64 = 150.0;
const HEALTH_MAX_MTTR_MIN: f64 = 10.0;

const WEIGHT_PEER_HEALTH: f64 = 0.25;
const WEIGHT_DELIVERY_HEALTH: f64 = 0.30;
const WEIGHT_LATENCY_HEALTH: f64 = 0.25;
const WEIGHT_HEALING_HEALTH: f64 = 0.20;

/// Per-factor breakdown of a composite score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFactors {
    pub cpu: f64,
    pub memory: f64,
    pub latency: f64,
    pub packet: f64,
    pub mesh: f64,
}

impl ScoreFactors {
    /// Extract the five factors from a sample.
    ///
    /// Missing CPU, memory, latency, and packet loss read as 0; a missing
    /// peer count reads as 1.
    pub fn from_sample(sample: &MetricSample) -> Self {
        let cpu = sample.get_or(keys::CPU_PERCENT, 0.0);
        let memory = sample.get_or(keys::MEMORY_PERCENT, 0.0);
        let latency = sample.get_or(keys::LATENCY_MS, 0.0);
        let loss = sample.get_or(keys::PACKET_LOSS, 0.0);
        let peers = sample.get_or(keys::MESH_CONNECTIVITY, 1.0);

        Self {
            cpu: 1.0 - (cpu - CPU_TARGET).abs() / 100.0,
            memory: 1.0 - (memory - MEMORY_TARGET).abs() / 100.0,
            latency: 1.0 / (1.0 + (latency - LATENCY_TARGET_MS).abs() / LATENCY_TARGET_MS),
            packet: (1.0 - loss / PACKET_LOSS_CEILING).max(0.0),
            mesh: ((1.0 + peers).ln() / (1.0 + MESH_SATURATION_PEERS).ln()).min(1.0),
        }
    }

    pub fn weighted_sum(&self) -> f64 {
        self.cpu * WEIGHT_CPU
            + self.memory * WEIGHT_MEMORY
            + self.latency * WEIGHT_LATENCY
            + self.packet * WEIGHT_PACKET
            + self.mesh * WEIGHT_MESH
    }
}

/// Composite score: weighted factor sum scaled by [`PHI`].
pub fn composite_score(sample: &MetricSample) -> f64 {
    ScoreFactors::from_sample(sample).weighted_sum() * PHI
}

/// Alignment in 0.0–1.0.
///
/// With a measured frequency, closeness to [`TARGET_FREQUENCY_HZ`];
/// otherwise closeness of the score itself to [`PHI`].
pub fn frequency_alignment(score: f64, frequency_hz: Option<f64>) -> f64 {
    match frequency_hz {
        Some(freq) => {
            (1.0 - (freq - TARGET_FREQUENCY_HZ).abs() / TARGET_FREQUENCY_HZ).clamp(0.0, 1.0)
        }
        None => (1.0 - (score - PHI).abs() / PHI).max(0.0),
    }
}

/// Infrastructure health in 0.0–1.0.
///
/// Absent metrics assume the worst: no peers, 100% loss, 1s latency,
/// and a 10 minute MTTR.
pub fn mesh_health(sample: &MetricSample) -> f64 {
    let peers = sample.get_or(keys::MESH_CONNECTIVITY, 0.0);
    let loss = sample.get_or(keys::PACKET_LOSS, 100.0);
    let latency = sample.get_or(keys::LATENCY_MS, 1000.0);
    let mttr = sample.get_or(keys::MTTR_MINUTES, 10.0);

    let peer_health = ((1.0 + peers).ln() / (1.0 + HEALTH_SATURATION_PEERS).ln()).min(1.0);
    let delivery_health = (1.0 - loss / HEALTH_MAX_LOSS).max(0.0);
    let latency_health = (1.0 - latency / HEALTH_MAX_LATENCY_MS).max(0.0);
    let healing_health = (1.0 - mttr / HEALTH_MAX_MTTR_MIN).max(0.0);

    peer_health * WEIGHT_PEER_HEALTH
        + delivery_health * WEIGHT_DELIVERY_HEALTH
        + latency_health * WEIGHT_LATENCY_HEALTH
        + healing_health * WEIGHT_HEALING_HEALTH
}

/// Mean of normalized score and alignment.
pub fn harmony_index(score: f64, alignment: f64) -> f64 {
    (score / PHI + alignment) / 2.0
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n).
pub(crate) fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Least-squares slope of `values` against their index.
///
/// Callers must pass at least two values; the denominator is zero otherwise.
pub(crate) fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cpu: f64, memory: f64, latency: f64, loss: f64, peers: f64) -> MetricSample {
        MetricSample::new()
            .with(keys::CPU_PERCENT, cpu)
            .with(keys::MEMORY_PERCENT, memory)
            .with(keys::LATENCY_MS, latency)
            .with(keys::PACKET_LOSS, loss)
            .with(keys::MESH_CONNECTIVITY, peers)
    }

    #[test]
    fn ideal_sample_scores_phi() {
        let ideal = sample(60.0, 65.0, 85.0, 0.0, 100.0);
        let factors = ScoreFactors::from_sample(&ideal);
        assert!((factors.weighted_sum() - 1.0).abs() < 1e-12);
        assert!((composite_score(&ideal) - 1.618033988749895).abs() < 1e-9);
    }

    #[test]
    fn documented_scenario_factors() {
        let s = sample(75.0, 80.0, 95.0, 0.5, 20.0);
        let f = ScoreFactors::from_sample(&s);

        assert!((f.cpu - 0.85).abs() < 1e-12);
        assert!((f.memory - 0.85).abs() < 1e-12);
        assert!((f.latency - 85.0 / 95.0).abs() < 1e-12);
        assert!((f.packet - 0.6875).abs() < 1e-12);
        assert!((f.mesh - 21f64.ln() / 101f64.ln()).abs() < 1e-12);

        let expected = (0.15 * 0.85
            + 0.15 * 0.85
            + 0.30 * (85.0 / 95.0)
            + 0.25 * 0.6875
            + 0.15 * (21f64.ln() / 101f64.ln()))
            * PHI;
        let score = composite_score(&s);
        assert!((score - expected).abs() < 1e-12);
        assert!(score > 1.28 && score < 1.29, "score was {score}");
    }

    #[test]
    fn empty_sample_uses_defaults() {
        let f = ScoreFactors::from_sample(&MetricSample::new());
        assert!((f.cpu - 0.4).abs() < 1e-12);
        assert!((f.memory - 0.35).abs() < 1e-12);
        assert!((f.latency - 0.5).abs() < 1e-12);
        assert_eq!(f.packet, 1.0);
        // One peer by default.
        assert!((f.mesh - 2f64.ln() / 101f64.ln()).abs() < 1e-12);

        let score = composite_score(&MetricSample::new());
        assert!(score.is_finite() && score > 0.0);
    }

    #[test]
    fn cpu_and_memory_are_not_clamped() {
        let f = ScoreFactors::from_sample(&sample(250.0, 300.0, 85.0, 0.0, 100.0));
        assert!((f.cpu - -0.9).abs() < 1e-12);
        assert!((f.memory - -1.35).abs() < 1e-12);
        assert!(composite_score(&sample(250.0, 300.0, 85.0, 0.0, 100.0)) < PHI);
    }

    #[test]
    fn packet_factor_floors_at_zero() {
        assert_eq!(ScoreFactors::from_sample(&sample(60.0, 65.0, 85.0, 1.6, 1.0)).packet, 0.0);
        assert_eq!(ScoreFactors::from_sample(&sample(60.0, 65.0, 85.0, 40.0, 1.0)).packet, 0.0);
    }

    #[test]
    fn mesh_factor_caps_at_one() {
        assert_eq!(ScoreFactors::from_sample(&sample(60.0, 65.0, 85.0, 0.0, 5000.0)).mesh, 1.0);
    }

    #[test]
    fn latency_factor_never_reaches_zero() {
        let f = ScoreFactors::from_sample(&sample(60.0, 65.0, 1_000_000.0, 0.0, 1.0));
        assert!(f.latency > 0.0);
        assert!(f.latency < 0.001);
    }

    #[test]
    fn alignment_with_measured_frequency() {
        assert_eq!(frequency_alignment(1.5, Some(108.0)), 1.0);
        assert!((frequency_alignment(1.5, Some(54.0)) - 0.5).abs() < 1e-12);
        assert_eq!(frequency_alignment(1.5, Some(1000.0)), 0.0);
        let low = frequency_alignment(1.5, Some(1.0));
        assert!((0.0..=1.0).contains(&low));
    }

    #[test]
    fn alignment_proxy_from_score() {
        assert_eq!(frequency_alignment(PHI, None), 1.0);
        assert!(frequency_alignment(0.5, None) < frequency_alignment(1.5, None));
        assert_eq!(frequency_alignment(-5.0, None), 0.0);
    }

    #[test]
    fn mesh_health_missing_metrics_is_zero() {
        assert_eq!(mesh_health(&MetricSample::new()), 0.0);
    }

    #[test]
    fn mesh_health_healthy_mesh() {
        let s = MetricSample::new()
            .with(keys::MESH_CONNECTIVITY, 15.0)
            .with(keys::PACKET_LOSS, 0.5)
            .with(keys::LATENCY_MS, 85.0)
            .with(keys::MTTR_MINUTES, 2.0);
        let health = mesh_health(&s);
        assert!(health > 0.7 && health <= 1.0, "health was {health}");
    }

    #[test]
    fn mesh_health_degraded_mesh() {
        let s = MetricSample::new()
            .with(keys::MESH_CONNECTIVITY, 2.0)
            .with(keys::PACKET_LOSS, 10.0)
            .with(keys::LATENCY_MS, 200.0)
            .with(keys::MTTR_MINUTES, 15.0);
        assert!(mesh_health(&s) < 0.5);
    }

    #[test]
    fn mesh_health_is_monotonic() {
        let base = |peers: f64, loss: f64| {
            mesh_health(
                &MetricSample::new()
                    .with(keys::MESH_CONNECTIVITY, peers)
                    .with(keys::PACKET_LOSS, loss)
                    .with(keys::LATENCY_MS, 50.0)
                    .with(keys::MTTR_MINUTES, 3.0),
            )
        };

        let mut prev = f64::NEG_INFINITY;
        for peers in 0..30 {
            let h = base(peers as f64, 1.0);
            assert!(h >= prev, "peers={peers}: {h} < {prev}");
            prev = h;
        }

        let mut prev = f64::INFINITY;
        for tenth in 0..150 {
            let h = base(5.0, tenth as f64 / 10.0);
            assert!(h <= prev, "loss={}: {h} > {prev}", tenth as f64 / 10.0);
            prev = h;
        }
    }

    #[test]
    fn harmony_index_averages_normalized_score_and_alignment() {
        assert!((harmony_index(PHI, 1.0) - 1.0).abs() < 1e-12);
        assert!((harmony_index(0.0, 0.5) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn variance_of_constant_series_is_zero() {
        assert!(population_variance(&[1.2; 20]) < 1e-12);
        assert!((population_variance(&[0.0, 2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn slope_of_linear_series() {
        let ys: Vec<f64> = (0..50).map(|i| 0.5 + 0.02 * i as f64).collect();
        assert!((ols_slope(&ys) - 0.02).abs() < 1e-9);
        assert!(ols_slope(&[1.0; 10]).abs() < 1e-12);
    }
}
