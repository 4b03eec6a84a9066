//! Score → [`State`] classification with recovery hysteresis.
//!
//! A degradation (CONTEMPLATIVE or MYSTICAL) stamps `last_degraded`. If the
//! score climbs back into the HARMONIC band within
//! [`RECOVERY_WINDOW_SECS`] of that stamp, recovery mode is armed and the
//! lowered thresholds below apply until the score reaches EUPHORIC.
//!
//! ```text
//!                  standard   recovery
//! EUPHORIC         > 1.4      > 1.2   (clears recovery)
//! HARMONIC         > 1.0      > 0.85  (standard: may arm recovery)
//! CONTEMPLATIVE    > 0.8      > 0.65  (standard: stamps last_degraded)
//! MYSTICAL         else       else    (standard: stamps last_degraded)
//! ```

use harmony_core::{RECOVERY_WINDOW_SECS, State};
use tracing::{debug, info, warn};

const EUPHORIC_THRESHOLD: f64 = 1.4;
const HARMONIC_THRESHOLD: f64 = 1.0;
const CONTEMPLATIVE_THRESHOLD: f64 = 0.8;

const RECOVERY_EUPHORIC_THRESHOLD: f64 = 1.2;
const RECOVERY_HARMONIC_THRESHOLD: f64 = 0.85;
const RECOVERY_CONTEMPLATIVE_THRESHOLD: f64 = 0.65;

/// Hysteresis state machine owned by a single scorer.
#[derive(Debug, Default)]
pub struct StateClassifier {
    recovery_mode: bool,
    /// Unix seconds of the most recent CONTEMPLATIVE/MYSTICAL reading.
    last_degraded: Option<f64>,
    /// Last state returned, for transition logging only.
    last_state: Option<State>,
}

impl StateClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recovery_mode(&self) -> bool {
        self.recovery_mode
    }

    pub fn last_degraded(&self) -> Option<f64> {
        self.last_degraded
    }

    /// Classify `score` at time `now` (unix seconds).
    pub fn classify(&mut self, score: f64, now: f64) -> State {
        let state = if self.recovery_mode {
            self.classify_recovering(score)
        } else {
            self.classify_standard(score, now)
        };

        if self.last_state != Some(state) {
            match state {
                State::Mystical => warn!(score, from = ?self.last_state, "entered MYSTICAL state"),
                _ => debug!(score, from = ?self.last_state, to = %state, "state transition"),
            }
            self.last_state = Some(state);
        }

        state
    }

    fn classify_recovering(&mut self, score: f64) -> State {
        if score > RECOVERY_EUPHORIC_THRESHOLD {
            self.recovery_mode = false;
            info!(score, "recovery complete, leaving recovery mode");
            State::Euphoric
        } else if score > RECOVERY_HARMONIC_THRESHOLD {
            State::Harmonic
        } else if score > RECOVERY_CONTEMPLATIVE_THRESHOLD {
            State::Contemplative
        } else {
            State::Mystical
        }
    }

    fn classify_standard(&mut self, score: f64, now: f64) -> State {
        if score > EUPHORIC_THRESHOLD {
            State::Euphoric
        } else if score > HARMONIC_THRESHOLD {
            if let Some(degraded_at) = self.last_degraded
                && (0.0..RECOVERY_WINDOW_SECS).contains(&(now - degraded_at))
            {
                self.recovery_mode = true;
                info!(
                    score,
                    since_degraded_secs = now - degraded_at,
                    "recent degradation, entering recovery mode"
                );
            }
            State::Harmonic
        } else if score > CONTEMPLATIVE_THRESHOLD {
            self.last_degraded = Some(now);
            State::Contemplative
        } else {
            self.last_degraded = Some(now);
            State::Mystical
        }
    }
}
