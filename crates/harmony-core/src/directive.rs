//! Operational directives keyed by [`State`].
//!
//! The table is static: every state maps to exactly one fixed
//! [`Directive`]. The external control loop uses it to pick a monitoring
//! cadence, routing preference, scaling action, and alert level.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::types::State;

/// Which paths the routing layer should favour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    Performance,
    Balanced,
    Reliability,
    Survival,
}

/// Advisory action for the autoscaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingAction {
    /// Trim over-provisioned capacity.
    Optimize,
    Maintain,
    /// Pre-warm capacity in case the situation worsens.
    Prepare,
    EmergencyScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

/// Advisory operational parameters for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub state: State,
    pub monitoring_interval_sec: u64,
    pub enable_aggressive_healing: bool,
    pub route_preference: RoutePreference,
    pub scaling_action: ScalingAction,
    pub alert_level: AlertLevel,
    pub message: &'static str,
}

const EUPHORIC: Directive = Directive {
    state: State::Euphoric,
    monitoring_interval_sec: 120,
    enable_aggressive_healing: false,
    route_preference: RoutePreference::Performance,
    scaling_action: ScalingAction::Optimize,
    alert_level: AlertLevel::Info,
    message: "Wish fulfilled. Mesh running at peak harmony.",
};

const HARMONIC: Directive = Directive {
    state: State::Harmonic,
    monitoring_interval_sec: 60,
    enable_aggressive_healing: false,
    route_preference: RoutePreference::Balanced,
    scaling_action: ScalingAction::Maintain,
    alert_level: AlertLevel::Info,
    message: "Everything is in balance.",
};

const CONTEMPLATIVE: Directive = Directive {
    state: State::Contemplative,
    monitoring_interval_sec: 30,
    enable_aggressive_healing: false,
    route_preference: RoutePreference::Reliability,
    scaling_action: ScalingAction::Prepare,
    alert_level: AlertLevel::Warning,
    message: "Reflecting. Watching closely for degradation.",
};

const MYSTICAL: Directive = Directive {
    state: State::Mystical,
    monitoring_interval_sec: 10,
    enable_aggressive_healing: true,
    route_preference: RoutePreference::Survival,
    scaling_action: ScalingAction::EmergencyScale,
    alert_level: AlertLevel::Critical,
    message: "Diving into the depths. Aggressive healing engaged.",
};

impl RoutePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutePreference::Performance => "performance",
            RoutePreference::Balanced => "balanced",
            RoutePreference::Reliability => "reliability",
            RoutePreference::Survival => "survival",
        }
    }
}

impl ScalingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalingAction::Optimize => "optimize",
            ScalingAction::Maintain => "maintain",
            ScalingAction::Prepare => "prepare",
            ScalingAction::EmergencyScale => "emergency_scale",
        }
    }
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_as_str!(RoutePreference, ScalingAction, AlertLevel);

impl Directive {
    /// Look up the directive for a state.
    pub fn for_state(state: State) -> Directive {
        match state {
            State::Euphoric => EUPHORIC,
            State::Harmonic => HARMONIC,
            State::Contemplative => CONTEMPLATIVE,
            State::Mystical => MYSTICAL,
        }
    }

    pub fn monitoring_interval(&self) -> Duration {
        Duration::from_secs(self.monitoring_interval_sec)
    }
}

impl From<State> for Directive {
    fn from(state: State) -> Self {
        Directive::for_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euphoric_directive() {
        let d = Directive::for_state(State::Euphoric);
        assert_eq!(d.state, State::Euphoric);
        assert_eq!(d.monitoring_interval_sec, 120);
        assert_eq!(d.route_preference, RoutePreference::Performance);
        assert_eq!(d.scaling_action, ScalingAction::Optimize);
        assert!(!d.enable_aggressive_healing);
    }

    #[test]
    fn harmonic_directive() {
        let d = Directive::for_state(State::Harmonic);
        assert_eq!(d.monitoring_interval(), Duration::from_secs(60));
        assert_eq!(d.route_preference, RoutePreference::Balanced);
        assert_eq!(d.alert_level, AlertLevel::Info);
    }

    #[test]
    fn contemplative_directive() {
        let d = Directive::for_state(State::Contemplative);
        assert_eq!(d.monitoring_interval_sec, 30);
        assert_eq!(d.route_preference, RoutePreference::Reliability);
        assert_eq!(d.alert_level, AlertLevel::Warning);
    }

    #[test]
    fn mystical_directive() {
        let d = Directive::for_state(State::Mystical);
        assert_eq!(d.monitoring_interval_sec, 10);
        assert!(d.enable_aggressive_healing);
        assert_eq!(d.route_preference, RoutePreference::Survival);
        assert_eq!(d.scaling_action, ScalingAction::EmergencyScale);
        assert_eq!(d.alert_level, AlertLevel::Critical);
    }

    #[test]
    fn healthier_states_poll_less_often() {
        let intervals: Vec<u64> = State::ALL
            .iter()
            .map(|s| Directive::for_state(*s).monitoring_interval_sec)
            .collect();
        assert!(intervals.windows(2).all(|w| w[0] > w[1]), "{intervals:?}");
    }

    #[test]
    fn display_matches_serialized_names() {
        for state in State::ALL {
            let d = Directive::for_state(state);
            let json = serde_json::to_value(d).unwrap();
            assert_eq!(json["route_preference"], d.route_preference.to_string());
            assert_eq!(json["scaling_action"], d.scaling_action.to_string());
            assert_eq!(json["alert_level"], d.alert_level.to_string());
        }
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let json = serde_json::to_value(Directive::for_state(State::Mystical)).unwrap();
        assert_eq!(json["state"], "MYSTICAL");
        assert_eq!(json["monitoring_interval_sec"], 10);
        assert_eq!(json["route_preference"], "survival");
        assert_eq!(json["scaling_action"], "emergency_scale");
        assert_eq!(json["alert_level"], "critical");
        assert_eq!(json["enable_aggressive_healing"], true);
    }
}
