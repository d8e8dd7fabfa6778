//! Acceleration trigger evaluation

use serde::{Deserialize, Serialize};

use super::schedule::VestedPosition;
use crate::terms::{AccelerationPolicy, VestingTerms};

/// Standard double-trigger window: termination must follow the change of
/// control within this many months. A parameter, not a hidden constant —
/// callers may negotiate a different window.
pub const DEFAULT_DOUBLE_TRIGGER_WINDOW_MONTHS: u32 = 12;

/// Events relevant to acceleration at evaluation time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub change_of_control: bool,

    /// Involuntary termination of the recipient
    pub terminated: bool,

    /// Months between the change of control and the termination.
    /// Ignored unless both events occurred.
    pub months_after_change: u32,
}

/// Apply the grant's acceleration policy to a vested position.
///
/// Single trigger vests everything on a change of control. Double trigger
/// vests everything when the recipient is involuntarily terminated within
/// `window_months` after a change of control. Otherwise the position is
/// returned unchanged.
pub fn apply_acceleration(
    position: &VestedPosition,
    terms: &VestingTerms,
    trigger: &TriggerEvent,
    window_months: u32,
) -> VestedPosition {
    let accelerated = match terms.acceleration {
        AccelerationPolicy::None => false,
        AccelerationPolicy::SingleTrigger => trigger.change_of_control,
        AccelerationPolicy::DoubleTrigger => {
            trigger.change_of_control
                && trigger.terminated
                && trigger.months_after_change <= window_months
        }
    };

    if accelerated {
        VestedPosition {
            vested_shares: terms.total_shares,
            vested_pct: 100.0,
            is_cliff_reached: true,
        }
    } else {
        *position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vesting::vested_position;
    use approx::assert_relative_eq;

    fn grant(policy: AccelerationPolicy) -> VestingTerms {
        VestingTerms {
            recipient: "Founding Team Member".to_string(),
            total_shares: 1_500_000.0,
            vesting_months: 48,
            cliff_months: 12,
            acceleration: policy,
        }
    }

    #[test]
    fn test_single_trigger_vests_on_change_of_control() {
        let terms = grant(AccelerationPolicy::SingleTrigger);
        let position = vested_position(&terms, 6).unwrap();
        assert_eq!(position.vested_shares, 0.0); // pre-cliff

        let trigger = TriggerEvent {
            change_of_control: true,
            terminated: false,
            months_after_change: 0,
        };
        let accelerated = apply_acceleration(
            &position,
            &terms,
            &trigger,
            DEFAULT_DOUBLE_TRIGGER_WINDOW_MONTHS,
        );
        assert_relative_eq!(accelerated.vested_shares, 1_500_000.0);
        assert!(accelerated.is_cliff_reached);
    }

    #[test]
    fn test_double_trigger_needs_both_events() {
        let terms = grant(AccelerationPolicy::DoubleTrigger);
        let position = vested_position(&terms, 18).unwrap();

        let change_only = TriggerEvent {
            change_of_control: true,
            terminated: false,
            months_after_change: 0,
        };
        let unchanged = apply_acceleration(&position, &terms, &change_only, 12);
        assert_relative_eq!(unchanged.vested_shares, position.vested_shares);

        let both = TriggerEvent {
            change_of_control: true,
            terminated: true,
            months_after_change: 3,
        };
        let accelerated = apply_acceleration(&position, &terms, &both, 12);
        assert_relative_eq!(accelerated.vested_shares, 1_500_000.0);
    }

    #[test]
    fn test_double_trigger_window_edge() {
        let terms = grant(AccelerationPolicy::DoubleTrigger);
        let position = vested_position(&terms, 18).unwrap();

        let at_window = TriggerEvent {
            change_of_control: true,
            terminated: true,
            months_after_change: 12,
        };
        assert_relative_eq!(
            apply_acceleration(&position, &terms, &at_window, 12).vested_shares,
            1_500_000.0
        );

        let past_window = TriggerEvent {
            months_after_change: 13,
            ..at_window
        };
        assert_relative_eq!(
            apply_acceleration(&position, &terms, &past_window, 12).vested_shares,
            position.vested_shares
        );

        // Window is configurable: a 24-month window accepts month 13
        assert_relative_eq!(
            apply_acceleration(&position, &terms, &past_window, 24).vested_shares,
            1_500_000.0
        );
    }

    #[test]
    fn test_no_acceleration_policy() {
        let terms = grant(AccelerationPolicy::None);
        let position = vested_position(&terms, 18).unwrap();
        let trigger = TriggerEvent {
            change_of_control: true,
            terminated: true,
            months_after_change: 0,
        };
        let result = apply_acceleration(&position, &terms, &trigger, 12);
        assert_relative_eq!(result.vested_shares, position.vested_shares);
    }
}
