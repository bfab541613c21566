//! Orchestration strategies and the hybrid trigger schedule.

use std::fmt;

/// Largest trigger percentage the hybrid strategy honours. Larger values are
/// clamped so that convergence checking always gets part of the budget.
pub const MAX_TRIGGER_PERCENT: u8 = 90;

/// How the orchestrator decides when to stop launching generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Always run `len` generations of plain sweeps.
    Fixed,
    /// Run checked sweeps and stop after the first generation with no swap.
    EarlyExit,
    /// Run plain sweeps for the first `trigger_percent` of the generation
    /// budget, then switch to checked sweeps with early exit.
    Hybrid { trigger_percent: u8 },
}

impl Strategy {
    /// Hybrid strategy with the trigger already clamped.
    pub fn hybrid(trigger_percent: u8) -> Self {
        Strategy::Hybrid {
            trigger_percent: clamp_trigger(trigger_percent),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Fixed => f.write_str("fixed"),
            Strategy::EarlyExit => f.write_str("early-exit"),
            Strategy::Hybrid { trigger_percent } => write!(f, "hybrid({trigger_percent}%)"),
        }
    }
}

/// Clamp a hybrid trigger to [`MAX_TRIGGER_PERCENT`].
pub fn clamp_trigger(trigger_percent: u8) -> u8 {
    trigger_percent.min(MAX_TRIGGER_PERCENT)
}

/// Whether generation `generation` of a `budget`-generation run is still in
/// the unchecked phase for a (clamped) trigger: `generation * 100 / budget <
/// trigger`, in integer arithmetic.
pub(crate) fn is_blind(generation: usize, budget: usize, trigger_percent: u8) -> bool {
    if budget == 0 {
        return false;
    }
    (generation as u128 * 100 / budget as u128) < u128::from(trigger_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_trigger() {
        assert_eq!(clamp_trigger(0), 0);
        assert_eq!(clamp_trigger(90), 90);
        assert_eq!(clamp_trigger(91), 90);
        assert_eq!(clamp_trigger(150), 90);
        assert_eq!(clamp_trigger(u8::MAX), 90);
        assert_eq!(
            Strategy::hybrid(150),
            Strategy::Hybrid { trigger_percent: 90 }
        );
    }

    #[test]
    fn test_blind_schedule() {
        // Budget 10, trigger 50: generations 0..5 blind, 5.. checked.
        let blind: Vec<bool> = (0..10).map(|j| is_blind(j, 10, 50)).collect();
        assert_eq!(
            blind,
            vec![true, true, true, true, true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_zero_trigger_never_blind() {
        assert!((0..100).all(|j| !is_blind(j, 100, 0)));
    }

    #[test]
    fn test_schedule_is_monotonic() {
        // Once checking starts it never turns off.
        for budget in [2usize, 3, 7, 100, 1001] {
            for trigger in [1u8, 33, 50, 90] {
                let phases: Vec<bool> = (0..budget).map(|j| is_blind(j, budget, trigger)).collect();
                let first_checked = phases.iter().position(|b| !b).unwrap_or(budget);
                assert!(phases[first_checked..].iter().all(|b| !b));
            }
        }
    }

    #[test]
    fn test_large_budget_does_not_overflow() {
        let budget = usize::MAX;
        assert!(is_blind(budget / 2, budget, 90));
        assert!(!is_blind(budget - 1, budget, 90));
    }

    #[test]
    fn test_display() {
        assert_eq!(Strategy::Fixed.to_string(), "fixed");
        assert_eq!(Strategy::EarlyExit.to_string(), "early-exit");
        assert_eq!(Strategy::hybrid(40).to_string(), "hybrid(40%)");
    }
}
