use std::time::Duration;
use std::time::Instant;

use super::TerminationCondition;

/// The wall-clock limit on a planning run, as given by `--time-limit` in milliseconds. The clock
/// starts when the budget is created, so the time spent encoding before the first solve is not
/// counted against it.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    started_at: Instant,
    budget: Duration,
}

impl TimeBudget {
    pub fn starting_now(budget: Duration) -> TimeBudget {
        TimeBudget {
            started_at: Instant::now(),
            budget,
        }
    }

    /// A budget of `milliseconds`, starting now. A zero budget is exhausted before the first
    /// solve, so the planner stops without a placement.
    pub fn from_millis(milliseconds: u64) -> TimeBudget {
        TimeBudget::starting_now(Duration::from_millis(milliseconds))
    }

    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started_at.elapsed())
    }
}

impl TerminationCondition for TimeBudget {
    fn should_stop(&mut self) -> bool {
        self.remaining().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_exhausted_immediately() {
        let mut budget = TimeBudget::from_millis(0);

        assert_eq!(Duration::ZERO, budget.remaining());
        assert!(budget.should_stop());
    }

    #[test]
    fn long_budget_leaves_time_for_solving() {
        let mut budget = TimeBudget::from_millis(60_000);

        assert!(budget.remaining() > Duration::from_secs(1));
        assert!(!budget.should_stop());
    }
}
