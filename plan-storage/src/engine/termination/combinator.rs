use super::TerminationCondition;

/// Stops the planner as soon as either of two conditions asks for it. The binary pairs the
/// interrupt and termination signals with the optional `--time-limit`, so that whichever comes
/// first ends the search and the best placement found so far is kept.
///
/// Both conditions are polled on every check; neither is short-circuited away.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> Combinator<First, Second> {
    pub fn new(first: First, second: Second) -> Self {
        Combinator { first, second }
    }
}

impl<First: TerminationCondition, Second: TerminationCondition> TerminationCondition
    for Combinator<First, Second>
{
    fn should_stop(&mut self) -> bool {
        let first = self.first.should_stop();
        let second = self.second.should_stop();
        first || second
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::termination::CancellationFlag;
    use crate::engine::termination::TimeBudget;

    #[test]
    fn cancellation_stops_before_the_time_limit() {
        let flag = CancellationFlag::default();
        let mut termination =
            Combinator::new(flag.clone(), Some(TimeBudget::from_millis(60_000)));

        assert!(!termination.should_stop());
        flag.cancel();
        assert!(termination.should_stop());
    }

    #[test]
    fn exhausted_time_limit_stops_without_cancellation() {
        let mut termination =
            Combinator::new(CancellationFlag::default(), Some(TimeBudget::from_millis(0)));

        assert!(termination.should_stop());
    }

    #[test]
    fn absent_time_limit_never_stops_on_its_own() {
        let mut termination = Combinator::new(CancellationFlag::default(), None::<TimeBudget>);

        assert!(!termination.should_stop());
    }
}
