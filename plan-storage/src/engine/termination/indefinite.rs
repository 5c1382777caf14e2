use super::TerminationCondition;

/// Never stops the planner: the search runs until the used width is proven optimal or the
/// capacity is shown to be too small. Used by [`crate::plan`] callers and tests which want a
/// definitive answer.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
