//! A [`TerminationCondition`] is polled by the solving engine while a solve is in flight, and by
//! the planner before every solve it issues. It indicates when the planner should stop, even if
//! no definitive conclusion has been reached.

mod cancellation_flag;
mod combinator;
mod indefinite;
mod time_budget;

pub use cancellation_flag::CancellationFlag;
pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines when
/// the planner should give up searching for narrower placements.
///
/// The condition is moved into the solving engine, which may poll it from within the solving
/// call; hence it needs to be `Send` and own its state.
pub trait TerminationCondition: Send + 'static {
    /// Returns `true` when the planner should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }
}
