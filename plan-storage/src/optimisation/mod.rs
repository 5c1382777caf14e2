//! The anytime search for the narrowest placement.
//!
//! [`StoragePlanner`] first finds any placement within the capacity, then repeatedly forbids every
//! placement at least as wide as the best one found and solves again, until the engine proves that
//! no narrower placement exists or the search is cancelled.

mod optimisation_result;
mod stopwatch;
mod storage_planner;

pub use optimisation_result::OptimisationResult;
pub use stopwatch::Stopwatch;
pub use storage_planner::DriverState;
pub use storage_planner::StoragePlanner;
