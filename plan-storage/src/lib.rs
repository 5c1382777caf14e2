//! # plan-storage
//! Finds a placement of time-bounded items into a linear storage space which uses as few slots
//! as possible.
//!
//! Every item occupies a contiguous block of slots on every day from its begin day up to and
//! including its end day. Items stored on a common day may not overlap, and items of the same
//! category additionally keep at least one empty slot between them. The problem is encoded into
//! propositional clauses ([`encoders::StorageModel`]) which are handed to an incremental SAT
//! solver ([`engine::SatEngine`]); the [`optimisation::StoragePlanner`] then tightens the width
//! bound until no narrower placement exists.
//!
//! ```no_run
//! # use plan_storage::basic_types::{Item, ItemId, ItemTable};
//! # use plan_storage::engine::EngineOptions;
//! # use plan_storage::engine::termination::Indefinite;
//! let items = ItemTable::new(vec![
//!     Item { id: ItemId(0), begin: 0, end: 3, width: 2, category: 0 },
//!     Item { id: ItemId(1), begin: 2, end: 5, width: 1, category: 0 },
//! ])?;
//!
//! let result = plan_storage::plan(items, 10, EngineOptions::default(), Indefinite)?;
//! println!("used width: {:?}", result.solution().map(|placement| placement.used_width()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[doc(hidden)]
pub mod asserts;
pub mod basic_types;
pub mod checker;
pub mod encoders;
pub mod engine;
pub mod optimisation;
pub mod parsers;
mod result;

use basic_types::ItemTable;
use engine::termination::TerminationCondition;
use engine::EngineOptions;
use optimisation::OptimisationResult;
use optimisation::StoragePlanner;
pub use result::PlanError;
pub use result::PlanResult;

/// Encode `items` for the given capacity into a fresh CaDiCaL instance and search for the
/// narrowest placement until optimality is proven or `termination` triggers.
///
/// The result is never [`OptimisationResult::Infeasible`]; a problem without any placement is
/// reported as [`PlanError::InfeasibleProblem`].
pub fn plan(
    items: ItemTable,
    capacity: u32,
    options: EngineOptions,
    termination: impl TerminationCondition + Clone,
) -> PlanResult<OptimisationResult> {
    let mut planner = StoragePlanner::with_cadical(items, capacity, options)?;

    match planner.solve(termination, |_| {})? {
        OptimisationResult::Infeasible => Err(PlanError::InfeasibleProblem),
        result => Ok(result),
    }
}
