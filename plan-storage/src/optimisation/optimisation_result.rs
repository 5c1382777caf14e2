use crate::basic_types::Placement;

#[cfg(doc)]
use super::StoragePlanner;

/// The result of calling [`StoragePlanner::solve()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptimisationResult {
    /// There exists no placement which uses fewer slots than this one.
    Optimal { solution: Placement },
    /// The search was cancelled before optimality was proven. However, at least one placement
    /// was found. The provided placement is the narrowest one that was encountered.
    Satisfiable { best_solution: Placement },
    /// No placement fits within the capacity.
    Infeasible,
    /// The search was cancelled before any placement was found.
    Unknown,
}

impl OptimisationResult {
    /// The best placement found, if any.
    pub fn solution(&self) -> Option<&Placement> {
        match self {
            OptimisationResult::Optimal { solution } => Some(solution),
            OptimisationResult::Satisfiable { best_solution } => Some(best_solution),
            OptimisationResult::Infeasible | OptimisationResult::Unknown => None,
        }
    }
}
