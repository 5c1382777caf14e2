use log::debug;
use log::info;

use super::OptimisationResult;
use super::Stopwatch;
use crate::basic_types::ItemTable;
use crate::basic_types::Placement;
use crate::checker::verify_placement;
use crate::encoders::StorageModel;
use crate::engine::termination::TerminationCondition;
use crate::engine::CadicalEngine;
use crate::engine::EngineOptions;
use crate::engine::SatEngine;
use crate::engine::SolveOutcome;
use crate::result::PlanError;
use crate::result::PlanResult;

/// The phases a [`StoragePlanner`] moves through. `Optimal`, `Infeasible` and `Cancelled` are
/// terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No solve has been issued yet.
    Unsolved,
    /// The first placement has been found.
    Feasible,
    /// The bound has been tightened below the best placement and the engine is asked for a
    /// narrower one.
    Improving,
    /// The engine proved that no narrower placement than the best one exists.
    Optimal,
    /// The first solve proved that nothing fits within the capacity.
    Infeasible,
    /// The search was stopped before reaching a conclusion.
    Cancelled,
}

/// Minimises the used width of a storage model by linear search from above.
///
/// The model is encoded into the engine once, on construction. Every improvement step only adds
/// unit clauses, so the used widths of successive placements strictly decrease.
#[derive(Debug)]
pub struct StoragePlanner<Engine> {
    engine: Engine,
    items: ItemTable,
    model: StorageModel,
    state: DriverState,
    history: Vec<u32>,
    best_solution: Option<Placement>,
}

impl StoragePlanner<CadicalEngine> {
    /// Validate the input, start CaDiCaL and encode the model into it.
    pub fn with_cadical(
        items: ItemTable,
        capacity: u32,
        options: EngineOptions,
    ) -> PlanResult<StoragePlanner<CadicalEngine>> {
        items.validate(capacity)?;
        let engine = CadicalEngine::new(options).map_err(PlanError::SolvingEngineUnavailable)?;

        StoragePlanner::new(engine, items, capacity)
    }
}

impl<Engine: SatEngine> StoragePlanner<Engine> {
    pub fn new(
        mut engine: Engine,
        items: ItemTable,
        capacity: u32,
    ) -> PlanResult<StoragePlanner<Engine>> {
        let model = StorageModel::encode(&items, capacity, &mut engine)?;

        Ok(StoragePlanner {
            engine,
            items,
            model,
            state: DriverState::Unsolved,
            history: vec![],
            best_solution: None,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The used widths of the placements found so far, in the order they were found.
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    pub fn best_solution(&self) -> Option<&Placement> {
        self.best_solution.as_ref()
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    pub fn model(&self) -> &StorageModel {
        &self.model
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run the search until optimality is proven or `termination` asks to stop.
    ///
    /// A copy of `termination` is handed to the engine so that an in-flight solve can be aborted;
    /// the planner itself polls the condition before every solve. Every placement found is passed
    /// to `on_solution` before the search continues.
    pub fn solve<Termination: TerminationCondition + Clone>(
        &mut self,
        mut termination: Termination,
        mut on_solution: impl FnMut(&Placement),
    ) -> PlanResult<OptimisationResult> {
        crate::planner_assert_simple!(
            self.state == DriverState::Unsolved,
            "The search of a planner can only be run once."
        );

        let process_time = Stopwatch::starting_now();
        self.engine.set_terminator(Box::new(termination.clone()));

        let mut best_solution = match self.attempt(&mut termination)? {
            Attempt::Found(placement) => {
                self.transition(DriverState::Feasible);
                info!(
                    "Solution found with used width {} after {:.2} seconds",
                    placement.used_width(),
                    process_time.elapsed_seconds()
                );
                self.record(&placement, &mut on_solution);
                placement
            }
            Attempt::Exhausted => {
                self.transition(DriverState::Infeasible);
                info!("No placement fits within capacity {}", self.model.capacity());
                return Ok(OptimisationResult::Infeasible);
            }
            Attempt::Cancelled => {
                self.transition(DriverState::Cancelled);
                info!("Interrupted before any placement was found");
                return Ok(OptimisationResult::Unknown);
            }
        };

        loop {
            let used_width = best_solution.used_width();

            if used_width == 0 {
                self.transition(DriverState::Optimal);
                return Ok(OptimisationResult::Optimal {
                    solution: best_solution,
                });
            }

            self.transition(DriverState::Improving);
            self.model.tighten_below(used_width, &mut self.engine)?;

            match self.attempt(&mut termination)? {
                Attempt::Found(placement) => {
                    crate::planner_assert_moderate!(
                        placement.used_width() < used_width,
                        "Each improvement step must yield a strictly narrower placement."
                    );

                    info!(
                        "Solution improved to used width {} after {:.2} seconds",
                        placement.used_width(),
                        process_time.elapsed_seconds()
                    );
                    self.record(&placement, &mut on_solution);
                    best_solution = placement;
                }
                Attempt::Exhausted => {
                    self.transition(DriverState::Optimal);
                    info!(
                        "Found optimum with used width {used_width} after {:.2} seconds",
                        process_time.elapsed_seconds()
                    );
                    return Ok(OptimisationResult::Optimal {
                        solution: best_solution,
                    });
                }
                Attempt::Cancelled => {
                    self.transition(DriverState::Cancelled);
                    info!("Interrupted, keeping the placement with used width {used_width}");
                    return Ok(OptimisationResult::Satisfiable { best_solution });
                }
            }
        }
    }

    /// Solve once under the assumption that at most `width` slots are used. No clauses are added,
    /// but bounds asserted by an earlier [`StoragePlanner::solve`] still apply.
    pub fn probe_width(&mut self, width: u32) -> PlanResult<SolveOutcome> {
        let assumptions = self
            .model
            .width_bound_literal(width)
            .into_iter()
            .collect::<Vec<_>>();

        Ok(self.engine.solve(&assumptions)?)
    }

    fn attempt(&mut self, termination: &mut impl TerminationCondition) -> PlanResult<Attempt> {
        if termination.should_stop() {
            return Ok(Attempt::Cancelled);
        }

        match self.engine.solve(&[])? {
            SolveOutcome::Satisfiable => {
                let placement = self.model.extract_placement(&self.engine, &self.items)?;
                crate::planner_assert_moderate!(
                    verify_placement(&self.items, self.model.capacity(), &placement).is_ok(),
                    "Every extracted placement must be valid."
                );
                Ok(Attempt::Found(placement))
            }
            // A stop request may have cut the search short without the engine noticing.
            SolveOutcome::Unsatisfiable if termination.should_stop() => Ok(Attempt::Cancelled),
            SolveOutcome::Unsatisfiable => Ok(Attempt::Exhausted),
            SolveOutcome::Interrupted => Ok(Attempt::Cancelled),
        }
    }

    fn record(&mut self, placement: &Placement, on_solution: &mut impl FnMut(&Placement)) {
        self.history.push(placement.used_width());
        on_solution(placement);
        self.best_solution = Some(placement.clone());
    }

    fn transition(&mut self, state: DriverState) {
        debug!("Planner state {:?} -> {state:?}", self.state);
        self.state = state;
    }
}

enum Attempt {
    Found(Placement),
    Exhausted,
    Cancelled,
}
