use log::debug;
use rustsat::solvers::ControlSignal;
use rustsat::solvers::Solve;
use rustsat::solvers::SolveIncremental;
use rustsat::solvers::SolverResult;
use rustsat::solvers::Terminate;
use rustsat::types::Clause;
use rustsat::types::Lit;
use rustsat::types::TernaryVal;
use rustsat_cadical::CaDiCaL;

use super::termination::TerminationCondition;
use super::EngineError;
use super::EngineOptions;
use super::SatEngine;
use super::SolveOutcome;
use crate::basic_types::ClauseSink;
use crate::basic_types::Literal;

/// A [`SatEngine`] backed by the CaDiCaL solver.
pub struct CadicalEngine {
    solver: CaDiCaL<'static, 'static>,
    num_solve_calls: usize,
}

impl std::fmt::Debug for CadicalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CadicalEngine")
            .field("num_solve_calls", &self.num_solve_calls)
            .finish_non_exhaustive()
    }
}

impl CadicalEngine {
    /// Create a fresh solver. Options can only be configured before the first clause is added,
    /// which is why verbosity is fixed here.
    pub fn new(options: EngineOptions) -> Result<CadicalEngine, EngineError> {
        let mut solver = CaDiCaL::default();

        let (option, value) = if options.verbose {
            ("report", 1)
        } else {
            ("quiet", 1)
        };
        solver
            .set_option(option, value)
            .map_err(|error| EngineError::new(format!("cannot set '{option}': {error}")))?;

        debug!("Initialised CaDiCaL with option {option}={value}");

        Ok(CadicalEngine {
            solver,
            num_solve_calls: 0,
        })
    }

    pub fn num_solve_calls(&self) -> usize {
        self.num_solve_calls
    }
}

fn to_lit(literal: Literal) -> Lit {
    // rustsat numbers variables from zero.
    Lit::new(
        literal.get_propositional_variable().index() - 1,
        literal.is_negative(),
    )
}

impl ClauseSink for CadicalEngine {
    fn add_clause(&mut self, clause: &[Literal]) -> Result<(), EngineError> {
        let clause = clause.iter().copied().map(to_lit).collect::<Clause>();
        self.solver.add_clause(clause).map_err(EngineError::new)
    }
}

impl SatEngine for CadicalEngine {
    fn solve(&mut self, assumptions: &[Literal]) -> Result<SolveOutcome, EngineError> {
        self.num_solve_calls += 1;

        let result = if assumptions.is_empty() {
            self.solver.solve()
        } else {
            let assumptions = assumptions.iter().copied().map(to_lit).collect::<Vec<_>>();
            self.solver.solve_assumps(&assumptions)
        }
        .map_err(EngineError::new)?;

        Ok(match result {
            SolverResult::Sat => SolveOutcome::Satisfiable,
            SolverResult::Unsat => SolveOutcome::Unsatisfiable,
            SolverResult::Interrupted => SolveOutcome::Interrupted,
        })
    }

    fn value(&self, literal: Literal) -> Result<bool, EngineError> {
        let value = self.solver.lit_val(to_lit(literal)).map_err(EngineError::new)?;

        // Variables the solver did not need to decide are free; we read them as false.
        Ok(value == TernaryVal::True)
    }

    fn set_terminator(&mut self, mut termination: Box<dyn TerminationCondition>) {
        self.solver.attach_terminator(move || {
            if termination.should_stop() {
                ControlSignal::Terminate
            } else {
                ControlSignal::Continue
            }
        });
    }
}
