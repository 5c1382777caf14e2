//! The solving engine is the incremental satisfiability backend the planner drives. The encoders
//! only rely on the [`SatEngine`] contract; [`CadicalEngine`] provides it through CaDiCaL.

mod cadical;
pub mod termination;

pub use cadical::CadicalEngine;
use thiserror::Error;

use crate::basic_types::ClauseSink;
use crate::basic_types::Literal;
use termination::TerminationCondition;

/// The answer of a single call to [`SatEngine::solve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Satisfiable,
    Unsatisfiable,
    /// The call was terminated before reaching a conclusion.
    Interrupted,
}

/// A failure reported by the backend.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EngineError(String);

impl EngineError {
    pub fn new(message: impl std::fmt::Display) -> EngineError {
        EngineError(message.to_string())
    }
}

/// Options which are applied when the engine is created.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOptions {
    /// Whether the backend reports its own progress. Has no influence on the answers.
    pub verbose: bool,
}

/// The capabilities the planner needs from an incremental satisfiability solver.
///
/// Variables are opaque positive integers allocated by the caller; the engine learns about them
/// through the clauses it is given.
pub trait SatEngine: ClauseSink {
    /// Solve the clauses added so far. The `assumptions` only hold for this call.
    fn solve(&mut self, assumptions: &[Literal]) -> Result<SolveOutcome, EngineError>;

    /// The truth value of `literal` in the most recent satisfying assignment.
    fn value(&self, literal: Literal) -> Result<bool, EngineError>;

    /// Install the hook which is polled while a solve is in flight. When it reports that the
    /// solver should stop, the ongoing call returns [`SolveOutcome::Interrupted`].
    fn set_terminator(&mut self, termination: Box<dyn TerminationCondition>);
}
