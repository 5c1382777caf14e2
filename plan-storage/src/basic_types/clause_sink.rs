use super::Literal;
use crate::engine::EngineError;

/// The channel through which encoders emit clauses. Clauses are never retracted once added.
pub trait ClauseSink {
    fn add_clause(&mut self, clause: &[Literal]) -> Result<(), EngineError>;
}

/// An in-memory list of clauses, in the order in which they were emitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClauseDatabase {
    clauses: Vec<Vec<Literal>>,
}

impl ClauseDatabase {
    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.clauses
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
}

impl ClauseSink for ClauseDatabase {
    fn add_clause(&mut self, clause: &[Literal]) -> Result<(), EngineError> {
        self.clauses.push(clause.to_vec());
        Ok(())
    }
}
