use crate::basic_types::ClauseSink;
use crate::basic_types::Literal;
use crate::basic_types::VariableAllocator;
use crate::engine::EngineError;

/// The state shared by all encoders while a model is built: the sink receiving the clauses, the
/// variable allocator, and the number of clauses emitted.
#[derive(Debug)]
pub struct ClauseEmitter<'a, Sink> {
    sink: &'a mut Sink,
    allocator: &'a mut VariableAllocator,
    num_clauses_added: usize,
}

impl<'a, Sink: ClauseSink> ClauseEmitter<'a, Sink> {
    pub fn new(sink: &'a mut Sink, allocator: &'a mut VariableAllocator) -> Self {
        ClauseEmitter {
            sink,
            allocator,
            num_clauses_added: 0,
        }
    }

    pub fn add_clause(&mut self, clause: &[Literal]) -> Result<(), EngineError> {
        self.num_clauses_added += 1;
        self.sink.add_clause(clause)
    }

    pub fn new_literals(&mut self, amount: usize) -> Vec<Literal> {
        self.allocator.new_literals().take(amount).collect()
    }

    pub fn num_clauses_added(&self) -> usize {
        self.num_clauses_added
    }
}
