use std::num::NonZeroU32;

use super::Literal;
use super::PropositionalVariable;

/// Hands out fresh [`PropositionalVariable`]s from a single, monotonically increasing counter.
///
/// Every encoder receives the same allocator, which keeps the numbering of the model a pure
/// function of the order in which variables are requested.
#[derive(Clone, Debug, Default)]
pub struct VariableAllocator {
    num_variables: u32,
}

impl VariableAllocator {
    pub fn new_variable(&mut self) -> PropositionalVariable {
        self.num_variables += 1;
        PropositionalVariable::new(
            NonZeroU32::new(self.num_variables).expect("counter starts at one"),
        )
    }

    pub fn new_literal(&mut self) -> Literal {
        Literal::new(self.new_variable(), true)
    }

    /// An endless stream of fresh positive literals; take as many as needed.
    pub fn new_literals(&mut self) -> impl Iterator<Item = Literal> + '_ {
        std::iter::from_fn(|| Some(self.new_literal()))
    }

    /// The number of variables handed out so far, which is also the largest identifier in use.
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }
}
