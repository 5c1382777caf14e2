//! Clausal encodings of "at most one" and "exactly one" over arbitrary literal sets.
//!
//! Small sets are encoded pairwise. Larger sets use the two-product encoding: the literals are
//! laid out in a grid, every literal implies the selector of its row and of its column, and the
//! row and column selectors are in turn constrained to at most one. Two distinct true literals
//! differ in their row or their column, which would require two true selectors on one side.
//!
//! Reference:
//! Chen, Jingchao. A new SAT encoding of the at-most-one constraint.
//! Proc. Constraint Modelling and Reformulation, 2010.

use itertools::Itertools;

use super::ClauseEmitter;
use crate::basic_types::ClauseSink;
use crate::basic_types::Literal;
use crate::engine::EngineError;

/// Below this many literals the quadratic pairwise encoding is used.
pub const PAIRWISE_THRESHOLD: usize = 16;

/// Enforce that exactly one of `literals` is true.
pub fn exactly_one<Sink: ClauseSink>(
    emitter: &mut ClauseEmitter<'_, Sink>,
    literals: &[Literal],
) -> Result<(), EngineError> {
    emitter.add_clause(literals)?;
    at_most_one(emitter, literals)
}

/// Enforce that at most one of `literals` is true. Auxiliary variables are taken from the
/// emitter's allocator.
pub fn at_most_one<Sink: ClauseSink>(
    emitter: &mut ClauseEmitter<'_, Sink>,
    literals: &[Literal],
) -> Result<(), EngineError> {
    if literals.len() < PAIRWISE_THRESHOLD {
        for (&a, &b) in literals.iter().tuple_combinations() {
            emitter.add_clause(&[!a, !b])?;
        }
        return Ok(());
    }

    let num_rows = integer_square_root(literals.len());
    let num_columns = literals.len().div_ceil(num_rows);

    let rows = emitter.new_literals(num_rows);
    let columns = emitter.new_literals(num_columns);

    for (index, &literal) in literals.iter().enumerate() {
        emitter.add_clause(&[!literal, rows[index / num_columns]])?;
        emitter.add_clause(&[!literal, columns[index % num_columns]])?;
    }

    at_most_one(emitter, &rows)?;
    at_most_one(emitter, &columns)
}

fn integer_square_root(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
