mod clause_sink;
mod item;
mod literal;
mod placement;
mod variable_allocator;

pub use clause_sink::*;
pub use item::*;
pub use literal::*;
pub use placement::*;
pub use variable_allocator::*;
