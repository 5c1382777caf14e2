//! Translation of a storage planning problem into clauses.
//!
//! All encoders emit through a [`ClauseEmitter`], which threads the clause sink, the variable
//! allocator and the clause counter explicitly. Recursive encodings therefore draw their
//! auxiliary variables from the same allocator as the model itself.

mod cardinality_encoder;
mod clause_emitter;
mod storage_model;

pub use cardinality_encoder::at_most_one;
pub use cardinality_encoder::exactly_one;
pub use cardinality_encoder::PAIRWISE_THRESHOLD;
pub use clause_emitter::ClauseEmitter;
pub use storage_model::StorageModel;
