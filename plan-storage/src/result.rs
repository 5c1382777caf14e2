use thiserror::Error;

use crate::basic_types::InputError;
use crate::engine::EngineError;
use crate::parsers::ItemTableError;

pub type PlanResult<T> = Result<T, PlanError>;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("The input is malformed, more details: {0}")]
    MalformedInput(#[from] ItemTableError),
    #[error("The problem has no placement within the storage capacity.")]
    InfeasibleProblem,
    #[error("The solving engine could not be initialised, more details: {0}")]
    SolvingEngineUnavailable(#[source] EngineError),
    #[error("The solving engine failed, more details: {0}")]
    Engine(#[from] EngineError),
}

impl From<InputError> for PlanError {
    fn from(error: InputError) -> Self {
        PlanError::MalformedInput(error.into())
    }
}
