use plan_storage::checker::PlacementViolation;
use plan_storage::parsers::ItemTableError;
use plan_storage::PlanError;
use thiserror::Error;

pub(crate) type PlanStorageResult<T> = Result<T, PlanStorageError>;

#[derive(Error, Debug)]
pub(crate) enum PlanStorageError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    Plan(#[from] PlanError),
    #[error("Interrupted before any placement was found.")]
    NoSolution,
    #[error("The solved placement is invalid, more details: {0}")]
    InvalidPlacement(#[from] PlacementViolation),
}

impl From<ItemTableError> for PlanStorageError {
    fn from(error: ItemTableError) -> Self {
        PlanStorageError::Plan(error.into())
    }
}
