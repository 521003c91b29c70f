use sea_orm::DbErr;
use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The upstream data could not be turned into a stored record.
    #[error("Reconcile error: {0}")]
    Reconcile(String),

    #[error("No finished contests returned by the source")]
    NoContests,
}

pub type Result<T> = std::result::Result<T, IngestError>;
