use sea_orm::{DbErr, SqlErr, TransactionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation Error: {0}")]
    Validation(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("you cannot follow yourself")]
    SelfReference,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<TransactionError<Error>> for Error {
    fn from(err: TransactionError<Error>) -> Self {
        match err {
            TransactionError::Connection(db) => Error::Db(db),
            TransactionError::Transaction(err) => err,
        }
    }
}

impl Error {
    /// Report a unique-constraint violation as a validation failure with
    /// the given message; pass anything else through as a database error.
    pub(crate) fn on_unique(err: DbErr, message: &str) -> Error {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Error::Validation(message.to_owned()),
            _ => Error::Db(err),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
