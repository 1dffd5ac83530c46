use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error with sqlx")]
    DatabaseError(#[from] sqlx::Error),

    #[error("the resource could not be found")]
    NotFound,

    #[error("the resource already exists")]
    OnConflict,
}

impl Error {
    /// Maps constraint violations onto the domain level variants. A foreign key
    /// violation means a referenced row does not exist.
    pub(crate) fn classify(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return Error::NotFound;
        }

        if let Some(database_error) = err.as_database_error() {
            if database_error.is_unique_violation() {
                return Error::OnConflict;
            }
            if database_error.is_foreign_key_violation() {
                return Error::NotFound;
            }
        }

        Error::DatabaseError(err)
    }
}
