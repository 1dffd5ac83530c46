use crate::domain::auth::{Account, CurrentUser, PasswordError};
use crate::domain::session::SessionError;
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use tower_sessions::Session;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    async fn login(
        &self,
        params: ServiceLoginParams,
    ) -> Result<ServiceLoginResult, ServiceLoginError>;
    async fn logout(&self, params: ServiceLogoutParams) -> Result<(), ServiceLogoutError>;
    async fn current_user(
        &self,
        params: ServiceCurrentUserParams,
    ) -> Result<Option<CurrentUser>, ServiceCurrentUserError>;
    async fn register(
        &self,
        params: ServiceRegisterParams,
    ) -> Result<ServiceRegisterResult, ServiceRegisterError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AccountPort: Send + Sync + 'static {
    async fn find_account_by_login(
        &self,
        params: FindAccountDBParams,
    ) -> Result<Option<Account>, DatabaseError>;
    async fn create_account(&self, params: CreateAccountDBParams)
    -> Result<Account, DatabaseError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Results
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ServiceLoginResult {
    pub user: CurrentUser,
}

pub struct ServiceRegisterResult {
    pub user: CurrentUser,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ServiceLoginParams {
    pub session: Session,
    pub login: String,
    pub password: String,
}

pub struct ServiceLogoutParams {
    pub session: Session,
}

pub struct ServiceCurrentUserParams {
    pub session: Session,
}

pub struct ServiceRegisterParams {
    pub login: String,
    pub password: String,
}

pub struct FindAccountDBParams {
    pub login: String,
}

pub struct CreateAccountDBParams {
    pub login: String,
    pub password_hash: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ServiceLoginError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    PasswordError(#[from] PasswordError),

    #[error("failed to load account because of database error")]
    DatabaseError(#[from] DatabaseError),
}

#[derive(Debug, Error)]
pub enum ServiceLogoutError {
    #[error(transparent)]
    SessionError(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ServiceCurrentUserError {
    #[error(transparent)]
    SessionError(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ServiceRegisterError {
    #[error("login is already in use")]
    LoginTaken,

    #[error(transparent)]
    PasswordError(#[from] PasswordError),

    #[error("failed to create account because of database error")]
    DatabaseError(DatabaseError),
}

impl From<DatabaseError> for ServiceRegisterError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::OnConflict => ServiceRegisterError::LoginTaken,
            other => ServiceRegisterError::DatabaseError(other),
        }
    }
}
