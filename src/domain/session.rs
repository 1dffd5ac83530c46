use crate::domain::auth::CurrentUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("error writing session")]
    WriteSessionError,

    #[error("error reading session")]
    ReadSessionError,

    #[error(transparent)]
    TowerSessionsError(#[from] tower_sessions::session::Error),
}

/// What a logged in session carries. Written on login, removed by a flush.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: i64,
    pub login: String,
}

impl From<UserSession> for CurrentUser {
    fn from(value: UserSession) -> Self {
        Self {
            user_id: value.user_id,
            login: value.login,
        }
    }
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SessionPort: Send + Sync {
    async fn write_user_session(&self, params: UserSession) -> Result<(), SessionError>;
    async fn get_user_session(&self) -> Result<Option<UserSession>, SessionError>;
    async fn flush(&self) -> Result<(), SessionError>;
}
