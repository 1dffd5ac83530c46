use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceLoginError, ServiceLoginParams};
use crate::errors::{AppError, internal_error};
use crate::inbound::http::responses::marketplace::AccountResponse;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    login: String,
    password: String,
}

pub async fn account_login<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = state.auth_service();

    let result = auth_service
        .login(ServiceLoginParams {
            session,
            login: payload.login,
            password: payload.password,
        })
        .await
        .map_err(|e| match e {
            ServiceLoginError::InvalidCredentials => {
                AppError::Unauthorized(Some("invalid credentials".to_string()))
            }
            ServiceLoginError::SessionError(e) => internal_error(e),
            ServiceLoginError::PasswordError(e) => internal_error(e),
            ServiceLoginError::DatabaseError(e) => internal_error(e),
        })?;

    tracing::debug!(login = %result.user.login, "user logged in");
    Ok(Json(AccountResponse::from(result.user)))
}
