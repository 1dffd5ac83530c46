use crate::inbound::http::responses::alert::failure_alert;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct AppErrorResponse {
    code: u16,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("auth required")]
    Unauthorized(Option<String>),

    #[error("internal server error")]
    InternalServerError,

    #[error("bad request")]
    BadRequest(Option<String>),

    /// A rejected payload, reported through the failure alert headers.
    #[error("bad request")]
    Alert {
        entity_name: &'static str,
        error_key: &'static str,
        message: String,
    },

    #[error("user may not perform that action")]
    Forbidden(Option<String>),

    #[error("request path not found")]
    NotFound,

    #[error("payload too large")]
    PayloadTooLarge(Option<String>),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadRequest(_) | Self::Alert { .. } => StatusCode::BAD_REQUEST,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            Self::Unauthorized(message)
            | Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::PayloadTooLarge(message) => message.clone(),
            Self::Alert { message, .. } => Some(message.clone()),
            Self::NotFound | Self::InternalServerError => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = Json(AppErrorResponse {
            code: status_code.as_u16(),
            status: self.to_string(),
            message: self.message(),
        });

        match self {
            AppError::Alert {
                entity_name,
                error_key,
                ..
            } => (status_code, failure_alert(entity_name, error_key), body).into_response(),
            _ => (status_code, body).into_response(),
        }
    }
}

pub fn internal_error<E: ToString>(err: E) -> AppError {
    tracing::error!("{}", err.to_string());
    AppError::InternalServerError
}

pub fn bad_request(message: impl Into<String>) -> AppError {
    AppError::BadRequest(Some(message.into()))
}

pub fn id_exists(entity_name: &'static str) -> AppError {
    AppError::Alert {
        entity_name,
        error_key: "idexists",
        message: format!("A new {entity_name} cannot already have an ID"),
    }
}

pub fn multipart_error(err: MultipartError) -> AppError {
    let status = err.status();
    tracing::debug!(%status, "rejected multipart body");

    match status {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(Some(err.body_text())),
        _ => AppError::BadRequest(Some(err.body_text())),
    }
}
