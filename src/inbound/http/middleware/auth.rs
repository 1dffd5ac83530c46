use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceCurrentUserError, ServiceCurrentUserParams};
use crate::errors::{AppError, internal_error};
use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;

/// Resolves the logged in user from the session and hands it to the handlers
/// as a [`CurrentUser`](crate::domain::auth::CurrentUser) request extension.
pub async fn auth<S: ApplicationServices>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_service = state.auth_service();
    let (mut parts, body) = req.into_parts();
    let session = Session::from_request_parts(&mut parts, &state)
        .await
        .map_err(|_e| AppError::InternalServerError)?;

    let user = auth_service
        .current_user(ServiceCurrentUserParams { session })
        .await
        .map_err(|e| match e {
            ServiceCurrentUserError::SessionError(e) => internal_error(e),
        })?
        .ok_or(AppError::Unauthorized(None))?;

    tracing::debug!(login = %user.login, "resolved current user");
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::{MockAppInstanceParameters, authenticated_auth_service};
    use crate::domain::auth::{CurrentUser, MockAuthService, ServiceCurrentUserError};
    use crate::domain::marketplace::MockMarketplaceService;
    use crate::domain::session::SessionError;
    use crate::inbound::http::middleware::auth;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Extension, Router};
    use axum::middleware::from_fn_with_state;
    use axum_test::TestServer;
    use http::StatusCode;
    use std::future;
    use time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

    type App = Application<MockAuthService, MockMarketplaceService>;

    pub async fn example(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
        (StatusCode::OK, user.login)
    }

    fn server(auth_service: MockAuthService) -> TestServer {
        let session_store = MemoryStore::default();
        let session_layer = SessionManagerLayer::new(session_store)
            .with_secure(false)
            .with_expiry(Expiry::OnInactivity(Duration::hours(1)))
            .with_same_site(SameSite::Lax);

        let app = App::mock_instance(MockAppInstanceParameters {
            config: None,
            auth_service: Some(auth_service),
            marketplace_service: None,
        });

        let router = Router::new()
            .route("/example", get(example))
            .route_layer(from_fn_with_state(app, auth::<App>))
            .layer(session_layer);

        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_auth_passes_current_user() {
        let server = server(authenticated_auth_service());

        let response = server.get("/example").await;

        response.assert_status_ok();
        response.assert_text("jdoe");
    }

    #[tokio::test]
    async fn test_auth_anonymous() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_current_user()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(None))));

        let response = server(auth_service).get("/example").await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_auth_session_error() {
        let mut auth_service = MockAuthService::new();
        auth_service.expect_current_user().times(1).returning(|_| {
            Box::pin(future::ready(Err(ServiceCurrentUserError::SessionError(
                SessionError::ReadSessionError,
            ))))
        });

        let response = server(auth_service).get("/example").await;

        response.assert_status_internal_server_error();
    }
}
