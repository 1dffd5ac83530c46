use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceLogoutError, ServiceLogoutParams};
use crate::errors::{AppError, internal_error};
use axum::extract::State;
use axum::response::IntoResponse;
use http::StatusCode;
use tower_sessions::Session;

pub async fn account_logout<S: ApplicationServices>(
    State(state): State<S>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = state.auth_service();

    auth_service
        .logout(ServiceLogoutParams { session })
        .await
        .map_err(|e| match e {
            ServiceLogoutError::SessionError(e) => internal_error(e),
        })?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::{MockAppInstanceParameters, authenticated_auth_service};
    use crate::domain::auth::{MockAuthService, ServiceLogoutError};
    use crate::domain::marketplace::MockMarketplaceService;
    use crate::domain::session::SessionError;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use std::future;
    use tower_sessions::MemoryStore;

    fn server(auth_service: MockAuthService) -> TestServer {
        let app = Application::<MockAuthService, MockMarketplaceService>::mock_instance(
            MockAppInstanceParameters {
                config: None,
                auth_service: Some(auth_service),
                marketplace_service: None,
            },
        );
        let router = router(app, MemoryStore::default());

        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_account_logout() {
        let mut auth_service = authenticated_auth_service();
        auth_service
            .expect_logout()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(()))));

        let response = server(auth_service).post("/api/logout").await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_account_logout_session_error() {
        let mut auth_service = authenticated_auth_service();
        auth_service.expect_logout().times(1).returning(|_| {
            Box::pin(future::ready(Err(ServiceLogoutError::SessionError(
                SessionError::WriteSessionError,
            ))))
        });

        let response = server(auth_service).post("/api/logout").await;

        response.assert_status_internal_server_error();
    }
}
