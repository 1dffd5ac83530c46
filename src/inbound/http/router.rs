use crate::core::application::{Application, ApplicationServices};
use crate::domain::auth::AuthService;
use crate::domain::marketplace::MarketplaceService;
use crate::inbound::http::handlers::{
    account_current, account_login, account_logout, create_activity, create_new_project,
    create_project, create_provider_eligibility, delete_activity, delete_project,
    delete_provider_eligibility, eligible_projects, get_activity, get_project,
    get_provider_eligibility, list_activities, list_projects, list_provider_eligibilities,
    my_projects, project_photos, server_health, update_activity, update_project,
    update_provider_eligibility,
};
use crate::inbound::http::middleware::auth;
use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath, Request};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use http::header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method, StatusCode};
use time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

pub fn router<
    AUTH: AuthService + Send + Sync + 'static,
    MARKETPLACE: MarketplaceService + Send + Sync + 'static,
    Store: SessionStore + Clone + Send + Sync + 'static,
>(
    application: Application<AUTH, MARKETPLACE>,
    session_store: Store,
) -> Router {
    let config = application.config();
    let same_site = if config.secure_session {
        SameSite::None
    } else {
        SameSite::Lax
    };
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.secure_session)
        .with_expiry(Expiry::OnInactivity(Duration::hours(1)))
        .with_same_site(same_site);

    let hosts: Vec<HeaderValue> = config
        .cors_hosts
        .iter()
        .filter_map(|host| match host.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%host, "ignoring invalid cors host");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![
            ORIGIN,
            AUTHORIZATION,
            ACCEPT,
            CONTENT_TYPE,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        ])
        .allow_origin(hosts)
        .allow_credentials(true);

    let content = ServeDir::new(config.storage.web_root().join("content"));
    let api_routes = api_routes(application.clone());

    Router::new()
        .route("/healthz", get(server_health))
        .nest("/api", api_routes)
        .nest_service("/content", content)
        .layer(DefaultBodyLimit::max(config.storage.max_upload_bytes()))
        .layer(cors)
        .layer(session_layer)
        .layer((
            SetSensitiveHeadersLayer::new([AUTHORIZATION]),
            CompressionLayer::new(),
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                .on_failure(()),
            TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                std::time::Duration::from_secs(30),
            ),
            CatchPanicLayer::new(),
        ))
        .with_state(application)
}

fn api_routes<APP>(application: APP) -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout", post(account_logout::<APP>))
        .route("/account", get(account_current))
        .route(
            "/projects",
            post(create_project::<APP>)
                .put(update_project::<APP>)
                .get(list_projects::<APP>),
        )
        .route(
            "/projects/{id}",
            get(get_project::<APP>).delete(delete_project::<APP>),
        )
        .route("/eligiblePojects", get(eligible_projects::<APP>))
        .route("/myProjects", get(my_projects::<APP>))
        .route("/create-new-project", post(create_new_project::<APP>))
        .route("/get-photo", post(project_photos::<APP>))
        .route(
            "/provider-eligibilities",
            post(create_provider_eligibility::<APP>)
                .put(update_provider_eligibility::<APP>)
                .get(list_provider_eligibilities::<APP>),
        )
        .route(
            "/provider-eligibilities/{id}",
            get(get_provider_eligibility::<APP>).delete(delete_provider_eligibility::<APP>),
        )
        .route(
            "/activities",
            post(create_activity::<APP>)
                .put(update_activity::<APP>)
                .get(list_activities::<APP>),
        )
        .route(
            "/activities/{id}",
            get(get_activity::<APP>).delete(delete_activity::<APP>),
        )
        .route_layer(from_fn_with_state(application, auth::<APP>));

    Router::new()
        .route("/authentication", post(account_login::<APP>))
        .merge(protected)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::core::config::{Config, StorageConfig};
    use crate::domain::auth::MockAuthService;
    use crate::domain::marketplace::MockMarketplaceService;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use std::future;
    use tower_sessions::MemoryStore;

    fn server(config: Option<Config>, auth_service: MockAuthService) -> TestServer {
        let app = Application::<MockAuthService, MockMarketplaceService>::mock_instance(
            MockAppInstanceParameters {
                config,
                auth_service: Some(auth_service),
                marketplace_service: None,
            },
        );

        TestServer::new(router(app, MemoryStore::default())).unwrap()
    }

    fn anonymous_auth_service() -> MockAuthService {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_current_user()
            .returning(|_| Box::pin(future::ready(Ok(None))));

        auth_service
    }

    #[tokio::test]
    async fn test_secure_session_default_config() {
        let config = Config::default();
        assert_eq!(false, config.secure_session);
    }

    #[tokio::test]
    async fn test_secure_session_config() {
        let config = Config {
            secure_session: true,
            ..Default::default()
        };
        assert!(config.secure_session);
    }

    #[tokio::test]
    async fn test_api_routes_require_login() {
        let server = server(None, anonymous_auth_service());

        for path in [
            "/api/projects",
            "/api/eligiblePojects",
            "/api/myProjects",
            "/api/activities",
            "/api/provider-eligibilities",
            "/api/account",
        ] {
            server.get(path).await.assert_status_unauthorized();
        }
        server
            .post("/api/create-new-project")
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = server(None, MockAuthService::new());

        server.get("/api/unknown").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_serves_uploaded_images() {
        let web_root = tempfile::tempdir().unwrap();
        let images = web_root.path().join("content/images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("roof.png"), b"png").unwrap();

        let config = Config {
            storage: StorageConfig {
                web_root: Some(web_root.path().to_string_lossy().into_owned()),
                max_upload_bytes: None,
            },
            ..Default::default()
        };
        let server = server(Some(config), MockAuthService::new());

        let response = server.get("/content/images/roof.png").await;

        response.assert_status_ok();
        assert_eq!(b"png".as_slice(), response.as_bytes().as_ref());
    }
}
