use crate::domain::auth::CurrentUser;
use crate::inbound::http::responses::marketplace::AccountResponse;
use axum::{Extension, Json};
use axum::response::IntoResponse;

pub async fn account_current(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    Json(AccountResponse::from(user))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::authenticated_app;
    use crate::domain::marketplace::MockMarketplaceService;
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::json;
    use tower_sessions::MemoryStore;

    #[tokio::test]
    async fn test_account_current() {
        let app = authenticated_app(MockMarketplaceService::new());
        let server = TestServer::new(router(app, MemoryStore::default())).unwrap();

        let response = server.get("/api/account").await;

        response.assert_status_ok();
        response.assert_json(&json!({"id": 7, "login": "jdoe"}));
    }
}
