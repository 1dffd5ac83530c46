use crate::core::application::ApplicationServices;
use crate::domain::marketplace::{GetProjectPicsError, GetProjectPicsServiceParams, MarketplaceService};
use crate::errors::{AppError, bad_request, internal_error, multipart_error};
use crate::inbound::http::responses::marketplace::ProjectPicResponse;
use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;

const PROJECT_ID_FIELD: &str = "idProject";

async fn read_project_id(multipart: &mut Multipart) -> Result<i64, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PROJECT_ID_FIELD) {
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        return text
            .trim()
            .parse::<i64>()
            .map_err(|_| bad_request(format!("{PROJECT_ID_FIELD} must be a number")));
    }

    Err(bad_request(format!("{PROJECT_ID_FIELD} is required")))
}

/// Pictures attached to the project named by the `idProject` form field.
pub async fn project_photos<S: ApplicationServices>(
    State(state): State<S>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let project_id = read_project_id(&mut multipart).await?;

    let result = state
        .marketplace_service()
        .get_project_pics(GetProjectPicsServiceParams { project_id })
        .await
        .map_err(|e| match e {
            GetProjectPicsError::DatabaseError(e) => internal_error(e),
        })?;

    let pictures: Vec<ProjectPicResponse> = result
        .pictures
        .into_iter()
        .map(ProjectPicResponse::from)
        .collect();

    Ok(Json(pictures))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::authenticated_app;
    use crate::domain::marketplace::{GetProjectPicsResult, MockMarketplaceService, ProjectPic};
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use axum_test::multipart::MultipartForm;
    use serde_json::json;
    use std::future;
    use tower_sessions::MemoryStore;

    fn server(marketplace_service: MockMarketplaceService) -> TestServer {
        let app = authenticated_app(marketplace_service);

        TestServer::new(router(app, MemoryStore::default())).unwrap()
    }

    #[tokio::test]
    async fn test_project_photos() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service
            .expect_get_project_pics()
            .withf(|params| params.project_id == 21)
            .times(1)
            .returning(|_| {
                Box::pin(future::ready(Ok(GetProjectPicsResult {
                    pictures: vec![ProjectPic {
                        id: 3,
                        link: "content/images/0190-tiles.png".to_string(),
                        project_id: 21,
                    }],
                })))
            });

        let response = server(marketplace_service)
            .post("/api/get-photo")
            .multipart(MultipartForm::new().add_text("idProject", "21"))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([
            {"id": 3, "link": "content/images/0190-tiles.png", "projectPIC": {"id": 21}}
        ]));
    }

    #[tokio::test]
    async fn test_project_photos_missing_id() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service.expect_get_project_pics().times(0);

        let response = server(marketplace_service)
            .post("/api/get-photo")
            .multipart(MultipartForm::new().add_text("other", "21"))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_project_photos_non_numeric_id() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service.expect_get_project_pics().times(0);

        let response = server(marketplace_service)
            .post("/api/get-photo")
            .multipart(MultipartForm::new().add_text("idProject", "abc"))
            .await;

        response.assert_status_bad_request();
    }
}
