use crate::core::application::ApplicationServices;
use crate::domain::marketplace::{
    ActivityDraft, CreateActivityServiceParams, CreateRecordError, DeleteActivityServiceParams,
    GetActivityByIDServiceParams, MarketplaceService, RecordError, UpdateActivityServiceParams,
};
use crate::errors::{AppError, id_exists, internal_error};
use crate::inbound::http::responses::marketplace::ActivityResponse;
use crate::inbound::http::responses::shared::{created, deleted, updated};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

const ENTITY_NAME: &str = "activity";
const COLLECTION_PATH: &str = "/api/activities";

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityRequest {
    id: Option<i64>,
    name: String,
    description: Option<String>,
}

impl From<ActivityRequest> for ActivityDraft {
    fn from(value: ActivityRequest) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

pub async fn create_activity<S: ApplicationServices>(
    State(state): State<S>,
    Json(payload): Json<ActivityRequest>,
) -> Result<Response, AppError> {
    let activity = state
        .marketplace_service()
        .create_activity(CreateActivityServiceParams {
            activity: payload.into(),
        })
        .await
        .map_err(|e| match e {
            CreateRecordError::IdExists => id_exists(ENTITY_NAME),
            CreateRecordError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(created(
        ENTITY_NAME,
        COLLECTION_PATH,
        activity.id,
        ActivityResponse::from(activity),
    ))
}

pub async fn update_activity<S: ApplicationServices>(
    State(state): State<S>,
    Json(payload): Json<ActivityRequest>,
) -> Result<Response, AppError> {
    let result = state
        .marketplace_service()
        .update_activity(UpdateActivityServiceParams {
            activity: payload.into(),
        })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    let id = result.record.id;
    let body = ActivityResponse::from(result.record);
    if result.created {
        Ok(created(ENTITY_NAME, COLLECTION_PATH, id, body))
    } else {
        Ok(updated(ENTITY_NAME, id, body))
    }
}

pub async fn list_activities<S: ApplicationServices>(
    State(state): State<S>,
) -> Result<impl IntoResponse, AppError> {
    let activities = state
        .marketplace_service()
        .get_activities()
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    let body: Vec<ActivityResponse> = activities.into_iter().map(ActivityResponse::from).collect();

    Ok(Json(body))
}

pub async fn get_activity<S: ApplicationServices>(
    State(state): State<S>,
    Path(activity_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let activity = state
        .marketplace_service()
        .get_activity_by_id(GetActivityByIDServiceParams { activity_id })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ActivityResponse::from(activity)))
}

pub async fn delete_activity<S: ApplicationServices>(
    State(state): State<S>,
    Path(activity_id): Path<i64>,
) -> Result<Response, AppError> {
    state
        .marketplace_service()
        .delete_activity(DeleteActivityServiceParams { activity_id })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(deleted(ENTITY_NAME, activity_id))
}

#[cfg(test)]
mod tests {
    use crate::core::application::tests::authenticated_app;
    use crate::domain::marketplace::{Activity, MockMarketplaceService, UpdateResult};
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use http::StatusCode;
    use http::header::LOCATION;
    use serde_json::json;
    use std::future;
    use tower_sessions::MemoryStore;

    fn server(marketplace_service: MockMarketplaceService) -> TestServer {
        let app = authenticated_app(marketplace_service);

        TestServer::new(router(app, MemoryStore::default())).unwrap()
    }

    fn plumbing(id: i64) -> Activity {
        Activity {
            id,
            name: "plumbing".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_activity() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service
            .expect_create_activity()
            .withf(|params| params.activity.name == "plumbing")
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(plumbing(3)))));

        let response = server(marketplace_service)
            .post("/api/activities")
            .json(&json!({"name": "plumbing"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_header(LOCATION, "/api/activities/3");
        response.assert_json(&json!({"id": 3, "name": "plumbing", "description": null}));
    }

    #[tokio::test]
    async fn test_create_activity_missing_name() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service.expect_create_activity().times(0);

        let response = server(marketplace_service)
            .post("/api/activities")
            .json(&json!({"description": "pipes"}))
            .await;

        response.assert_status_unprocessable_entity();
    }

    #[tokio::test]
    async fn test_update_unknown_activity_id() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service
            .expect_update_activity()
            .withf(|params| params.activity.id == Some(40))
            .times(1)
            .returning(|_| {
                Box::pin(future::ready(Ok(UpdateResult {
                    record: plumbing(40),
                    created: false,
                })))
            });

        let response = server(marketplace_service)
            .put("/api/activities")
            .json(&json!({"id": 40, "name": "plumbing"}))
            .await;

        response.assert_status_ok();
        response.assert_header("x-monappeloffreapp-alert", "monAppelOffreApp.activity.updated");
        response.assert_header("x-monappeloffreapp-params", "40");
    }

    #[tokio::test]
    async fn test_get_activity() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service
            .expect_get_activity_by_id()
            .withf(|params| params.activity_id == 3)
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(Some(plumbing(3))))));

        let response = server(marketplace_service).get("/api/activities/3").await;

        response.assert_status_ok();
        assert_eq!("plumbing", response.json::<serde_json::Value>()["name"]);
    }

    #[tokio::test]
    async fn test_list_activities() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service
            .expect_get_activities()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(vec![plumbing(1)]))));

        let response = server(marketplace_service).get("/api/activities").await;

        response.assert_status_ok();
        response.assert_json(&json!([{"id": 1, "name": "plumbing", "description": null}]));
    }

    #[tokio::test]
    async fn test_delete_activity() {
        let mut marketplace_service = MockMarketplaceService::new();
        marketplace_service
            .expect_delete_activity()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(()))));

        let response = server(marketplace_service).delete("/api/activities/3").await;

        response.assert_status_ok();
        response.assert_header("x-monappeloffreapp-alert", "monAppelOffreApp.activity.deleted");
    }
}
