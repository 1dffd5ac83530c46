use super::{COLLECTION_PATH, ENTITY_NAME};
use crate::core::application::ApplicationServices;
use crate::domain::marketplace::{
    Address, CreateProjectServiceParams, CreateRecordError, DeleteProjectServiceParams,
    GetProjectByIDServiceParams, MarketplaceService, ProjectDraft, RecordError,
    UpdateProjectServiceParams,
};
use crate::errors::{AppError, id_exists, internal_error};
use crate::inbound::http::responses::marketplace::{ProjectResponse, project_list};
use crate::inbound::http::responses::shared::{created, deleted, iso_date, updated};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectRequest {
    id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    #[serde(default, with = "iso_date::option")]
    date_send: Option<Date>,
    city: Option<String>,
    street: Option<String>,
    street_number: Option<i32>,
    postal_code: Option<String>,
    complement_street: Option<String>,
    customer_id: Option<i64>,
}

impl From<ProjectRequest> for ProjectDraft {
    fn from(value: ProjectRequest) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            date_send: value.date_send,
            address: Address {
                city: value.city,
                street: value.street,
                street_number: value.street_number,
                postal_code: value.postal_code,
                complement_street: value.complement_street,
            },
            customer_id: value.customer_id,
        }
    }
}

pub async fn create_project<S: ApplicationServices>(
    State(state): State<S>,
    Json(payload): Json<ProjectRequest>,
) -> Result<Response, AppError> {
    tracing::debug!("REST request to save project");
    let project = state
        .marketplace_service()
        .create_project(CreateProjectServiceParams {
            project: payload.into(),
        })
        .await
        .map_err(|e| match e {
            CreateRecordError::IdExists => id_exists(ENTITY_NAME),
            CreateRecordError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(created(
        ENTITY_NAME,
        COLLECTION_PATH,
        project.id,
        ProjectResponse::from(project),
    ))
}

pub async fn update_project<S: ApplicationServices>(
    State(state): State<S>,
    Json(payload): Json<ProjectRequest>,
) -> Result<Response, AppError> {
    tracing::debug!(id = ?payload.id, "REST request to update project");
    let result = state
        .marketplace_service()
        .update_project(UpdateProjectServiceParams {
            project: payload.into(),
        })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    let id = result.record.id;
    let body = ProjectResponse::from(result.record);
    if result.created {
        Ok(created(ENTITY_NAME, COLLECTION_PATH, id, body))
    } else {
        Ok(updated(ENTITY_NAME, id, body))
    }
}

pub async fn list_projects<S: ApplicationServices>(
    State(state): State<S>,
) -> Result<impl IntoResponse, AppError> {
    let projects = state
        .marketplace_service()
        .get_projects()
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(Json(project_list(projects)))
}

pub async fn get_project<S: ApplicationServices>(
    State(state): State<S>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let project = state
        .marketplace_service()
        .get_project_by_id(GetProjectByIDServiceParams { project_id })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ProjectResponse::from(project)))
}

pub async fn delete_project<S: ApplicationServices>(
    State(state): State<S>,
    Path(project_id): Path<i64>,
) -> Result<Response, AppError> {
    tracing::debug!(project_id, "REST request to delete project");
    state
        .marketplace_service()
        .delete_project(DeleteProjectServiceParams { project_id })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(deleted(ENTITY_NAME, project_id))
}
