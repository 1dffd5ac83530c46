use crate::core::application::ApplicationServices;
use crate::domain::marketplace::{
    CreateProviderEligibilityServiceParams, CreateRecordError,
    DeleteProviderEligibilityServiceParams, GetProviderEligibilityByIDServiceParams,
    MarketplaceService, ProviderEligibilityDraft, RecordError,
    UpdateProviderEligibilityServiceParams,
};
use crate::errors::{AppError, id_exists, internal_error};
use crate::inbound::http::responses::marketplace::ProviderEligibilityResponse;
use crate::inbound::http::responses::shared::{created, deleted, updated};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

const ENTITY_NAME: &str = "providerEligibility";
const COLLECTION_PATH: &str = "/api/provider-eligibilities";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProviderEligibilityRequest {
    id: Option<i64>,
    provider_id: Option<i64>,
    project_id: Option<i64>,
}

impl From<ProviderEligibilityRequest> for ProviderEligibilityDraft {
    fn from(value: ProviderEligibilityRequest) -> Self {
        Self {
            id: value.id,
            provider_id: value.provider_id,
            project_id: value.project_id,
        }
    }
}

pub async fn create_provider_eligibility<S: ApplicationServices>(
    State(state): State<S>,
    Json(payload): Json<ProviderEligibilityRequest>,
) -> Result<Response, AppError> {
    tracing::debug!("REST request to save provider eligibility");
    let provider_eligibility = state
        .marketplace_service()
        .create_provider_eligibility(CreateProviderEligibilityServiceParams {
            provider_eligibility: payload.into(),
        })
        .await
        .map_err(|e| match e {
            CreateRecordError::IdExists => id_exists(ENTITY_NAME),
            CreateRecordError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(created(
        ENTITY_NAME,
        COLLECTION_PATH,
        provider_eligibility.id,
        ProviderEligibilityResponse::from(provider_eligibility),
    ))
}

pub async fn update_provider_eligibility<S: ApplicationServices>(
    State(state): State<S>,
    Json(payload): Json<ProviderEligibilityRequest>,
) -> Result<Response, AppError> {
    tracing::debug!(id = ?payload.id, "REST request to update provider eligibility");
    let result = state
        .marketplace_service()
        .update_provider_eligibility(UpdateProviderEligibilityServiceParams {
            provider_eligibility: payload.into(),
        })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    let id = result.record.id;
    let body = ProviderEligibilityResponse::from(result.record);
    if result.created {
        Ok(created(ENTITY_NAME, COLLECTION_PATH, id, body))
    } else {
        Ok(updated(ENTITY_NAME, id, body))
    }
}

pub async fn list_provider_eligibilities<S: ApplicationServices>(
    State(state): State<S>,
) -> Result<impl IntoResponse, AppError> {
    let provider_eligibilities = state
        .marketplace_service()
        .get_provider_eligibilities()
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    let body: Vec<ProviderEligibilityResponse> = provider_eligibilities
        .into_iter()
        .map(ProviderEligibilityResponse::from)
        .collect();

    Ok(Json(body))
}

pub async fn get_provider_eligibility<S: ApplicationServices>(
    State(state): State<S>,
    Path(provider_eligibility_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let provider_eligibility = state
        .marketplace_service()
        .get_provider_eligibility_by_id(GetProviderEligibilityByIDServiceParams {
            provider_eligibility_id,
        })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ProviderEligibilityResponse::from(provider_eligibility)))
}

pub async fn delete_provider_eligibility<S: ApplicationServices>(
    State(state): State<S>,
    Path(provider_eligibility_id): Path<i64>,
) -> Result<Response, AppError> {
    tracing::debug!(provider_eligibility_id, "REST request to delete provider eligibility");
    state
        .marketplace_service()
        .delete_provider_eligibility(DeleteProviderEligibilityServiceParams {
            provider_eligibility_id,
        })
        .await
        .map_err(|e| match e {
            RecordError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(deleted(ENTITY_NAME, provider_eligibility_id))
}
