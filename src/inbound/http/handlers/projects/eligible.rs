use crate::core::application::ApplicationServices;
use crate::domain::auth::CurrentUser;
use crate::domain::marketplace::{
    GetEligibleProjectsError, GetEligibleProjectsServiceParams, MarketplaceService,
};
use crate::errors::{AppError, internal_error};
use crate::inbound::http::responses::marketplace::project_list;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};

/// Projects calling for at least one of the current provider's activities.
pub async fn eligible_projects<S: ApplicationServices>(
    State(state): State<S>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .marketplace_service()
        .get_eligible_projects(GetEligibleProjectsServiceParams { user })
        .await
        .map_err(|e| match e {
            GetEligibleProjectsError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(Json(project_list(result.projects)))
}
