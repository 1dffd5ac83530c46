use crate::core::application::ApplicationServices;
use crate::domain::auth::CurrentUser;
use crate::domain::marketplace::{GetMyProjectsError, GetMyProjectsServiceParams, MarketplaceService};
use crate::errors::{AppError, internal_error};
use crate::inbound::http::responses::marketplace::project_list;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};

pub async fn my_projects<S: ApplicationServices>(
    State(state): State<S>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .marketplace_service()
        .get_my_projects(GetMyProjectsServiceParams { user })
        .await
        .map_err(|e| match e {
            GetMyProjectsError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(Json(project_list(result.projects)))
}
