use super::{COLLECTION_PATH, ENTITY_NAME};
use crate::core::application::ApplicationServices;
use crate::domain::auth::CurrentUser;
use crate::domain::marketplace::{
    CreateProjectWithAttachmentsError, CreateProjectWithAttachmentsServiceParams,
    MarketplaceService, UploadedFile,
};
use crate::errors::{AppError, bad_request, internal_error, multipart_error};
use crate::inbound::http::responses::marketplace::ProjectResponse;
use crate::inbound::http::responses::shared::created;
use axum::Extension;
use axum::extract::{Multipart, State};
use axum::response::Response;

#[derive(Debug, Default)]
struct NewProjectForm {
    title: Option<String>,
    description: Option<String>,
    images: Vec<UploadedFile>,
    activity_ids: Vec<i64>,
}

impl NewProjectForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "images" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content = field.bytes().await.map_err(multipart_error)?;
                    if content.is_empty() {
                        tracing::debug!(?file_name, "skipping empty image part");
                        continue;
                    }
                    form.images.push(UploadedFile { file_name, content });
                }
                "activities" => {
                    let text = field.text().await.map_err(multipart_error)?;
                    form.activity_ids.extend(parse_activity_ids(&text)?);
                }
                "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
                "description" => {
                    form.description = Some(field.text().await.map_err(multipart_error)?)
                }
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

/// Accepts `1,2` as well as one id per field.
fn parse_activity_ids(text: &str) -> Result<Vec<i64>, AppError> {
    text.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| bad_request(format!("invalid activity id '{value}'")))
        })
        .collect()
}

pub async fn create_new_project<S: ApplicationServices>(
    State(state): State<S>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let form = NewProjectForm::read(&mut multipart).await?;
    let title = form.title.ok_or_else(|| bad_request("title is required"))?;
    let description = form
        .description
        .ok_or_else(|| bad_request("description is required"))?;

    tracing::debug!(
        login = %user.login,
        images = form.images.len(),
        activities = form.activity_ids.len(),
        "REST request to create a new project"
    );

    let result = state
        .marketplace_service()
        .create_project_with_attachments(CreateProjectWithAttachmentsServiceParams {
            user,
            title,
            description,
            images: form.images,
            activity_ids: form.activity_ids,
        })
        .await
        .map_err(|e| match e {
            CreateProjectWithAttachmentsError::NotACustomer => {
                AppError::Forbidden(Some("only customers can create projects".to_string()))
            }
            CreateProjectWithAttachmentsError::DatabaseError(e) => internal_error(e),
        })?;

    let project = result.project;
    Ok(created(
        ENTITY_NAME,
        COLLECTION_PATH,
        project.id,
        ProjectResponse::from(project),
    ))
}
