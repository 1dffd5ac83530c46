use crate::domain::auth::CurrentUser;
use crate::domain::marketplace::{Activity, Project, ProjectPic, ProviderEligibility};
use crate::inbound::http::responses::shared::iso_date;
use serde::Serialize;
use time::Date;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    #[serde(with = "iso_date")]
    date_send: Date,
    city: Option<String>,
    street: Option<String>,
    street_number: Option<i32>,
    postal_code: Option<String>,
    complement_street: Option<String>,
    customer_id: Option<i64>,
    activity_ids: Vec<i64>,
}

impl From<Project> for ProjectResponse {
    fn from(value: Project) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            date_send: value.date_send,
            city: value.address.city,
            street: value.address.street,
            street_number: value.address.street_number,
            postal_code: value.address.postal_code,
            complement_street: value.address.complement_street,
            customer_id: value.customer_id,
            activity_ids: value.activity_ids,
        }
    }
}

pub fn project_list(projects: Vec<Project>) -> Vec<ProjectResponse> {
    projects.into_iter().map(ProjectResponse::from).collect()
}

/// The owning project is nested as `projectPIC: {id}`, the shape the photo
/// gallery of the front end reads.
#[derive(Serialize)]
pub struct ProjectPicResponse {
    id: i64,
    link: String,
    #[serde(rename = "projectPIC")]
    project: ProjectReference,
}

#[derive(Serialize)]
pub struct ProjectReference {
    id: i64,
}

impl From<ProjectPic> for ProjectPicResponse {
    fn from(value: ProjectPic) -> Self {
        Self {
            id: value.id,
            link: value.link,
            project: ProjectReference {
                id: value.project_id,
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEligibilityResponse {
    id: i64,
    provider_id: Option<i64>,
    project_id: Option<i64>,
}

impl From<ProviderEligibility> for ProviderEligibilityResponse {
    fn from(value: ProviderEligibility) -> Self {
        Self {
            id: value.id,
            provider_id: value.provider_id,
            project_id: value.project_id,
        }
    }
}

#[derive(Serialize)]
pub struct ActivityResponse {
    id: i64,
    name: String,
    description: Option<String>,
}

impl From<Activity> for ActivityResponse {
    fn from(value: Activity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

#[derive(Serialize)]
pub struct AccountResponse {
    id: i64,
    login: String,
}

impl From<CurrentUser> for AccountResponse {
    fn from(value: CurrentUser) -> Self {
        Self {
            id: value.user_id,
            login: value.login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::marketplace::Address;
    use time::macros::date;

    #[tokio::test]
    async fn test_project_response_shape() {
        let response = ProjectResponse::from(Project {
            id: 3,
            title: Some("Kitchen".to_string()),
            description: None,
            date_send: date!(2024 - 03 - 01),
            address: Address {
                street_number: Some(12),
                postal_code: Some("69002".to_string()),
                ..Default::default()
            },
            customer_id: Some(5),
            activity_ids: vec![1, 2],
        });

        let value = serde_json::to_value(response).unwrap();

        assert_eq!("2024-03-01", value["dateSend"]);
        assert_eq!(12, value["streetNumber"]);
        assert_eq!("69002", value["postalCode"]);
        assert_eq!(5, value["customerId"]);
        assert_eq!(serde_json::json!([1, 2]), value["activityIds"]);
        assert!(value["complementStreet"].is_null());
    }
}
