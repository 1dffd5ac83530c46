use crate::domain::auth::Account;
use crate::domain::marketplace::{
    Activity, Address, Customer, Project, ProjectActivity, ProjectPic, Provider,
    ProviderEligibility,
};
use sqlx::FromRow;
use time::Date;

#[derive(FromRow, Clone)]
pub struct ProjectRow {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_send: Date,
    pub city: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<i32>,
    pub postal_code: Option<String>,
    pub complement_street: Option<String>,
    pub customer_id: Option<i64>,
    pub activity_ids: Vec<i64>,
}

impl From<ProjectRow> for Project {
    fn from(value: ProjectRow) -> Self {
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
            activity_ids: value.activity_ids,
        }
    }
}

pub struct ProjectRowList(pub Vec<ProjectRow>);

impl From<ProjectRowList> for Vec<Project> {
    fn from(value: ProjectRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}

#[derive(FromRow, Clone)]
pub struct CustomerRow {
    pub id: i64,
    pub user_id: i64,
    pub city: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<i32>,
    pub postal_code: Option<String>,
    pub complement_street: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(value: CustomerRow) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            address: Address {
                city: value.city,
                street: value.street,
                street_number: value.street_number,
                postal_code: value.postal_code,
                complement_street: value.complement_street,
            },
        }
    }
}

#[derive(FromRow, Clone)]
pub struct ProviderRow {
    pub id: i64,
    pub user_id: i64,
    pub activity_ids: Vec<i64>,
}

impl From<ProviderRow> for Provider {
    fn from(value: ProviderRow) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            activity_ids: value.activity_ids,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct ActivityRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<ActivityRow> for Activity {
    fn from(value: ActivityRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct ProjectActivityRow {
    pub id: i64,
    pub project_id: i64,
    pub activity_id: i64,
}

impl From<ProjectActivityRow> for ProjectActivity {
    fn from(value: ProjectActivityRow) -> Self {
        Self {
            id: value.id,
            project_id: value.project_id,
            activity_id: value.activity_id,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct ProjectPicRow {
    pub id: i64,
    pub link: String,
    pub project_id: i64,
}

impl From<ProjectPicRow> for ProjectPic {
    fn from(value: ProjectPicRow) -> Self {
        Self {
            id: value.id,
            link: value.link,
            project_id: value.project_id,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct ProviderEligibilityRow {
    pub id: i64,
    pub provider_id: Option<i64>,
    pub project_id: Option<i64>,
}

impl From<ProviderEligibilityRow> for ProviderEligibility {
    fn from(value: ProviderEligibilityRow) -> Self {
        Self {
            id: value.id,
            provider_id: value.provider_id,
            project_id: value.project_id,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct UserRow {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub activated: bool,
}

impl From<UserRow> for Account {
    fn from(value: UserRow) -> Self {
        Self {
            id: value.id,
            login: value.login,
            password_hash: value.password_hash,
            activated: value.activated,
        }
    }
}
