use bytes::Bytes;
use time::Date;

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_send: Date,
    pub address: Address,
    pub customer_id: Option<i64>,
    pub activity_ids: Vec<i64>,
}

/// Postal address shared by customers and the projects they post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub city: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<i32>,
    pub postal_code: Option<String>,
    pub complement_street: Option<String>,
}

/// A project as submitted by a client. `id` decides between create and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_send: Option<Date>,
    pub address: Address,
    pub customer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub user_id: i64,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub id: i64,
    pub user_id: i64,
    pub activity_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectActivity {
    pub id: i64,
    pub project_id: i64,
    pub activity_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPic {
    pub id: i64,
    pub link: String,
    pub project_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEligibility {
    pub id: i64,
    pub provider_id: Option<i64>,
    pub project_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderEligibilityDraft {
    pub id: Option<i64>,
    pub provider_id: Option<i64>,
    pub project_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content: Bytes,
}
