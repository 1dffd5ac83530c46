use crate::domain::auth::CurrentUser;
use crate::domain::marketplace::{
    Activity, ActivityDraft, Address, Customer, Project, ProjectActivity, ProjectDraft,
    ProjectPic, Provider, ProviderEligibility, ProviderEligibilityDraft, UploadedFile,
};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use time::Date;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait MarketplaceService: Send + Sync {
    async fn create_project(&self, params: CreateProjectServiceParams)
    -> Result<Project, CreateRecordError>;
    async fn update_project(
        &self,
        params: UpdateProjectServiceParams,
    ) -> Result<UpdateResult<Project>, RecordError>;
    async fn get_projects(&self) -> Result<Vec<Project>, RecordError>;
    async fn get_project_by_id(
        &self,
        params: GetProjectByIDServiceParams,
    ) -> Result<Option<Project>, RecordError>;
    async fn delete_project(&self, params: DeleteProjectServiceParams) -> Result<(), RecordError>;

    async fn get_eligible_projects(
        &self,
        params: GetEligibleProjectsServiceParams,
    ) -> Result<GetProjectsResult, GetEligibleProjectsError>;
    async fn get_my_projects(
        &self,
        params: GetMyProjectsServiceParams,
    ) -> Result<GetProjectsResult, GetMyProjectsError>;
    async fn create_project_with_attachments(
        &self,
        params: CreateProjectWithAttachmentsServiceParams,
    ) -> Result<CreateProjectWithAttachmentsResult, CreateProjectWithAttachmentsError>;
    async fn get_project_pics(
        &self,
        params: GetProjectPicsServiceParams,
    ) -> Result<GetProjectPicsResult, GetProjectPicsError>;

    async fn create_provider_eligibility(
        &self,
        params: CreateProviderEligibilityServiceParams,
    ) -> Result<ProviderEligibility, CreateRecordError>;
    async fn update_provider_eligibility(
        &self,
        params: UpdateProviderEligibilityServiceParams,
    ) -> Result<UpdateResult<ProviderEligibility>, RecordError>;
    async fn get_provider_eligibilities(&self) -> Result<Vec<ProviderEligibility>, RecordError>;
    async fn get_provider_eligibility_by_id(
        &self,
        params: GetProviderEligibilityByIDServiceParams,
    ) -> Result<Option<ProviderEligibility>, RecordError>;
    async fn delete_provider_eligibility(
        &self,
        params: DeleteProviderEligibilityServiceParams,
    ) -> Result<(), RecordError>;

    async fn create_activity(
        &self,
        params: CreateActivityServiceParams,
    ) -> Result<Activity, CreateRecordError>;
    async fn update_activity(
        &self,
        params: UpdateActivityServiceParams,
    ) -> Result<UpdateResult<Activity>, RecordError>;
    async fn get_activities(&self) -> Result<Vec<Activity>, RecordError>;
    async fn get_activity_by_id(
        &self,
        params: GetActivityByIDServiceParams,
    ) -> Result<Option<Activity>, RecordError>;
    async fn delete_activity(&self, params: DeleteActivityServiceParams)
    -> Result<(), RecordError>;
}

//------------------------------------------------------------------------------
// Shared CRUD results and errors
//------------------------------------------------------------------------------

/// Outcome of an update. `created` is set when the payload carried no id and
/// the update was handled as a create.
#[derive(Debug, Clone)]
pub struct UpdateResult<T> {
    pub record: T,
    pub created: bool,
}

#[derive(Debug, Error)]
pub enum CreateRecordError {
    #[error("a new record cannot already have an id")]
    IdExists,

    #[error("failed to create record because of database error")]
    DatabaseError(#[from] DatabaseError),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access record because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Project CRUD
//------------------------------------------------------------------------------

pub struct CreateProjectServiceParams {
    pub project: ProjectDraft,
}

pub struct UpdateProjectServiceParams {
    pub project: ProjectDraft,
}

pub struct GetProjectByIDServiceParams {
    pub project_id: i64,
}

pub struct DeleteProjectServiceParams {
    pub project_id: i64,
}

//------------------------------------------------------------------------------
// Eligible Projects
//------------------------------------------------------------------------------

pub struct GetEligibleProjectsServiceParams {
    pub user: CurrentUser,
}

#[derive(Debug)]
pub struct GetProjectsResult {
    pub projects: Vec<Project>,
}

#[derive(Debug, Error)]
pub enum GetEligibleProjectsError {
    #[error("failed to get eligible projects because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// My Projects
//------------------------------------------------------------------------------

pub struct GetMyProjectsServiceParams {
    pub user: CurrentUser,
}

#[derive(Debug, Error)]
pub enum GetMyProjectsError {
    #[error("failed to get customer projects because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Create Project with Attachments
//------------------------------------------------------------------------------

pub struct CreateProjectWithAttachmentsServiceParams {
    pub user: CurrentUser,
    pub title: String,
    pub description: String,
    pub images: Vec<UploadedFile>,
    pub activity_ids: Vec<i64>,
}

#[derive(Debug)]
pub struct CreateProjectWithAttachmentsResult {
    /// The created project, carrying only the activity ids that were attached.
    pub project: Project,
}

#[derive(Debug, Error)]
pub enum CreateProjectWithAttachmentsError {
    #[error("the current user is not a customer")]
    NotACustomer,

    #[error("failed to create project because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Project Pictures
//------------------------------------------------------------------------------

pub struct GetProjectPicsServiceParams {
    pub project_id: i64,
}

#[derive(Debug)]
pub struct GetProjectPicsResult {
    pub pictures: Vec<ProjectPic>,
}

#[derive(Debug, Error)]
pub enum GetProjectPicsError {
    #[error("failed to get project pictures because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Provider Eligibility CRUD
//------------------------------------------------------------------------------

pub struct CreateProviderEligibilityServiceParams {
    pub provider_eligibility: ProviderEligibilityDraft,
}

pub struct UpdateProviderEligibilityServiceParams {
    pub provider_eligibility: ProviderEligibilityDraft,
}

pub struct GetProviderEligibilityByIDServiceParams {
    pub provider_eligibility_id: i64,
}

pub struct DeleteProviderEligibilityServiceParams {
    pub provider_eligibility_id: i64,
}

//------------------------------------------------------------------------------
// Activity CRUD
//------------------------------------------------------------------------------

pub struct CreateActivityServiceParams {
    pub activity: ActivityDraft,
}

pub struct UpdateActivityServiceParams {
    pub activity: ActivityDraft,
}

pub struct GetActivityByIDServiceParams {
    pub activity_id: i64,
}

pub struct DeleteActivityServiceParams {
    pub activity_id: i64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// File Storage
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait FileStoragePort: Send + Sync + 'static {
    async fn store(&self, params: StoreFileParams) -> Result<StoredFile, StorageError>;
}

pub struct StoreFileParams {
    pub file_name: Option<String>,
    pub content: Bytes,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Path relative to the web root, as stored on [`ProjectPic::link`].
    pub link: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait DatabaseRepository: Send + Sync + 'static {
    async fn create_project(&self, params: CreateProjectDBParams)
    -> Result<Project, DatabaseError>;
    async fn upsert_project(&self, params: UpsertProjectDBParams)
    -> Result<Project, DatabaseError>;
    async fn delete_project(&self, params: DeleteProjectDBParams) -> Result<(), DatabaseError>;
    async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError>;
    async fn find_project_by_id(
        &self,
        params: FindProjectDBParams,
    ) -> Result<Option<Project>, DatabaseError>;
    async fn list_projects_by_activities(
        &self,
        params: ListProjectsByActivitiesDBParams,
    ) -> Result<Vec<Project>, DatabaseError>;
    async fn list_projects_by_customer(
        &self,
        params: ListProjectsByCustomerDBParams,
    ) -> Result<Vec<Project>, DatabaseError>;

    async fn find_customer_by_user_id(
        &self,
        params: FindByUserDBParams,
    ) -> Result<Option<Customer>, DatabaseError>;
    async fn find_provider_by_user_id(
        &self,
        params: FindByUserDBParams,
    ) -> Result<Option<Provider>, DatabaseError>;

    async fn create_project_pic(
        &self,
        params: CreateProjectPicDBParams,
    ) -> Result<ProjectPic, DatabaseError>;
    async fn list_project_pics(
        &self,
        params: ListProjectPicsDBParams,
    ) -> Result<Vec<ProjectPic>, DatabaseError>;
    async fn create_project_activity(
        &self,
        params: CreateProjectActivityDBParams,
    ) -> Result<ProjectActivity, DatabaseError>;

    async fn create_provider_eligibility(
        &self,
        params: CreateProviderEligibilityDBParams,
    ) -> Result<ProviderEligibility, DatabaseError>;
    async fn upsert_provider_eligibility(
        &self,
        params: UpsertProviderEligibilityDBParams,
    ) -> Result<ProviderEligibility, DatabaseError>;
    async fn delete_provider_eligibility(
        &self,
        params: DeleteProviderEligibilityDBParams,
    ) -> Result<(), DatabaseError>;
    async fn list_provider_eligibilities(&self) -> Result<Vec<ProviderEligibility>, DatabaseError>;
    async fn find_provider_eligibility_by_id(
        &self,
        params: FindProviderEligibilityDBParams,
    ) -> Result<Option<ProviderEligibility>, DatabaseError>;

    async fn create_activity(&self, params: CreateActivityDBParams)
    -> Result<Activity, DatabaseError>;
    async fn upsert_activity(&self, params: UpsertActivityDBParams)
    -> Result<Activity, DatabaseError>;
    async fn delete_activity(&self, params: DeleteActivityDBParams) -> Result<(), DatabaseError>;
    async fn list_activities(&self) -> Result<Vec<Activity>, DatabaseError>;
    async fn find_activity_by_id(
        &self,
        params: FindActivityDBParams,
    ) -> Result<Option<Activity>, DatabaseError>;
}

//------------------------------------------------------------------------------
// Create Project
//------------------------------------------------------------------------------

pub struct CreateProjectDBParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_send: Date,
    pub address: Address,
    pub customer_id: Option<i64>,
}

//------------------------------------------------------------------------------
// Upsert Project
//------------------------------------------------------------------------------

pub struct UpsertProjectDBParams {
    pub project_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Kept from the existing row when `None`, or `default_date_send` for a new row.
    pub date_send: Option<Date>,
    pub default_date_send: Date,
    pub address: Address,
    pub customer_id: Option<i64>,
}

//------------------------------------------------------------------------------
// Delete Project
//------------------------------------------------------------------------------

pub struct DeleteProjectDBParams {
    pub project_id: i64,
}

//------------------------------------------------------------------------------
// Find Project
//------------------------------------------------------------------------------

pub struct FindProjectDBParams {
    pub project_id: i64,
}

//------------------------------------------------------------------------------
// List Projects by Activities
//------------------------------------------------------------------------------

pub struct ListProjectsByActivitiesDBParams {
    pub activity_ids: Vec<i64>,
}

//------------------------------------------------------------------------------
// List Projects by Customer
//------------------------------------------------------------------------------

pub struct ListProjectsByCustomerDBParams {
    pub customer_id: i64,
}

//------------------------------------------------------------------------------
// Find Customer / Provider by User
//------------------------------------------------------------------------------

pub struct FindByUserDBParams {
    pub user_id: i64,
}

//------------------------------------------------------------------------------
// Project Pictures
//------------------------------------------------------------------------------

pub struct CreateProjectPicDBParams {
    pub project_id: i64,
    pub link: String,
}

pub struct ListProjectPicsDBParams {
    pub project_id: i64,
}

//------------------------------------------------------------------------------
// Project Activities
//------------------------------------------------------------------------------

pub struct CreateProjectActivityDBParams {
    pub project_id: i64,
    pub activity_id: i64,
}

//------------------------------------------------------------------------------
// Provider Eligibility
//------------------------------------------------------------------------------

pub struct CreateProviderEligibilityDBParams {
    pub provider_id: Option<i64>,
    pub project_id: Option<i64>,
}

pub struct UpsertProviderEligibilityDBParams {
    pub provider_eligibility_id: i64,
    pub provider_id: Option<i64>,
    pub project_id: Option<i64>,
}

pub struct DeleteProviderEligibilityDBParams {
    pub provider_eligibility_id: i64,
}

pub struct FindProviderEligibilityDBParams {
    pub provider_eligibility_id: i64,
}

//------------------------------------------------------------------------------
// Activity
//------------------------------------------------------------------------------

pub struct CreateActivityDBParams {
    pub name: String,
    pub description: Option<String>,
}

pub struct UpsertActivityDBParams {
    pub activity_id: i64,
    pub name: String,
    pub description: Option<String>,
}

pub struct DeleteActivityDBParams {
    pub activity_id: i64,
}

pub struct FindActivityDBParams {
    pub activity_id: i64,
}
