use crate::domain::marketplace::{
    Activity, CreateActivityDBParams, CreateActivityServiceParams, CreateProjectActivityDBParams,
    CreateProjectDBParams, CreateProjectPicDBParams, CreateProjectServiceParams,
    CreateProjectWithAttachmentsError, CreateProjectWithAttachmentsResult,
    CreateProjectWithAttachmentsServiceParams, CreateProviderEligibilityDBParams,
    CreateProviderEligibilityServiceParams, CreateRecordError, DatabaseRepository,
    DeleteActivityDBParams, DeleteActivityServiceParams, DeleteProjectDBParams,
    DeleteProjectServiceParams, DeleteProviderEligibilityDBParams,
    DeleteProviderEligibilityServiceParams, FileStoragePort, FindActivityDBParams,
    FindByUserDBParams, FindProjectDBParams, FindProviderEligibilityDBParams,
    GetActivityByIDServiceParams, GetEligibleProjectsError, GetEligibleProjectsServiceParams,
    GetMyProjectsError, GetMyProjectsServiceParams, GetProjectByIDServiceParams,
    GetProjectPicsError, GetProjectPicsResult, GetProjectPicsServiceParams, GetProjectsResult,
    GetProviderEligibilityByIDServiceParams, ListProjectPicsDBParams,
    ListProjectsByActivitiesDBParams, ListProjectsByCustomerDBParams, MarketplaceService,
    Project, ProjectDraft, ProviderEligibility, RecordError, StoreFileParams,
    UpdateActivityServiceParams, UpdateProjectServiceParams,
    UpdateProviderEligibilityServiceParams, UpdateResult, UpsertActivityDBParams,
    UpsertProjectDBParams, UpsertProviderEligibilityDBParams,
};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use time::{Date, OffsetDateTime};

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[derive(Debug, Clone)]
pub struct Service<DB, FS>
where
    DB: DatabaseRepository,
    FS: FileStoragePort,
{
    db: DB,
    storage: FS,
}

impl<DB, FS> Service<DB, FS>
where
    DB: DatabaseRepository,
    FS: FileStoragePort,
{
    pub fn new(db: DB, storage: FS) -> Self {
        Self { db, storage }
    }

    async fn insert_project(&self, project: ProjectDraft) -> Result<Project, DatabaseError> {
        self.db
            .create_project(CreateProjectDBParams {
                title: project.title,
                description: project.description,
                date_send: today(),
                address: project.address,
                customer_id: project.customer_id,
            })
            .await
    }
}

#[async_trait]
impl<DB, FS> MarketplaceService for Service<DB, FS>
where
    DB: DatabaseRepository,
    FS: FileStoragePort,
{
    async fn create_project(
        &self,
        params: CreateProjectServiceParams,
    ) -> Result<Project, CreateRecordError> {
        if params.project.id.is_some() {
            return Err(CreateRecordError::IdExists);
        }

        Ok(self.insert_project(params.project).await?)
    }

    async fn update_project(
        &self,
        params: UpdateProjectServiceParams,
    ) -> Result<UpdateResult<Project>, RecordError> {
        let project = params.project;
        let Some(project_id) = project.id else {
            return Ok(UpdateResult {
                record: self.insert_project(project).await?,
                created: true,
            });
        };

        let record = self
            .db
            .upsert_project(UpsertProjectDBParams {
                project_id,
                title: project.title,
                description: project.description,
                date_send: project.date_send,
                default_date_send: today(),
                address: project.address,
                customer_id: project.customer_id,
            })
            .await?;

        Ok(UpdateResult {
            record,
            created: false,
        })
    }

    async fn get_projects(&self) -> Result<Vec<Project>, RecordError> {
        Ok(self.db.list_projects().await?)
    }

    async fn get_project_by_id(
        &self,
        params: GetProjectByIDServiceParams,
    ) -> Result<Option<Project>, RecordError> {
        let project = self
            .db
            .find_project_by_id(FindProjectDBParams {
                project_id: params.project_id,
            })
            .await?;

        Ok(project)
    }

    async fn delete_project(&self, params: DeleteProjectServiceParams) -> Result<(), RecordError> {
        self.db
            .delete_project(DeleteProjectDBParams {
                project_id: params.project_id,
            })
            .await?;

        Ok(())
    }

    async fn get_eligible_projects(
        &self,
        params: GetEligibleProjectsServiceParams,
    ) -> Result<GetProjectsResult, GetEligibleProjectsError> {
        let provider = self
            .db
            .find_provider_by_user_id(FindByUserDBParams {
                user_id: params.user.user_id,
            })
            .await?;

        let Some(provider) = provider else {
            tracing::debug!(login = %params.user.login, "user is not a provider");
            return Ok(GetProjectsResult { projects: vec![] });
        };

        if provider.activity_ids.is_empty() {
            return Ok(GetProjectsResult { projects: vec![] });
        }

        let projects = self
            .db
            .list_projects_by_activities(ListProjectsByActivitiesDBParams {
                activity_ids: provider.activity_ids,
            })
            .await?;

        Ok(GetProjectsResult { projects })
    }

    async fn get_my_projects(
        &self,
        params: GetMyProjectsServiceParams,
    ) -> Result<GetProjectsResult, GetMyProjectsError> {
        let customer = self
            .db
            .find_customer_by_user_id(FindByUserDBParams {
                user_id: params.user.user_id,
            })
            .await?;

        let Some(customer) = customer else {
            tracing::debug!(login = %params.user.login, "user is not a customer");
            return Ok(GetProjectsResult { projects: vec![] });
        };

        let projects = self
            .db
            .list_projects_by_customer(ListProjectsByCustomerDBParams {
                customer_id: customer.id,
            })
            .await?;

        Ok(GetProjectsResult { projects })
    }

    async fn create_project_with_attachments(
        &self,
        params: CreateProjectWithAttachmentsServiceParams,
    ) -> Result<CreateProjectWithAttachmentsResult, CreateProjectWithAttachmentsError> {
        let customer = self
            .db
            .find_customer_by_user_id(FindByUserDBParams {
                user_id: params.user.user_id,
            })
            .await?
            .ok_or(CreateProjectWithAttachmentsError::NotACustomer)?;

        let mut project = self
            .db
            .create_project(CreateProjectDBParams {
                title: Some(params.title),
                description: Some(params.description),
                date_send: today(),
                address: customer.address,
                customer_id: Some(customer.id),
            })
            .await?;
        tracing::debug!(project_id = project.id, "created project");

        // attachment failures are logged and skipped, the project stays
        for image in params.images {
            let file_name = image.file_name.clone();
            let stored = match self
                .storage
                .store(StoreFileParams {
                    file_name: image.file_name,
                    content: image.content,
                })
                .await
            {
                Ok(stored) => stored,
                Err(err) => {
                    tracing::error!(?file_name, error = %err, "failed to upload");
                    continue;
                }
            };

            tracing::info!(link = %stored.link, "stored project picture");
            match self
                .db
                .create_project_pic(CreateProjectPicDBParams {
                    project_id: project.id,
                    link: stored.link,
                })
                .await
            {
                Ok(picture) => tracing::debug!(picture_id = picture.id, "saved picture"),
                Err(err) => tracing::error!(?file_name, error = %err, "failed to save picture"),
            }
        }

        for activity_id in params.activity_ids {
            match self
                .db
                .create_project_activity(CreateProjectActivityDBParams {
                    project_id: project.id,
                    activity_id,
                })
                .await
            {
                Ok(project_activity) => project.activity_ids.push(project_activity.activity_id),
                Err(DatabaseError::NotFound) => {
                    tracing::warn!(activity_id, "skipping unknown activity")
                }
                Err(err) => tracing::error!(activity_id, error = %err, "failed to add activity"),
            }
        }

        Ok(CreateProjectWithAttachmentsResult { project })
    }

    async fn get_project_pics(
        &self,
        params: GetProjectPicsServiceParams,
    ) -> Result<GetProjectPicsResult, GetProjectPicsError> {
        let pictures = self
            .db
            .list_project_pics(ListProjectPicsDBParams {
                project_id: params.project_id,
            })
            .await?;

        Ok(GetProjectPicsResult { pictures })
    }

    async fn create_provider_eligibility(
        &self,
        params: CreateProviderEligibilityServiceParams,
    ) -> Result<ProviderEligibility, CreateRecordError> {
        let eligibility = params.provider_eligibility;
        if eligibility.id.is_some() {
            return Err(CreateRecordError::IdExists);
        }

        let record = self
            .db
            .create_provider_eligibility(CreateProviderEligibilityDBParams {
                provider_id: eligibility.provider_id,
                project_id: eligibility.project_id,
            })
            .await?;

        Ok(record)
    }

    async fn update_provider_eligibility(
        &self,
        params: UpdateProviderEligibilityServiceParams,
    ) -> Result<UpdateResult<ProviderEligibility>, RecordError> {
        let eligibility = params.provider_eligibility;
        let (record, created) = match eligibility.id {
            None => {
                let record = self
                    .db
                    .create_provider_eligibility(CreateProviderEligibilityDBParams {
                        provider_id: eligibility.provider_id,
                        project_id: eligibility.project_id,
                    })
                    .await?;
                (record, true)
            }
            Some(provider_eligibility_id) => {
                let record = self
                    .db
                    .upsert_provider_eligibility(UpsertProviderEligibilityDBParams {
                        provider_eligibility_id,
                        provider_id: eligibility.provider_id,
                        project_id: eligibility.project_id,
                    })
                    .await?;
                (record, false)
            }
        };

        Ok(UpdateResult { record, created })
    }

    async fn get_provider_eligibilities(&self) -> Result<Vec<ProviderEligibility>, RecordError> {
        Ok(self.db.list_provider_eligibilities().await?)
    }

    async fn get_provider_eligibility_by_id(
        &self,
        params: GetProviderEligibilityByIDServiceParams,
    ) -> Result<Option<ProviderEligibility>, RecordError> {
        let record = self
            .db
            .find_provider_eligibility_by_id(FindProviderEligibilityDBParams {
                provider_eligibility_id: params.provider_eligibility_id,
            })
            .await?;

        Ok(record)
    }

    async fn delete_provider_eligibility(
        &self,
        params: DeleteProviderEligibilityServiceParams,
    ) -> Result<(), RecordError> {
        self.db
            .delete_provider_eligibility(DeleteProviderEligibilityDBParams {
                provider_eligibility_id: params.provider_eligibility_id,
            })
            .await?;

        Ok(())
    }

    async fn create_activity(
        &self,
        params: CreateActivityServiceParams,
    ) -> Result<Activity, CreateRecordError> {
        let activity = params.activity;
        if activity.id.is_some() {
            return Err(CreateRecordError::IdExists);
        }

        let record = self
            .db
            .create_activity(CreateActivityDBParams {
                name: activity.name,
                description: activity.description,
            })
            .await?;

        Ok(record)
    }

    async fn update_activity(
        &self,
        params: UpdateActivityServiceParams,
    ) -> Result<UpdateResult<Activity>, RecordError> {
        let activity = params.activity;
        let (record, created) = match activity.id {
            None => {
                let record = self
                    .db
                    .create_activity(CreateActivityDBParams {
                        name: activity.name,
                        description: activity.description,
                    })
                    .await?;
                (record, true)
            }
            Some(activity_id) => {
                let record = self
                    .db
                    .upsert_activity(UpsertActivityDBParams {
                        activity_id,
                        name: activity.name,
                        description: activity.description,
                    })
                    .await?;
                (record, false)
            }
        };

        Ok(UpdateResult { record, created })
    }

    async fn get_activities(&self) -> Result<Vec<Activity>, RecordError> {
        Ok(self.db.list_activities().await?)
    }

    async fn get_activity_by_id(
        &self,
        params: GetActivityByIDServiceParams,
    ) -> Result<Option<Activity>, RecordError> {
        let record = self
            .db
            .find_activity_by_id(FindActivityDBParams {
                activity_id: params.activity_id,
            })
            .await?;

        Ok(record)
    }

    async fn delete_activity(
        &self,
        params: DeleteActivityServiceParams,
    ) -> Result<(), RecordError> {
        self.db
            .delete_activity(DeleteActivityDBParams {
                activity_id: params.activity_id,
            })
            .await?;

        Ok(())
    }
}
