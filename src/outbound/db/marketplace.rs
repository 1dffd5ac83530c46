use crate::domain::marketplace::{
    Activity, CreateActivityDBParams, CreateProjectActivityDBParams, CreateProjectDBParams,
    CreateProjectPicDBParams, CreateProviderEligibilityDBParams, Customer, DatabaseRepository,
    DeleteActivityDBParams, DeleteProjectDBParams, DeleteProviderEligibilityDBParams,
    FindActivityDBParams, FindByUserDBParams, FindProjectDBParams,
    FindProviderEligibilityDBParams, ListProjectPicsDBParams, ListProjectsByActivitiesDBParams,
    ListProjectsByCustomerDBParams, Project, ProjectActivity, ProjectPic, Provider,
    ProviderEligibility, UpsertActivityDBParams, UpsertProjectDBParams,
    UpsertProviderEligibilityDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{
    ActivityRow, CustomerRow, ProjectActivityRow, ProjectPicRow, ProjectRow, ProjectRowList,
    ProviderEligibilityRow, ProviderRow,
};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

const PROJECT_SELECT: &str = r#"
select
    p.id,
    p.title,
    p.description,
    p.date_send,
    p.city,
    p.street,
    p.street_number,
    p.postal_code,
    p.complement_street,
    p.customer_id,
    array(
        select pa.activity_id
        from project_activities pa
        where pa.project_id = p.id
        order by pa.activity_id
    ) as activity_ids
from projects p
"#;

/// Moves the id sequence of `table` past the highest id, so rows upserted with
/// a client chosen id never collide with later generated ones.
async fn advance_id_sequence(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
) -> Result<(), Error> {
    let sql = format!(
        "select setval(pg_get_serial_sequence('{table}', 'id'), greatest((select max(id) from {table}), 1))"
    );
    sqlx::query(&sql).execute(&mut **tx).await?;

    Ok(())
}

#[async_trait]
impl DatabaseRepository for Repository {
    async fn create_project(&self, params: CreateProjectDBParams) -> Result<Project, Error> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
insert into projects (title, description, date_send, city, street, street_number, postal_code,
                      complement_street, customer_id)
values ($1, $2, $3, $4, $5, $6, $7, $8, $9)
returning id, title, description, date_send, city, street, street_number, postal_code,
          complement_street, customer_id, '{}'::bigint[] as activity_ids
"#,
        )
        .bind(params.title)
        .bind(params.description)
        .bind(params.date_send)
        .bind(params.address.city)
        .bind(params.address.street)
        .bind(params.address.street_number)
        .bind(params.address.postal_code)
        .bind(params.address.complement_street)
        .bind(params.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::classify)?;

        Ok(row.into())
    }

    async fn upsert_project(&self, params: UpsertProjectDBParams) -> Result<Project, Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
insert into projects (id, title, description, date_send, city, street, street_number, postal_code,
                      complement_street, customer_id)
values ($1, $2, $3, coalesce($4, $5), $6, $7, $8, $9, $10, $11)
on conflict (id) do update set
    title = excluded.title,
    description = excluded.description,
    date_send = coalesce($4, projects.date_send),
    city = excluded.city,
    street = excluded.street,
    street_number = excluded.street_number,
    postal_code = excluded.postal_code,
    complement_street = excluded.complement_street,
    customer_id = excluded.customer_id
"#,
        )
        .bind(params.project_id)
        .bind(params.title)
        .bind(params.description)
        .bind(params.date_send)
        .bind(params.default_date_send)
        .bind(params.address.city)
        .bind(params.address.street)
        .bind(params.address.street_number)
        .bind(params.address.postal_code)
        .bind(params.address.complement_street)
        .bind(params.customer_id)
        .execute(&mut *tx)
        .await
        .map_err(Error::classify)?;

        advance_id_sequence(&mut tx, "projects").await?;

        let sql = format!("{PROJECT_SELECT} where p.id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(params.project_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete_project(&self, params: DeleteProjectDBParams) -> Result<(), Error> {
        sqlx::query("delete from projects where id = $1")
            .bind(params.project_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let sql = format!("{PROJECT_SELECT} order by p.id");
        let result = sqlx::query_as::<_, ProjectRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(ProjectRowList(result).into())
    }

    async fn find_project_by_id(
        &self,
        params: FindProjectDBParams,
    ) -> Result<Option<Project>, Error> {
        let sql = format!("{PROJECT_SELECT} where p.id = $1");
        let result = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(params.project_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into());

        Ok(result)
    }

    async fn list_projects_by_activities(
        &self,
        params: ListProjectsByActivitiesDBParams,
    ) -> Result<Vec<Project>, Error> {
        let sql = format!(
            r#"{PROJECT_SELECT}
where exists (
    select 1
    from project_activities pa
    where pa.project_id = p.id
      and pa.activity_id = any($1)
)
order by p.id"#
        );
        let result = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(params.activity_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(ProjectRowList(result).into())
    }

    async fn list_projects_by_customer(
        &self,
        params: ListProjectsByCustomerDBParams,
    ) -> Result<Vec<Project>, Error> {
        let sql = format!("{PROJECT_SELECT} where p.customer_id = $1 order by p.id");
        let result = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(params.customer_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(ProjectRowList(result).into())
    }

    async fn find_customer_by_user_id(
        &self,
        params: FindByUserDBParams,
    ) -> Result<Option<Customer>, Error> {
        let result = sqlx::query_as::<_, CustomerRow>(
            r#"
select
    c.id,
    c.user_id,
    c.city,
    c.street,
    c.street_number,
    c.postal_code,
    c.complement_street
from customers c
where c.user_id = $1
"#,
        )
        .bind(params.user_id)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn find_provider_by_user_id(
        &self,
        params: FindByUserDBParams,
    ) -> Result<Option<Provider>, Error> {
        let result = sqlx::query_as::<_, ProviderRow>(
            r#"
select
    p.id,
    p.user_id,
    array(
        select pa.activity_id
        from provider_activities pa
        where pa.provider_id = p.id
        order by pa.activity_id
    ) as activity_ids
from providers p
where p.user_id = $1
"#,
        )
        .bind(params.user_id)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn create_project_pic(&self, params: CreateProjectPicDBParams) -> Result<ProjectPic, Error> {
        let row = sqlx::query_as::<_, ProjectPicRow>(
            "insert into project_pics (link, project_id) values ($1, $2) returning id, link, project_id",
        )
        .bind(params.link)
        .bind(params.project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::classify)?;

        Ok(row.into())
    }

    async fn list_project_pics(
        &self,
        params: ListProjectPicsDBParams,
    ) -> Result<Vec<ProjectPic>, Error> {
        let result = sqlx::query_as::<_, ProjectPicRow>(
            "select id, link, project_id from project_pics where project_id = $1 order by id",
        )
        .bind(params.project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result.into_iter().map(|row| row.into()).collect())
    }

    async fn create_project_activity(
        &self,
        params: CreateProjectActivityDBParams,
    ) -> Result<ProjectActivity, Error> {
        let row = sqlx::query_as::<_, ProjectActivityRow>(
            r#"
insert into project_activities (project_id, activity_id)
values ($1, $2)
returning id, project_id, activity_id
"#,
        )
        .bind(params.project_id)
        .bind(params.activity_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::classify)?;

        Ok(row.into())
    }

    async fn create_provider_eligibility(
        &self,
        params: CreateProviderEligibilityDBParams,
    ) -> Result<ProviderEligibility, Error> {
        let row = sqlx::query_as::<_, ProviderEligibilityRow>(
            r#"
insert into provider_eligibilities (provider_id, project_id)
values ($1, $2)
returning id, provider_id, project_id
"#,
        )
        .bind(params.provider_id)
        .bind(params.project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::classify)?;

        Ok(row.into())
    }

    async fn upsert_provider_eligibility(
        &self,
        params: UpsertProviderEligibilityDBParams,
    ) -> Result<ProviderEligibility, Error> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProviderEligibilityRow>(
            r#"
insert into provider_eligibilities (id, provider_id, project_id)
values ($1, $2, $3)
on conflict (id) do update set
    provider_id = excluded.provider_id,
    project_id = excluded.project_id
returning id, provider_id, project_id
"#,
        )
        .bind(params.provider_eligibility_id)
        .bind(params.provider_id)
        .bind(params.project_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::classify)?;

        advance_id_sequence(&mut tx, "provider_eligibilities").await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete_provider_eligibility(
        &self,
        params: DeleteProviderEligibilityDBParams,
    ) -> Result<(), Error> {
        sqlx::query("delete from provider_eligibilities where id = $1")
            .bind(params.provider_eligibility_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_provider_eligibilities(&self) -> Result<Vec<ProviderEligibility>, Error> {
        let result = sqlx::query_as::<_, ProviderEligibilityRow>(
            "select id, provider_id, project_id from provider_eligibilities order by id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result.into_iter().map(|row| row.into()).collect())
    }

    async fn find_provider_eligibility_by_id(
        &self,
        params: FindProviderEligibilityDBParams,
    ) -> Result<Option<ProviderEligibility>, Error> {
        let result = sqlx::query_as::<_, ProviderEligibilityRow>(
            "select id, provider_id, project_id from provider_eligibilities where id = $1",
        )
        .bind(params.provider_eligibility_id)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn create_activity(&self, params: CreateActivityDBParams) -> Result<Activity, Error> {
        let row = sqlx::query_as::<_, ActivityRow>(
            "insert into activities (name, description) values ($1, $2) returning id, name, description",
        )
        .bind(params.name)
        .bind(params.description)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::classify)?;

        Ok(row.into())
    }

    async fn upsert_activity(&self, params: UpsertActivityDBParams) -> Result<Activity, Error> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
insert into activities (id, name, description)
values ($1, $2, $3)
on conflict (id) do update set
    name = excluded.name,
    description = excluded.description
returning id, name, description
"#,
        )
        .bind(params.activity_id)
        .bind(params.name)
        .bind(params.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::classify)?;

        advance_id_sequence(&mut tx, "activities").await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete_activity(&self, params: DeleteActivityDBParams) -> Result<(), Error> {
        sqlx::query("delete from activities where id = $1")
            .bind(params.activity_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, Error> {
        let result = sqlx::query_as::<_, ActivityRow>(
            "select id, name, description from activities order by id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result.into_iter().map(|row| row.into()).collect())
    }

    async fn find_activity_by_id(
        &self,
        params: FindActivityDBParams,
    ) -> Result<Option<Activity>, Error> {
        let result = sqlx::query_as::<_, ActivityRow>(
            "select id, name, description from activities where id = $1",
        )
        .bind(params.activity_id)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }
}
