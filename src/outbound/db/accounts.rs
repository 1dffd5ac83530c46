use crate::domain::auth::{Account, AccountPort, CreateAccountDBParams, FindAccountDBParams};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::UserRow;
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;

#[async_trait]
impl AccountPort for Repository {
    async fn find_account_by_login(
        &self,
        params: FindAccountDBParams,
    ) -> Result<Option<Account>, Error> {
        let result = sqlx::query_as::<_, UserRow>(
            "select id, login, password_hash, activated from users where login = $1",
        )
        .bind(params.login)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn create_account(&self, params: CreateAccountDBParams) -> Result<Account, Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
insert into users (login, password_hash)
values ($1, $2)
returning id, login, password_hash, activated
"#,
        )
        .bind(params.login)
        .bind(params.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::classify)?;

        Ok(row.into())
    }
}
