use crate::domain::auth::{
    AccountPort, AuthService, CreateAccountDBParams, CurrentUser, FindAccountDBParams,
    ServiceCurrentUserError, ServiceCurrentUserParams, ServiceLoginError, ServiceLoginParams,
    ServiceLoginResult, ServiceLogoutError, ServiceLogoutParams, ServiceRegisterError,
    ServiceRegisterParams, ServiceRegisterResult, hash_password, verify_password,
};
use crate::domain::session::{SessionPort, UserSession};
use crate::outbound::session::SessionFactory;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Service<SESSION, ACCOUNTS, F>
where
    SESSION: SessionPort + Send + Sync + 'static,
    ACCOUNTS: AccountPort + Send + Sync + 'static,
    F: SessionFactory<SESSION> + Send + Sync + 'static,
{
    accounts: Arc<ACCOUNTS>,
    session_factory: F,
    _session: PhantomData<SESSION>,
}

impl<SESSION, ACCOUNTS, F> Service<SESSION, ACCOUNTS, F>
where
    SESSION: SessionPort + Send + Sync + 'static,
    ACCOUNTS: AccountPort + Send + Sync + 'static,
    F: SessionFactory<SESSION> + Send + Sync + 'static,
{
    pub fn new(accounts: ACCOUNTS, session_adapter_factory: F) -> Self {
        Self {
            accounts: Arc::new(accounts),
            session_factory: session_adapter_factory,
            _session: PhantomData,
        }
    }
}

#[async_trait]
impl<SESSION, ACCOUNTS, F> AuthService for Service<SESSION, ACCOUNTS, F>
where
    SESSION: SessionPort + Send + Sync + 'static,
    ACCOUNTS: AccountPort + Send + Sync + 'static,
    F: SessionFactory<SESSION> + Send + Sync + 'static,
{
    async fn login(
        &self,
        params: ServiceLoginParams,
    ) -> Result<ServiceLoginResult, ServiceLoginError> {
        let account = self
            .accounts
            .find_account_by_login(FindAccountDBParams {
                login: params.login.clone(),
            })
            .await?
            .ok_or(ServiceLoginError::InvalidCredentials)?;

        if !account.activated {
            tracing::debug!(login = %account.login, "login refused for deactivated account");
            return Err(ServiceLoginError::InvalidCredentials);
        }

        if !verify_password(&account.password_hash, &params.password)? {
            return Err(ServiceLoginError::InvalidCredentials);
        }

        let session = self.session_factory.build(params.session);

        // prevent fixation and clear any previous user before writing the new one
        session.flush().await?;
        session
            .write_user_session(UserSession {
                user_id: account.id,
                login: account.login.clone(),
            })
            .await?;
        tracing::debug!(login = %account.login, "wrote user session");

        Ok(ServiceLoginResult {
            user: CurrentUser {
                user_id: account.id,
                login: account.login,
            },
        })
    }

    async fn logout(&self, params: ServiceLogoutParams) -> Result<(), ServiceLogoutError> {
        let session = self.session_factory.build(params.session);
        session.flush().await?;

        Ok(())
    }

    async fn current_user(
        &self,
        params: ServiceCurrentUserParams,
    ) -> Result<Option<CurrentUser>, ServiceCurrentUserError> {
        let session = self.session_factory.build(params.session);

        let user = session
            .get_user_session()
            .await?
            .map(CurrentUser::from);

        Ok(user)
    }

    async fn register(
        &self,
        params: ServiceRegisterParams,
    ) -> Result<ServiceRegisterResult, ServiceRegisterError> {
        let password_hash = hash_password(&params.password)?;
        let account = self
            .accounts
            .create_account(CreateAccountDBParams {
                login: params.login,
                password_hash,
            })
            .await?;

        Ok(ServiceRegisterResult {
            user: CurrentUser {
                user_id: account.id,
                login: account.login,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::{Account, MockAccountPort};
    use crate::domain::session::MockSessionPort;
    use crate::domain::session::SessionError::{ReadSessionError, WriteSessionError};
    use crate::outbound::db::error::Error as DatabaseError;
    use crate::outbound::session::MockSessionFactory;
    use std::future;
    use tower_sessions::{MemoryStore, Session};

    type TestService = Service<MockSessionPort, MockAccountPort, MockSessionFactory<MockSessionPort>>;

    fn memory_session() -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(None, store, None)
    }

    fn account(password: &str, activated: bool) -> Account {
        Account {
            id: 11,
            login: "jdoe".to_string(),
            password_hash: hash_password(password).unwrap(),
            activated,
        }
    }

    fn login_params(password: &str) -> ServiceLoginParams {
        ServiceLoginParams {
            session: memory_session(),
            login: "jdoe".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login() {
        let stored = account("s3cret", true);
        let mut accounts = MockAccountPort::new();
        accounts
            .expect_find_account_by_login()
            .withf(|params| params.login == "jdoe")
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(stored)))));
        let mut session = MockSessionPort::new();
        session
            .expect_flush()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(()))));
        session
            .expect_write_user_session()
            .withf(|params| params.user_id == 11 && params.login == "jdoe")
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(()))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory
            .expect_build()
            .times(1)
            .return_once(|_| session);

        let service: TestService = Service::new(accounts, session_factory);
        let result = service.login(login_params("s3cret")).await.unwrap();

        assert_eq!(11, result.user.user_id);
        assert_eq!("jdoe", result.user.login);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let stored = account("s3cret", true);
        let mut accounts = MockAccountPort::new();
        accounts
            .expect_find_account_by_login()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(stored)))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory.expect_build().times(0);

        let service: TestService = Service::new(accounts, session_factory);
        let result = service.login(login_params("guess")).await;

        assert!(matches!(result, Err(ServiceLoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_login() {
        let mut accounts = MockAccountPort::new();
        accounts
            .expect_find_account_by_login()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(None))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory.expect_build().times(0);

        let service: TestService = Service::new(accounts, session_factory);
        let result = service.login(login_params("s3cret")).await;

        assert!(matches!(result, Err(ServiceLoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_deactivated_account() {
        let stored = account("s3cret", false);
        let mut accounts = MockAccountPort::new();
        accounts
            .expect_find_account_by_login()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(stored)))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory.expect_build().times(0);

        let service: TestService = Service::new(accounts, session_factory);
        let result = service.login(login_params("s3cret")).await;

        assert!(matches!(result, Err(ServiceLoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_write_session_error() {
        let stored = account("s3cret", true);
        let mut accounts = MockAccountPort::new();
        accounts
            .expect_find_account_by_login()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(Some(stored)))));
        let mut session = MockSessionPort::new();
        session
            .expect_flush()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(()))));
        session
            .expect_write_user_session()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Err(WriteSessionError))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory
            .expect_build()
            .times(1)
            .return_once(|_| session);

        let service: TestService = Service::new(accounts, session_factory);
        let result = service.login(login_params("s3cret")).await;

        assert!(matches!(result, Err(ServiceLoginError::SessionError(_))));
    }

    #[tokio::test]
    async fn test_current_user() {
        let mut session = MockSessionPort::new();
        session.expect_get_user_session().times(1).return_once(|| {
            Box::pin(future::ready(Ok(Some(UserSession {
                user_id: 11,
                login: "jdoe".to_string(),
            }))))
        });
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory
            .expect_build()
            .times(1)
            .return_once(|_| session);

        let service: TestService = Service::new(MockAccountPort::new(), session_factory);
        let result = service
            .current_user(ServiceCurrentUserParams {
                session: memory_session(),
            })
            .await
            .unwrap();

        assert_eq!(
            Some(CurrentUser {
                user_id: 11,
                login: "jdoe".to_string()
            }),
            result
        );
    }

    #[tokio::test]
    async fn test_current_user_anonymous() {
        let mut session = MockSessionPort::new();
        session
            .expect_get_user_session()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(None))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory
            .expect_build()
            .times(1)
            .return_once(|_| session);

        let service: TestService = Service::new(MockAccountPort::new(), session_factory);
        let result = service
            .current_user(ServiceCurrentUserParams {
                session: memory_session(),
            })
            .await
            .unwrap();

        assert_eq!(None, result);
    }

    #[tokio::test]
    async fn test_current_user_session_error() {
        let mut session = MockSessionPort::new();
        session
            .expect_get_user_session()
            .times(1)
            .return_once(|| Box::pin(future::ready(Err(ReadSessionError))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory
            .expect_build()
            .times(1)
            .return_once(|_| session);

        let service: TestService = Service::new(MockAccountPort::new(), session_factory);
        let result = service
            .current_user(ServiceCurrentUserParams {
                session: memory_session(),
            })
            .await;

        assert_eq!(true, result.is_err());
    }

    #[tokio::test]
    async fn test_logout() {
        let mut session = MockSessionPort::new();
        session
            .expect_flush()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(()))));
        let mut session_factory: MockSessionFactory<MockSessionPort> = MockSessionFactory::new();
        session_factory
            .expect_build()
            .times(1)
            .return_once(|_| session);

        let service: TestService = Service::new(MockAccountPort::new(), session_factory);
        let result = service
            .logout(ServiceLogoutParams {
                session: memory_session(),
            })
            .await;

        assert_eq!(true, result.is_ok());
    }

    #[tokio::test]
    async fn test_register_login_taken() {
        let mut accounts = MockAccountPort::new();
        accounts
            .expect_create_account()
            .withf(|params| params.login == "jdoe" && params.password_hash.starts_with("$argon2"))
            .times(1)
            .return_once(|_| Box::pin(future::ready(Err(DatabaseError::OnConflict))));

        let service: TestService = Service::new(accounts, MockSessionFactory::new());
        let result = service
            .register(ServiceRegisterParams {
                login: "jdoe".to_string(),
                password: "s3cret".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ServiceRegisterError::LoginTaken)));
    }
}
