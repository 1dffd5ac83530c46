use crate::core::config::Config;
use crate::domain::auth::AuthService;
use crate::domain::marketplace::MarketplaceService;
use std::sync::Arc;

pub trait ApplicationServices: Clone + Send + Sync {
    type AUTH: AuthService + Send;
    type MARKETPLACE: MarketplaceService + Send;

    fn config(&self) -> Config;

    fn auth_service(&self) -> Arc<Self::AUTH>;

    fn marketplace_service(&self) -> Arc<Self::MARKETPLACE>;
}

pub struct Application<AUTH, MARKETPLACE>
where
    AUTH: AuthService + Send + Sync + 'static,
    MARKETPLACE: MarketplaceService + Send + Sync + 'static,
{
    config: Config,
    auth_service: Arc<AUTH>,
    marketplace_service: Arc<MARKETPLACE>,
}

impl<AUTH, MARKETPLACE> Application<AUTH, MARKETPLACE>
where
    AUTH: AuthService + Send + Sync + 'static,
    MARKETPLACE: MarketplaceService + Send + Sync + 'static,
{
    pub fn new(config: Config, auth_service: AUTH, marketplace_service: MARKETPLACE) -> Self {
        Self {
            config,
            auth_service: Arc::new(auth_service),
            marketplace_service: Arc::new(marketplace_service),
        }
    }
}

impl<AUTH, MARKETPLACE> Clone for Application<AUTH, MARKETPLACE>
where
    AUTH: AuthService + Send + Sync + 'static,
    MARKETPLACE: MarketplaceService + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            auth_service: self.auth_service.clone(),
            marketplace_service: self.marketplace_service.clone(),
        }
    }
}

impl<AUTH, MARKETPLACE> ApplicationServices for Application<AUTH, MARKETPLACE>
where
    AUTH: AuthService + Send + Sync + 'static,
    MARKETPLACE: MarketplaceService + Send + Sync + 'static,
{
    type AUTH = AUTH;
    type MARKETPLACE = MARKETPLACE;

    fn config(&self) -> Config {
        self.config.clone()
    }

    fn auth_service(&self) -> Arc<Self::AUTH> {
        self.auth_service.clone()
    }

    fn marketplace_service(&self) -> Arc<Self::MARKETPLACE> {
        self.marketplace_service.clone()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::core::application::Application;
    use crate::core::config::Config;
    use crate::domain::auth::{AuthService, CurrentUser, MockAuthService};
    use crate::domain::marketplace::{MarketplaceService, MockMarketplaceService};
    use std::future;

    pub struct MockAppInstanceParameters<AUTH, MARKETPLACE>
    where
        AUTH: AuthService + Send + Sync + 'static,
        MARKETPLACE: MarketplaceService + Send + Sync + 'static,
    {
        pub config: Option<Config>,
        pub auth_service: Option<AUTH>,
        pub marketplace_service: Option<MARKETPLACE>,
    }

    impl<AUTH, MARKETPLACE> Application<AUTH, MARKETPLACE>
    where
        AUTH: AuthService + Send + Sync + 'static,
        MARKETPLACE: MarketplaceService + Send + Sync + 'static,
    {
        pub fn mock_instance(
            params: MockAppInstanceParameters<MockAuthService, MockMarketplaceService>,
        ) -> Application<MockAuthService, MockMarketplaceService> {
            let app_config = params.config.unwrap_or_default();
            let auth_service = params.auth_service.unwrap_or(MockAuthService::new());
            let marketplace_service = params
                .marketplace_service
                .unwrap_or(MockMarketplaceService::new());

            Application::new(app_config, auth_service, marketplace_service)
        }
    }

    pub fn current_user() -> CurrentUser {
        CurrentUser {
            user_id: 7,
            login: "jdoe".to_string(),
        }
    }

    /// An auth service whose session always resolves to [`current_user`].
    pub fn authenticated_auth_service() -> MockAuthService {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_current_user()
            .returning(|_| Box::pin(future::ready(Ok(Some(current_user())))));

        auth_service
    }

    /// Application with a logged in user and the given marketplace service.
    pub fn authenticated_app(
        marketplace_service: MockMarketplaceService,
    ) -> Application<MockAuthService, MockMarketplaceService> {
        Application::<MockAuthService, MockMarketplaceService>::mock_instance(
            MockAppInstanceParameters {
                config: None,
                auth_service: Some(authenticated_auth_service()),
                marketplace_service: Some(marketplace_service),
            },
        )
    }
}
