use crate::domain::session::{SessionError, SessionPort, UserSession};
use async_trait::async_trait;
use tower_sessions::Session;

const SESSION: &str = "session";

#[cfg_attr(test, mockall::automock)]
pub trait SessionFactory<S: SessionPort> {
    fn build(&self, session: Session) -> S;
}

#[derive(Debug, Clone)]
pub struct SessionAdapterFactory {}

#[derive(Debug, Clone)]
pub struct SessionAdapter {
    session: Session,
}

impl Default for SessionAdapterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAdapterFactory {
    pub fn new() -> Self {
        Self {}
    }
}

impl SessionFactory<SessionAdapter> for SessionAdapterFactory {
    fn build(&self, session: Session) -> SessionAdapter {
        SessionAdapter::new(session)
    }
}

impl SessionAdapter {
    fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionPort for SessionAdapter {
    async fn write_user_session(&self, params: UserSession) -> Result<(), SessionError> {
        self.session.insert(SESSION, params).await?;

        Ok(())
    }

    async fn get_user_session(&self) -> Result<Option<UserSession>, SessionError> {
        let session = self.session.get::<UserSession>(SESSION).await?;

        Ok(session)
    }

    async fn flush(&self) -> Result<(), SessionError> {
        self.session.flush().await?;
        self.session.save().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn memory_session() -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(None, store, None)
    }

    #[tokio::test]
    async fn test_user_session_round_trip() {
        let adapter = SessionAdapterFactory::new().build(memory_session());

        adapter
            .write_user_session(UserSession {
                user_id: 5,
                login: "jdoe".to_string(),
            })
            .await
            .unwrap();
        let user_session = adapter.get_user_session().await.unwrap().unwrap();

        assert_eq!(5, user_session.user_id);
        assert_eq!("jdoe", user_session.login);
    }

    #[tokio::test]
    async fn test_flush_clears_user_session() {
        let adapter = SessionAdapterFactory::new().build(memory_session());
        adapter
            .write_user_session(UserSession {
                user_id: 5,
                login: "jdoe".to_string(),
            })
            .await
            .unwrap();

        adapter.flush().await.unwrap();

        assert!(adapter.get_user_session().await.unwrap().is_none());
    }
}
