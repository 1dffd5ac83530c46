use serde::{Deserialize, Serialize};

/// The authenticated caller, resolved once per request by the auth middleware
/// and handed to handlers as a request extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user_id: i64,
    pub login: String,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub activated: bool,
}
