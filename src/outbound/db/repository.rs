use sqlx::PgPool;

/// Postgres implementation of the marketplace and account ports.
#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: PgPool,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
