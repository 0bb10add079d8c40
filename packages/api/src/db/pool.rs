//! Lazy PostgreSQL connection pool shared by every server function and the
//! webhook route. Initialized on first use from `DATABASE_URL`; the web
//! entrypoint touches it at boot so migrations run before traffic arrives.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

const MAX_CONNECTIONS: u32 = 5;

/// Get or initialize the shared connection pool.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            sqlx::Error::Configuration("DATABASE_URL must be set".into())
        })?;

        PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(&database_url)
            .await
    })
    .await
}
