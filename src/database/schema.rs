use sqlx::PgPool;
use tracing::{info, warn};

/// Idempotent DDL applied at startup.
///
/// The unique index names are load-bearing: conflict classification in the
/// repository layer matches on `idx_users_email` and `idx_users_username`.
const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id VARCHAR(50) PRIMARY KEY,
        username VARCHAR(50) NOT NULL,
        email VARCHAR(50) NOT NULL,
        password_hash TEXT NOT NULL,
        age INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (email)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users (username)",
    r#"
    CREATE TABLE IF NOT EXISTS photos (
        id VARCHAR(50) PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        caption TEXT NOT NULL DEFAULT '',
        photo_url TEXT NOT NULL,
        owner_id VARCHAR(50) NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id VARCHAR(50) PRIMARY KEY,
        message TEXT NOT NULL,
        owner_id VARCHAR(50) NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        photo_id VARCHAR(50) NOT NULL REFERENCES photos (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    // No ON DELETE CASCADE here: user deletion removes these rows itself,
    // inside the same transaction as the user row.
    r#"
    CREATE TABLE IF NOT EXISTS social_media (
        id VARCHAR(50) PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        social_media_url TEXT NOT NULL,
        owner_id VARCHAR(50) NOT NULL REFERENCES users (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

/// Apply the schema if the database is reachable.
///
/// Failure is logged but not fatal: the server still starts and reports a
/// degraded health status until PostgreSQL comes back.
pub async fn ensure_schema(pool: &PgPool) {
    for statement in DDL {
        if let Err(err) = sqlx::query(statement).execute(pool).await {
            warn!(error = %err, "schema bootstrap failed; continuing without it");
            return;
        }
    }
    info!("database schema ensured");
}
