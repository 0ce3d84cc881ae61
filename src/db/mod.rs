//! Database module: models, schema and the two stores.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL and seed accounts (SQLite)
//! - `sqlite.rs`: pool setup and schema initialization
//! - `users.rs` / `annotations.rs`: the credential and annotation stores

pub mod annotations;
pub mod models;
pub mod schema;
pub mod sqlite;
pub mod users;

pub use annotations::AnnotationsStorage;
pub use models::{AnnotationStatus, CreateUserOutcome, DbAnnotation, DbUser, NewAnnotation, Role};
pub use schema::SQLITE_INIT;
pub use sqlite::SqlitePool;
pub use users::UsersStorage;

/// Open the database, create the schema and seed the default accounts.
pub async fn open(database_url: &str) -> Result<SqlitePool, crate::error::DeskError> {
    let pool = sqlite::connect(database_url).await?;
    sqlite::init_schema(&pool).await?;
    UsersStorage::new(pool.clone()).seed_defaults().await?;
    Ok(pool)
}
