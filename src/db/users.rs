use crate::db::models::{CreateUserOutcome, DbUser, Role};
use crate::db::schema::SEED_USERS;
use crate::db::sqlite::SqlitePool;
use crate::error::DeskError;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use subtle::ConstantTimeEq;
use tracing::{debug, info};

/// Credential store backed by the `users` table.
#[derive(Clone)]
pub struct UsersStorage {
    pool: SqlitePool,
}

impl UsersStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the built-in accounts, skipping any username already present.
    pub async fn seed_defaults(&self) -> Result<(), DeskError> {
        for (username, password, role) in SEED_USERS {
            let res =
                sqlx::query("INSERT OR IGNORE INTO users (username, password, role) VALUES (?, ?, ?)")
                    .bind(username)
                    .bind(password)
                    .bind(role)
                    .execute(&self.pool)
                    .await?;
            if res.rows_affected() > 0 {
                info!(username, role, "seeded user");
            }
        }
        Ok(())
    }

    /// Exact match on username and password. Returns the account's role.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Role>, DeskError> {
        let row = sqlx::query("SELECT password, role FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            debug!(username, "authentication failed: unknown user");
            return Ok(None);
        };

        let stored: String = row.try_get("password")?;
        if !bool::from(stored.as_bytes().ct_eq(password.as_bytes())) {
            debug!(username, "authentication failed: password mismatch");
            return Ok(None);
        }
        let role: String = row.try_get("role")?;
        Ok(Some(decode_role(&role)?))
    }

    /// Insert a new account. A taken username is reported, not raised.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<CreateUserOutcome, DeskError> {
        let res = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(username)
            .bind(password)
            .bind(role.as_str())
            .execute(&self.pool)
            .await;
        match res {
            Ok(_) => {
                info!(username, %role, "user created");
                Ok(CreateUserOutcome::Created)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(username, "user already exists");
                Ok(CreateUserOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> Result<Vec<DbUser>, DeskError> {
        let rows = sqlx::query("SELECT id, username, role FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    fn row_to_model(row: SqliteRow) -> Result<DbUser, DeskError> {
        let id: i64 = row.try_get("id")?;
        let username: String = row.try_get("username")?;
        let role: String = row.try_get("role")?;
        Ok(DbUser {
            id,
            username,
            role: decode_role(&role)?,
        })
    }
}

/// A stored role that fails to parse is a corrupt row, not a bad request.
fn decode_role(role: &str) -> Result<Role, sqlx::Error> {
    role.parse()
        .map_err(|e: DeskError| sqlx::Error::Decode(e.to_string().into()))
}
