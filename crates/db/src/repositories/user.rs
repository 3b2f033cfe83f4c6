use chrono::Utc;
use sqlx::Row;

use menubot_core::domain::user::{ProfileField, UserInfo};

use super::{RepositoryError, UserLookup, UserRepository};
use crate::DbPool;

pub struct SqlUserRepository {
    pool: DbPool,
}

impl SqlUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, cell_number: &str) -> Result<Option<UserInfo>, RepositoryError> {
        let row = sqlx::query(
            "SELECT cell_number, nickname, email, social, consent
             FROM user_info WHERE cell_number = ?",
        )
        .bind(cell_number)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<UserInfo, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::Decode(e.to_string());
    Ok(UserInfo {
        cell_number: row.try_get("cell_number").map_err(decode)?,
        nickname: row.try_get("nickname").map_err(decode)?,
        email: row.try_get("email").map_err(decode)?,
        social: row.try_get("social").map_err(decode)?,
        consent: row.try_get("consent").map_err(decode)?,
    })
}

/// Column backing each profile field. Kept as a closed mapping so field names
/// never reach the SQL text from user input.
fn column(field: ProfileField) -> &'static str {
    match field {
        ProfileField::Email => "email",
        ProfileField::Nickname => "nickname",
        ProfileField::Social => "social",
        ProfileField::Consent => "consent",
    }
}

#[async_trait::async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_or_create(&self, cell_number: &str) -> Result<UserLookup, RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let inserted = sqlx::query(
            "INSERT INTO user_info (cell_number, created_at, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(cell_number) DO NOTHING",
        )
        .bind(cell_number)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        let user = self.find(cell_number).await?.ok_or_else(|| {
            RepositoryError::Decode(format!("user `{cell_number}` vanished after insert"))
        })?;
        Ok(UserLookup { user, existed: inserted == 0 })
    }

    async fn update_field(
        &self,
        cell_number: &str,
        field: ProfileField,
        value: &str,
    ) -> Result<UserInfo, RepositoryError> {
        let statement = format!(
            "INSERT INTO user_info (cell_number, {column}, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(cell_number) DO UPDATE SET
                 {column} = excluded.{column},
                 updated_at = excluded.updated_at",
            column = column(field)
        );
        let now = Utc::now().to_rfc3339();

        sqlx::query(&statement)
            .bind(cell_number)
            .bind(value)
            .bind(&now)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        self.find(cell_number).await?.ok_or_else(|| {
            RepositoryError::Decode(format!("user `{cell_number}` vanished after update"))
        })
    }
}
