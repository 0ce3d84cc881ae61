use crate::db::models::{AnnotationStatus, DbAnnotation, NewAnnotation};
use crate::db::sqlite::SqlitePool;
use crate::error::DeskError;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::{debug, info};

const SELECT_COLUMNS: &str =
    r#"SELECT id, file, sheet, "row", "column", annotation, status, section FROM annotations"#;

/// Annotation store backed by the `annotations` table. Every read hits the
/// database; nothing is cached.
#[derive(Clone)]
pub struct AnnotationsStorage {
    pool: SqlitePool,
}

impl AnnotationsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Annotations attached to one sheet of one file within a section.
    pub async fn list(
        &self,
        file: &str,
        sheet: &str,
        section: &str,
    ) -> Result<Vec<DbAnnotation>, DeskError> {
        let sql = format!("{SELECT_COLUMNS} WHERE file = ? AND sheet = ? AND section = ? ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(file)
            .bind(sheet)
            .bind(section)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Every annotation in a section regardless of file or sheet.
    pub async fn list_by_section(&self, section: &str) -> Result<Vec<DbAnnotation>, DeskError> {
        let sql = format!("{SELECT_COLUMNS} WHERE section = ? ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(section)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Insert and return the assigned id.
    pub async fn add(&self, new: NewAnnotation) -> Result<i64, DeskError> {
        let res = sqlx::query(
            r#"INSERT INTO annotations (file, sheet, "row", "column", annotation, status, section)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&new.file)
        .bind(&new.sheet)
        .bind(i64::from(new.row))
        .bind(&new.column)
        .bind(&new.text)
        .bind(new.status.as_str())
        .bind(&new.section)
        .execute(&self.pool)
        .await?;
        let id = res.last_insert_rowid();
        info!(
            id,
            file = %new.file,
            sheet = %new.sheet,
            section = %new.section,
            "annotation added"
        );
        Ok(id)
    }

    /// Unknown ids are a silent no-op.
    pub async fn update_status(&self, id: i64, status: AnnotationStatus) -> Result<(), DeskError> {
        let res = sqlx::query("UPDATE annotations SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            debug!(id, "status update matched no annotation");
        } else {
            info!(id, %status, "annotation status updated");
        }
        Ok(())
    }

    /// Unknown ids are a silent no-op.
    pub async fn delete(&self, id: i64) -> Result<(), DeskError> {
        let res = sqlx::query("DELETE FROM annotations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            debug!(id, "delete matched no annotation");
        } else {
            info!(id, "annotation deleted");
        }
        Ok(())
    }

    fn row_to_model(row: SqliteRow) -> Result<DbAnnotation, DeskError> {
        let id: i64 = row.try_get("id")?;
        let file: String = row.try_get("file")?;
        let sheet: String = row.try_get("sheet")?;
        let row_idx: i64 = row.try_get("row")?;
        let column: String = row.try_get("column")?;
        let text: String = row.try_get("annotation")?;
        let status: String = row.try_get("status")?;
        let section: String = row.try_get("section")?;

        let row_idx = u32::try_from(row_idx)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(DbAnnotation {
            id,
            file,
            sheet,
            row: row_idx,
            column,
            text,
            status: status
                .parse()
                .map_err(|e: DeskError| sqlx::Error::Decode(e.to_string().into()))?,
            section,
        })
    }
}
