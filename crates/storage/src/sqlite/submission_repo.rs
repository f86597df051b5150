use async_trait::async_trait;
use neuropath_core::model::{NewSubmission, Submission, SubmissionId, SubmissionKind};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{
    fields_to_json, map_submission_row, ser, submission_id_from_i64, submission_id_to_i64,
};
use crate::repository::{StorageError, SubmissionRepository};

#[async_trait]
impl SubmissionRepository for SqliteRepository {
    async fn append(&self, submission: &NewSubmission) -> Result<SubmissionId, StorageError> {
        let fields = fields_to_json(&submission.fields)?;
        let res = sqlx::query(
            r"
                INSERT INTO submissions (kind, fields, submitted_at)
                VALUES (?1, ?2, ?3)
            ",
        )
        .bind(submission.kind.key())
        .bind(fields)
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        submission_id_from_i64(res.last_insert_rowid())
    }

    async fn list(&self, kind: SubmissionKind) -> Result<Vec<Submission>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, kind, fields, submitted_at
                FROM submissions
                WHERE kind = ?1
                ORDER BY id ASC
            ",
        )
        .bind(kind.key())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_submission_row).collect()
    }

    async fn count(&self, kind: SubmissionKind) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM submissions WHERE kind = ?1")
            .bind(kind.key())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(ser)
    }

    async fn get(&self, id: SubmissionId) -> Result<Submission, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, kind, fields, submitted_at
                FROM submissions
                WHERE id = ?1
            ",
        )
        .bind(submission_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Err(StorageError::NotFound);
        };
        map_submission_row(&row)
    }
}
