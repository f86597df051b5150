use neuropath_core::model::{FormFields, Submission, SubmissionId, SubmissionKind};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn submission_id_from_i64(v: i64) -> Result<SubmissionId, StorageError> {
    u64::try_from(v)
        .map(SubmissionId::new)
        .map_err(|_| StorageError::Serialization("submission id sign overflow".into()))
}

pub(crate) fn submission_id_to_i64(id: SubmissionId) -> Result<i64, StorageError> {
    i64::try_from(id.value())
        .map_err(|_| StorageError::Serialization("submission id overflow".into()))
}

pub(crate) fn fields_to_json(fields: &FormFields) -> Result<String, StorageError> {
    serde_json::to_string(fields).map_err(ser)
}

pub(crate) fn map_submission_row(row: &sqlx::sqlite::SqliteRow) -> Result<Submission, StorageError> {
    let id = submission_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let kind: SubmissionKind = row
        .try_get::<String, _>("kind")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let fields: FormFields =
        serde_json::from_str(&row.try_get::<String, _>("fields").map_err(ser)?).map_err(ser)?;
    let submitted_at = row.try_get("submitted_at").map_err(ser)?;

    Ok(Submission {
        id,
        kind,
        fields,
        submitted_at,
    })
}
