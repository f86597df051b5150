use async_trait::async_trait;
use neuropath_core::model::{NewSubmission, Submission, SubmissionId, SubmissionKind};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Append-only store of form submissions, grouped by kind.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Append a submission and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the submission cannot be stored.
    async fn append(&self, submission: &NewSubmission) -> Result<SubmissionId, StorageError>;

    /// All submissions of `kind`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or a row is malformed.
    async fn list(&self, kind: SubmissionKind) -> Result<Vec<Submission>, StorageError>;

    /// Number of stored submissions of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn count(&self, kind: SubmissionKind) -> Result<u64, StorageError>;

    /// Fetch a single submission by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get(&self, id: SubmissionId) -> Result<Submission, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepository for InMemoryRepository {
    async fn append(&self, submission: &NewSubmission) -> Result<SubmissionId, StorageError> {
        let mut guard = self
            .submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let next = u64::try_from(guard.len())
            .map_err(|_| StorageError::Conflict)?
            .saturating_add(1);
        let id = SubmissionId::new(next);
        guard.push(Submission::from_new(id, submission.clone()));
        Ok(id)
    }

    async fn list(&self, kind: SubmissionKind) -> Result<Vec<Submission>, StorageError> {
        let guard = self
            .submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().filter(|s| s.kind == kind).cloned().collect())
    }

    async fn count(&self, kind: SubmissionKind) -> Result<u64, StorageError> {
        let guard = self
            .submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let count = guard.iter().filter(|s| s.kind == kind).count();
        u64::try_from(count).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn get(&self, id: SubmissionId) -> Result<Submission, StorageError> {
        let guard = self
            .submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub submissions: Arc<dyn SubmissionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let submissions: Arc<dyn SubmissionRepository> = Arc::new(InMemoryRepository::new());
        Self { submissions }
    }
}
