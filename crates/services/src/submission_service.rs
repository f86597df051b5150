use std::sync::Arc;

use neuropath_core::model::{
    EmailAddress, FormFields, NewSubmission, Submission, SubmissionId, SubmissionKind,
};
use storage::repository::SubmissionRepository;

use crate::Clock;
use crate::error::SubmissionServiceError;

/// Confirmation returned once a form has been saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub kind: SubmissionKind,
    /// Thank-you text to show in place of the form.
    pub message: &'static str,
}

/// Validates form input and appends it to the submission store.
#[derive(Clone)]
pub struct SubmissionService {
    clock: Clock,
    submissions: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    #[must_use]
    pub fn new(clock: Clock, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { clock, submissions }
    }

    /// Save a waitlist signup.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionServiceError::Invalid` for malformed fields.
    /// Returns `SubmissionServiceError::Storage` if persistence fails.
    pub async fn submit_waitlist<I, K, V>(
        &self,
        fields: I,
    ) -> Result<SubmissionReceipt, SubmissionServiceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.submit_form(SubmissionKind::Waitlist, fields).await
    }

    /// Save contact-page feedback.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionServiceError::Invalid` for malformed fields.
    /// Returns `SubmissionServiceError::Storage` if persistence fails.
    pub async fn submit_feedback<I, K, V>(
        &self,
        fields: I,
    ) -> Result<SubmissionReceipt, SubmissionServiceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.submit_form(SubmissionKind::Feedback, fields).await
    }

    /// Save an arbitrary form of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionServiceError::Invalid` for malformed fields.
    /// Returns `SubmissionServiceError::Storage` if persistence fails.
    pub async fn submit_form<I, K, V>(
        &self,
        kind: SubmissionKind,
        fields: I,
    ) -> Result<SubmissionReceipt, SubmissionServiceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = FormFields::from_pairs(fields).inspect_err(|err| {
            log::warn!("rejected {kind} submission: {err}");
        })?;
        self.store(NewSubmission::new(kind, fields, self.clock.now()))
            .await
    }

    /// Save the email captured after the quiz, together with the style title.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionServiceError::Invalid` for a malformed email.
    /// Returns `SubmissionServiceError::Storage` if persistence fails.
    pub async fn submit_lesson_unlock(
        &self,
        email: &str,
        style: &str,
    ) -> Result<SubmissionReceipt, SubmissionServiceError> {
        let email = EmailAddress::parse(email).inspect_err(|err| {
            log::warn!("rejected lesson unlock: {err}");
        })?;
        self.store(NewSubmission::lesson_unlock(&email, style, self.clock.now()))
            .await
    }

    /// All stored submissions of `kind`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionServiceError::Storage` if repository access fails.
    pub async fn list(
        &self,
        kind: SubmissionKind,
    ) -> Result<Vec<Submission>, SubmissionServiceError> {
        Ok(self.submissions.list(kind).await?)
    }

    /// Number of stored submissions of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionServiceError::Storage` if repository access fails.
    pub async fn count(&self, kind: SubmissionKind) -> Result<u64, SubmissionServiceError> {
        Ok(self.submissions.count(kind).await?)
    }

    async fn store(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionReceipt, SubmissionServiceError> {
        let kind = submission.kind;
        let id = self.submissions.append(&submission).await?;
        log::info!("stored {kind} submission {id}");
        Ok(SubmissionReceipt {
            id,
            kind,
            message: kind.thank_you(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuropath_core::model::SubmissionError;
    use neuropath_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn service() -> SubmissionService {
        SubmissionService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn waitlist_signup_is_stored_with_thank_you() {
        let svc = service();
        let receipt = svc
            .submit_waitlist([("name", "Ada"), ("email", "ada@example.com")])
            .await
            .unwrap();

        assert_eq!(receipt.kind, SubmissionKind::Waitlist);
        assert_eq!(
            receipt.message,
            "Thank you for joining the NeuroPath waitlist! We will be in touch soon."
        );

        let stored = svc.list(SubmissionKind::Waitlist).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, receipt.id);
        assert_eq!(stored[0].submitted_at, fixed_now());
    }

    #[tokio::test]
    async fn feedback_with_bad_email_is_rejected_and_not_stored() {
        let svc = service();
        let err = svc
            .submit_feedback([("email", "not-an-email"), ("message", "hi")])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionServiceError::Invalid(SubmissionError::InvalidEmail(_))
        ));
        assert_eq!(svc.count(SubmissionKind::Feedback).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn lesson_unlock_requires_email() {
        let svc = service();
        let err = svc.submit_lesson_unlock("  ", "Visual learner").await.unwrap_err();
        assert!(matches!(
            err,
            SubmissionServiceError::Invalid(SubmissionError::EmptyEmail)
        ));

        let receipt = svc
            .submit_lesson_unlock("ada@example.com", "Visual learner")
            .await
            .unwrap();
        assert_eq!(receipt.kind, SubmissionKind::LessonUnlock);
        assert_eq!(svc.count(SubmissionKind::LessonUnlock).await.unwrap(), 1);
    }
}
