use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::SubmissionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("form has no fields")]
    NoFields,

    #[error("form field name cannot be empty")]
    EmptyFieldName,

    #[error("email address cannot be empty")]
    EmptyEmail,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("unknown submission kind: {0:?}")]
    UnknownKind(String),
}

//
// ─── KIND ─────────────────────────────────────────────────────────────────────
//

/// Which form produced a submission. Each kind is stored under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    /// Waitlist signup.
    Waitlist,
    /// Contact-page feedback.
    Feedback,
    /// Email captured after the quiz to unlock a personalized lesson.
    LessonUnlock,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 3] = [
        SubmissionKind::Waitlist,
        SubmissionKind::Feedback,
        SubmissionKind::LessonUnlock,
    ];

    /// Storage key, e.g. `waitlist`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SubmissionKind::Waitlist => "waitlist",
            SubmissionKind::Feedback => "feedback",
            SubmissionKind::LessonUnlock => "lesson_unlock",
        }
    }

    /// Message shown once a submission of this kind has been saved.
    #[must_use]
    pub fn thank_you(self) -> &'static str {
        match self {
            SubmissionKind::Waitlist => {
                "Thank you for joining the NeuroPath waitlist! We will be in touch soon."
            }
            SubmissionKind::Feedback => "Thank you for your feedback! We appreciate your input.",
            SubmissionKind::LessonUnlock => {
                "Thanks! We will notify you when your personalized lesson is ready."
            }
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SubmissionKind {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SubmissionKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SubmissionError::UnknownKind(s.to_string()))
    }
}

//
// ─── EMAIL ────────────────────────────────────────────────────────────────────
//

/// Validated email address (trimmed, `local@domain.tld` shape).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and validate an email address.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::EmptyEmail` for blank input and
    /// `SubmissionError::InvalidEmail` when the shape is wrong.
    pub fn parse(value: impl Into<String>) -> Result<Self, SubmissionError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SubmissionError::EmptyEmail);
        }
        if !looks_like_email(trimmed) {
            return Err(SubmissionError::InvalidEmail(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

impl TryFrom<String> for EmailAddress {
    type Error = SubmissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── FORM FIELDS ──────────────────────────────────────────────────────────────
//

/// Name → value pairs of a submitted form, in the order the form sent them.
///
/// A later field with the same name replaces the earlier value but keeps the
/// first field's position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(IndexMap<String, String>);

impl FormFields {
    /// Field that, when present, must hold a valid email address.
    pub const EMAIL: &'static str = "email";

    /// Build validated form fields from raw pairs.
    ///
    /// Names and values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::NoFields` for an empty form,
    /// `SubmissionError::EmptyFieldName` for a blank name, and the email
    /// errors when an `email` field is present but malformed.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, SubmissionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = IndexMap::new();
        for (name, value) in pairs {
            let name = name.into();
            let name = name.trim();
            if name.is_empty() {
                return Err(SubmissionError::EmptyFieldName);
            }
            fields.insert(name.to_string(), value.into().trim().to_string());
        }
        if fields.is_empty() {
            return Err(SubmissionError::NoFields);
        }
        if let Some(email) = fields.get(Self::EMAIL) {
            let parsed = EmailAddress::parse(email.as_str())?;
            fields.insert(Self::EMAIL.to_string(), parsed.into());
        }
        Ok(Self(fields))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

//
// ─── SUBMISSION ───────────────────────────────────────────────────────────────
//

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub kind: SubmissionKind,
    pub fields: FormFields,
    pub submitted_at: DateTime<Utc>,
}

impl NewSubmission {
    #[must_use]
    pub fn new(kind: SubmissionKind, fields: FormFields, submitted_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            fields,
            submitted_at,
        }
    }

    /// Lesson-unlock request carrying the email and the resolved style title.
    #[must_use]
    pub fn lesson_unlock(email: &EmailAddress, style: &str, submitted_at: DateTime<Utc>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(FormFields::EMAIL.to_string(), email.as_str().to_string());
        fields.insert("style".to_string(), style.to_string());
        Self::new(SubmissionKind::LessonUnlock, FormFields(fields), submitted_at)
    }
}

/// A stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub kind: SubmissionKind,
    pub fields: FormFields,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    #[must_use]
    pub fn from_new(id: SubmissionId, new: NewSubmission) -> Self {
        Self {
            id,
            kind: new.kind,
            fields: new.fields,
            submitted_at: new.submitted_at,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn email_validation() {
        assert!(EmailAddress::parse(" ada@example.com ").is_ok());
        assert_eq!(
            EmailAddress::parse("   ").unwrap_err(),
            SubmissionError::EmptyEmail
        );
        for bad in ["ada", "@example.com", "ada@example", "ada@.com", "ada@x.", "a@b@c.d", "a b@c.d"] {
            assert!(
                matches!(EmailAddress::parse(bad), Err(SubmissionError::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn fields_are_trimmed_and_last_value_wins() {
        let fields = FormFields::from_pairs([
            (" name ", " Ada "),
            ("name", "Grace"),
            ("email", " grace@example.com "),
        ])
        .unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("name"), Some("Grace"));
        assert_eq!(fields.get("email"), Some("grace@example.com"));
    }

    #[test]
    fn fields_reject_empty_form_and_blank_names() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(FormFields::from_pairs(empty).unwrap_err(), SubmissionError::NoFields);
        assert_eq!(
            FormFields::from_pairs([(" ", "x")]).unwrap_err(),
            SubmissionError::EmptyFieldName
        );
    }

    #[test]
    fn fields_validate_email_when_present() {
        let err = FormFields::from_pairs([("email", "nope")]).unwrap_err();
        assert!(matches!(err, SubmissionError::InvalidEmail(_)));
    }

    #[test]
    fn kind_keys_round_trip() {
        for kind in SubmissionKind::ALL {
            assert_eq!(kind.key().parse::<SubmissionKind>().unwrap(), kind);
        }
        assert!("newsletter".parse::<SubmissionKind>().is_err());
    }

    #[test]
    fn lesson_unlock_records_email_and_style() {
        let email = EmailAddress::parse("ada@example.com").unwrap();
        let new = NewSubmission::lesson_unlock(&email, "Visual learner", fixed_now());
        assert_eq!(new.kind, SubmissionKind::LessonUnlock);
        assert_eq!(new.fields.get("email"), Some("ada@example.com"));
        assert_eq!(new.fields.get("style"), Some("Visual learner"));
    }

    #[test]
    fn fields_serialize_in_submitted_order() {
        let fields = FormFields::from_pairs([
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("message", "hi"),
        ])
        .unwrap();
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Ada","email":"ada@example.com","message":"hi"}"#
        );

        let back: FormFields = serde_json::from_str(&json).unwrap();
        let names: Vec<&str> = back.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["name", "email", "message"]);
    }

    #[test]
    fn repeated_field_keeps_first_position() {
        let fields =
            FormFields::from_pairs([("topic", "a"), ("name", "Ada"), ("topic", "b")]).unwrap();
        let pairs: Vec<(&str, &str)> = fields.iter().collect();
        assert_eq!(pairs, [("topic", "b"), ("name", "Ada")]);
    }
}
