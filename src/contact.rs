//! Contact form state.
//!
//! There is no mail backend: submission waits for [`SUBMIT_DELAY`] and then
//! reports success, and the form clears itself after the confirmation has
//! been shown for [`CONFIRMATION_PERIOD`].

use crate::error::{FolioError, Result};
use std::time::Duration;

pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);
pub const CONFIRMATION_PERIOD: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// A validated copy of the form taken when submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Every field is required and the email needs a `local@domain.tld` shape.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = Field::ALL
            .iter()
            .filter(|f| self.field(**f).trim().is_empty())
            .map(|f| f.label())
            .collect();
        if !missing.is_empty() {
            return Err(FolioError::Validation(format!(
                "required: {}",
                missing.join(", ")
            )));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(FolioError::Validation(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }
        Ok(())
    }

    /// Validate and move to `Submitting`. A form already in flight is
    /// refused.
    pub fn begin_submit(&mut self) -> Result<Submission> {
        if self.status == FormStatus::Submitting {
            return Err(FolioError::Validation("submission already in progress".into()));
        }
        self.validate()?;
        self.status = FormStatus::Submitting;
        Ok(Submission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }

    pub fn finish_submit(&mut self) {
        if self.status == FormStatus::Submitting {
            self.status = FormStatus::Submitted;
        }
    }

    /// Clear all fields and return to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Stand-in for a mail API call: waits `delay`, then accepts the message.
pub async fn simulate_submission(submission: Submission, delay: Duration) -> Submission {
    log::info!(
        "submitting message from {} <{}>",
        submission.name,
        submission.email
    );
    tokio::time::sleep(delay).await;
    log::debug!("simulated submission accepted");
    submission
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(Field::Name, "Ada");
        form.set(Field::Email, "ada@example.com");
        form.set(Field::Subject, "Hello");
        form.set(Field::Message, "Let's build something.");
        form
    }

    #[test]
    fn test_blank_fields_are_listed() {
        let mut form = ContactForm::new();
        form.set(Field::Name, "Ada");
        let err = form.validate().unwrap_err().to_string();
        assert!(err.contains("Email"));
        assert!(err.contains("Message"));
        assert!(!err.contains("Name"));
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.io"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.io"));
        assert!(!looks_like_email("a@@b.io"));
        assert!(!looks_like_email("a b@c.io"));
        assert!(!looks_like_email("plain"));
    }

    #[test]
    fn test_status_machine() {
        let mut form = filled();
        assert_eq!(form.status(), FormStatus::Idle);
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.email, "ada@example.com");
        assert!(form.is_submitting());
        assert!(form.begin_submit().is_err());
        form.finish_submit();
        assert_eq!(form.status(), FormStatus::Submitted);
        form.reset();
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_invalid_form_stays_idle() {
        let mut form = filled();
        form.set(Field::Email, "nope");
        assert!(form.begin_submit().is_err());
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[tokio::test]
    async fn test_simulated_submission_returns_message() {
        let mut form = filled();
        let submission = form.begin_submit().unwrap();
        let accepted = simulate_submission(submission.clone(), Duration::from_millis(5)).await;
        form.finish_submit();
        assert_eq!(accepted, submission);
        assert_eq!(form.status(), FormStatus::Submitted);
    }
}
