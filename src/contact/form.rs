//! Contact form state.
//!
//! The form validates locally, hands the payload to the host exactly once per
//! submission, and keeps the user's input when the relay rejects it.

use crate::domain::{PortfolioError, Result};
use crate::timing::{ChangeNotifier, SubscriptionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One input of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Name of the field in the posted JSON body.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Posted body: `{name, email, subject, message}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Checks that every field is filled and the email looks deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidField`] for the first offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use portfolio::contact::ContactFields;
    ///
    /// let mut fields = ContactFields {
    ///     name: "Ada".into(),
    ///     email: "ada@example".into(),
    ///     subject: "Hi".into(),
    ///     message: "Hello".into(),
    /// };
    /// assert!(fields.validate().is_err());
    /// fields.email = "ada@example.org".into();
    /// assert!(fields.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        for field in Field::ALL {
            if self.get(field).trim().is_empty() {
                return Err(PortfolioError::InvalidField {
                    field: field.key(),
                    reason: "must not be empty",
                });
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(PortfolioError::InvalidField {
                field: Field::Email.key(),
                reason: "must be an address like name@example.com",
            });
        }

        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .split_once('.')
        .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

impl SubmissionStatus {
    /// Inline message shown under the form.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Pending => Some("Sending..."),
            Self::Success => Some(
                "Thank you! Your message has been sent successfully. I'll get back to you soon.",
            ),
            Self::Error => Some(
                "Sorry, there was an error sending your message. Please try again or contact me directly.",
            ),
        }
    }
}

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Ignored,
    /// Validation failed; nothing is sent.
    Invalid(Field),
    /// Post this payload.
    Send(ContactFields),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSnapshot {
    pub fields: ContactFields,
    pub status: SubmissionStatus,
    pub invalid_field: Option<Field>,
    /// Inputs and the submit button are disabled while pending.
    pub inputs_enabled: bool,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    fields: ContactFields,
    status: SubmissionStatus,
    invalid_field: Option<Field>,
    notifier: ChangeNotifier<ContactSnapshot>,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    #[must_use]
    pub const fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Updates one input. Ignored while a submission is pending.
    pub fn set_field(&mut self, field: Field, value: &str) -> bool {
        if self.status == SubmissionStatus::Pending {
            return false;
        }
        value.clone_into(self.fields.slot(field));
        if self.invalid_field == Some(field) {
            self.invalid_field = None;
        }
        self.emit();
        true
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.status == SubmissionStatus::Pending {
            tracing::debug!("submission already pending, ignoring submit");
            return SubmitOutcome::Ignored;
        }

        if let Err(err) = self.fields.validate() {
            tracing::debug!(error = %err, "contact form rejected locally");
            let field = match err {
                PortfolioError::InvalidField { field, .. } => {
                    Field::ALL.into_iter().find(|f| f.key() == field)
                }
                _ => None,
            }
            .unwrap_or(Field::Email);
            self.invalid_field = Some(field);
            self.emit();
            return SubmitOutcome::Invalid(field);
        }

        self.invalid_field = None;
        self.status = SubmissionStatus::Pending;
        self.emit();
        SubmitOutcome::Send(self.fields.clone())
    }

    /// Applies the relay's answer. Ignored unless a submission is pending.
    pub fn resolve(&mut self, outcome: &Result<()>) -> bool {
        if self.status != SubmissionStatus::Pending {
            return false;
        }

        match outcome {
            Ok(()) => {
                tracing::info!("contact submission delivered");
                self.status = SubmissionStatus::Success;
                self.fields = ContactFields::default();
            }
            Err(err) => {
                tracing::warn!(error = %err, "contact submission failed");
                self.status = SubmissionStatus::Error;
            }
        }
        self.emit();
        true
    }

    #[must_use]
    pub fn current_state(&self) -> ContactSnapshot {
        ContactSnapshot {
            fields: self.fields.clone(),
            status: self.status,
            invalid_field: self.invalid_field,
            inputs_enabled: self.status != SubmissionStatus::Pending,
        }
    }

    pub fn on_change(&mut self, listener: impl FnMut(&ContactSnapshot) + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    fn emit(&mut self) {
        if self.notifier.is_empty() {
            return;
        }
        let snapshot = self.current_state();
        self.notifier.notify(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(Field::Name, "Ada Lovelace");
        form.set_field(Field::Email, "ada@example.org");
        form.set_field(Field::Subject, "Engines");
        form.set_field(Field::Message, "Let's talk.");
        form
    }

    #[test]
    fn second_submit_while_pending_is_ignored() {
        let mut form = filled();
        assert!(matches!(form.submit(), SubmitOutcome::Send(_)));
        assert_eq!(form.submit(), SubmitOutcome::Ignored);
        assert_eq!(form.status(), SubmissionStatus::Pending);
    }

    #[test]
    fn fields_are_locked_while_pending() {
        let mut form = filled();
        form.submit();
        assert!(!form.set_field(Field::Name, "Someone else"));
        assert_eq!(form.fields().name, "Ada Lovelace");
        assert!(!form.current_state().inputs_enabled);
    }

    #[test]
    fn success_clears_fields() {
        let mut form = filled();
        form.submit();
        assert!(form.resolve(&Ok(())));
        assert_eq!(form.status(), SubmissionStatus::Success);
        assert_eq!(form.fields(), &ContactFields::default());
    }

    #[test]
    fn error_keeps_fields_and_allows_resubmit() {
        let mut form = filled();
        let before = form.fields().clone();
        form.submit();
        assert!(form.resolve(&Err(PortfolioError::HttpStatus(500))));
        assert_eq!(form.status(), SubmissionStatus::Error);
        assert_eq!(form.fields(), &before);
        assert_eq!(form.submit(), SubmitOutcome::Send(before));
    }

    #[test]
    fn resolution_without_pending_submission_is_ignored() {
        let mut form = filled();
        assert!(!form.resolve(&Ok(())));
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(form.fields().name, "Ada Lovelace");
    }

    #[test]
    fn invalid_email_is_reported_and_nothing_is_sent() {
        let mut form = filled();
        form.set_field(Field::Email, "not-an-address");
        assert_eq!(form.submit(), SubmitOutcome::Invalid(Field::Email));
        assert_eq!(form.status(), SubmissionStatus::Idle);

        form.set_field(Field::Email, "ada@example.org");
        assert_eq!(form.current_state().invalid_field, None);
    }

    #[test]
    fn blank_field_is_reported_by_name() {
        let mut form = filled();
        form.set_field(Field::Subject, "   ");
        assert_eq!(form.submit(), SubmitOutcome::Invalid(Field::Subject));
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@.co"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a b@c.d"));
        assert!(!looks_like_email("a@b@c.d"));
    }
}
