//! Contact form validation and dispatch.
//!
//! Validation is local and synchronous. Delivery goes through a [`ContactSink`];
//! whatever the sink reports is turned into the notification shown to the user.

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

const MAX_NAME_LEN: usize = 100;
const MIN_MESSAGE_LEN: usize = 10;
const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryType {
    JobOpportunity,
    Collaboration,
    Mentorship,
    General,
}

impl InquiryType {
    pub fn key(&self) -> &'static str {
        match self {
            InquiryType::JobOpportunity => "job-opportunity",
            InquiryType::Collaboration => "collaboration",
            InquiryType::Mentorship => "mentorship",
            InquiryType::General => "general",
        }
    }

    pub fn from_key(key: &str) -> Option<InquiryType> {
        [
            InquiryType::JobOpportunity,
            InquiryType::Collaboration,
            InquiryType::Mentorship,
            InquiryType::General,
        ]
        .into_iter()
        .find(|inquiry| inquiry.key() == key)
    }
}

impl fmt::Display for InquiryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw form fields as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Inquiry key; empty means `general`.
    pub inquiry_type: String,
    pub message: String,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub inquiry_type: InquiryType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ContactError {
    #[error("Name is required")]
    MissingName,
    #[error("Name must be at most 100 characters")]
    NameTooLong,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Unknown inquiry type '{0}'")]
    UnknownInquiry(String),
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
    #[error("Message must be at most 2000 characters")]
    MessageTooLong,
    #[error("Failed to deliver message: {0}")]
    Delivery(String),
}

impl ContactForm {
    /// Validates the form, stamping the submission with the current time.
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        self.validate_at(Utc::now())
    }

    /// Validates the form with an explicit timestamp.
    pub fn validate_at(&self, timestamp: DateTime<Utc>) -> Result<ContactSubmission, ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ContactError::NameTooLong);
        }

        let email = self.email.trim();
        if !is_plausible_email(email) {
            return Err(ContactError::InvalidEmail);
        }

        let inquiry_key = self.inquiry_type.trim();
        let inquiry_type = if inquiry_key.is_empty() {
            InquiryType::General
        } else {
            InquiryType::from_key(inquiry_key)
                .ok_or_else(|| ContactError::UnknownInquiry(inquiry_key.to_string()))?
        };

        let message = self.message.trim();
        match message.chars().count() {
            n if n < MIN_MESSAGE_LEN => return Err(ContactError::MessageTooShort),
            n if n > MAX_MESSAGE_LEN => return Err(ContactError::MessageTooLong),
            _ => {}
        }

        Ok(ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            inquiry_type,
            message: message.to_string(),
            timestamp,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Where validated submissions are delivered.
pub trait ContactSink {
    fn deliver(&self, submission: &ContactSubmission) -> Result<(), ContactError>;
}

/// Sink that records submissions in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ContactSink for LogSink {
    fn deliver(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            inquiry = %submission.inquiry_type,
            at = %submission.timestamp.to_rfc3339(),
            "contact submission received"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast shown after a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

/// Validates `form` and hands it to `sink`.
pub fn submit(form: &ContactForm, sink: &dyn ContactSink) -> Notification {
    let result = form
        .validate()
        .and_then(|submission| sink.deliver(&submission));

    match result {
        Ok(()) => Notification {
            kind: NotificationKind::Success,
            title: "Message sent!".to_string(),
            description: "Thank you for reaching out. I'll get back to you soon.".to_string(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "contact submission rejected");
            Notification {
                kind: NotificationKind::Error,
                title: "Something went wrong".to_string(),
                description: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn form() -> ContactForm {
        ContactForm {
            name: "  Dana Reyes ".to_string(),
            email: "dana@example.org".to_string(),
            inquiry_type: "job-opportunity".to_string(),
            message: "We have an opening on our SOC team.".to_string(),
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        received: RefCell<Vec<ContactSubmission>>,
    }

    impl ContactSink for RecordingSink {
        fn deliver(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
            self.received.borrow_mut().push(submission.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl ContactSink for FailingSink {
        fn deliver(&self, _: &ContactSubmission) -> Result<(), ContactError> {
            Err(ContactError::Delivery("endpoint unreachable".to_string()))
        }
    }

    #[test]
    fn test_valid_form() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let submission = form().validate_at(at).unwrap();
        assert_eq!(submission.name, "Dana Reyes");
        assert_eq!(submission.inquiry_type, InquiryType::JobOpportunity);
        assert_eq!(submission.timestamp, at);
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (ContactForm { name: " ".into(), ..form() }, ContactError::MissingName),
            (ContactForm { name: "x".repeat(101), ..form() }, ContactError::NameTooLong),
            (ContactForm { email: "dana.example.org".into(), ..form() }, ContactError::InvalidEmail),
            (ContactForm { email: "dana@localhost".into(), ..form() }, ContactError::InvalidEmail),
            (ContactForm { email: "da na@example.org".into(), ..form() }, ContactError::InvalidEmail),
            (
                ContactForm { inquiry_type: "sales".into(), ..form() },
                ContactError::UnknownInquiry("sales".into()),
            ),
            (ContactForm { message: "hi".into(), ..form() }, ContactError::MessageTooShort),
            (ContactForm { message: "x".repeat(2001), ..form() }, ContactError::MessageTooLong),
        ];
        for (input, expected) in cases {
            assert_eq!(input.validate(), Err(expected));
        }
    }

    #[test]
    fn test_empty_inquiry_is_general() {
        let submission = ContactForm {
            inquiry_type: String::new(),
            ..form()
        }
        .validate()
        .unwrap();
        assert_eq!(submission.inquiry_type, InquiryType::General);
    }

    #[test]
    fn test_submit_delivers_and_notifies() {
        let sink = RecordingSink::default();
        let notification = submit(&form(), &sink);
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(sink.received.borrow().len(), 1);

        let rejected = submit(&ContactForm::default(), &sink);
        assert_eq!(rejected.kind, NotificationKind::Error);
        assert_eq!(rejected.description, "Name is required");
        assert_eq!(sink.received.borrow().len(), 1);
    }

    #[test]
    fn test_delivery_failure_is_reported() {
        let notification = submit(&form(), &FailingSink);
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(notification.description.contains("endpoint unreachable"));
        assert_eq!(submit(&form(), &LogSink).kind, NotificationKind::Success);
    }
}
