//! Booking and contact submissions.
//!
//! Handlers validate the form and pass it to a `Submitter`. The default
//! `LoggingSubmitter` records the request in the service log, addressed to
//! the shop's mailbox; nothing is stored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub mod handlers;
pub mod models;

use models::{BookingKind, Submission};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    /// Returned by `Submitter`s that forward to a mailbox or CRM when the
    /// hand-off fails. `LoggingSubmitter` cannot fail this way.
    #[allow(dead_code)]
    #[error("delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAck {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub message: String,
}

/// Carried in `AppState` as `Arc<dyn Submitter>`.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, submission: &Submission) -> Result<SubmissionAck, SubmissionError>;
}

pub struct LoggingSubmitter {
    recipient: String,
}

impl LoggingSubmitter {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    fn confirmation(&self, submission: &Submission) -> String {
        match submission {
            Submission::Booking(_) => format!(
                "Uspešno poslato na {}! Proverite Vaš telefon - uskoro Vam stiže Viber potvrda i prvi status servisa.",
                self.recipient
            ),
            Submission::Contact(_) => format!(
                "Upit je uspešno prosleđen na {}! Javićemo Vam se u najkraćem roku putem telefona ili Vibera.",
                self.recipient
            ),
        }
    }
}

#[async_trait]
impl Submitter for LoggingSubmitter {
    async fn submit(&self, submission: &Submission) -> Result<SubmissionAck, SubmissionError> {
        submission.validate()?;

        let id = Uuid::new_v4();
        match submission {
            Submission::Booking(b) => info!(
                submission_id = %id,
                recipient = %self.recipient,
                home_visit = (b.kind == BookingKind::Visit),
                "Booking from {} for {} {}: {}",
                b.name,
                b.date,
                b.time,
                b.problem_summary
            ),
            Submission::Contact(c) => info!(
                submission_id = %id,
                recipient = %self.recipient,
                "Contact message from {} <{}>",
                c.name,
                c.email
            ),
        }

        Ok(SubmissionAck {
            id,
            received_at: Utc::now(),
            message: self.confirmation(submission),
        })
    }
}
