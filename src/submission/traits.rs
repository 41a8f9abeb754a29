//! Trait seams for delivery, enabling mocking in tests

use super::{Delivery, SubmissionError};
use crate::state::QuoteForm;
use async_trait::async_trait;

/// Hands a completed quote request to its destination
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Deliver `form`; resolves once the data is handed off or delivery failed
    async fn submit(&self, form: &QuoteForm) -> Result<Delivery, SubmissionError>;
}

/// Opens a `mailto:` link with the system handler
#[cfg_attr(test, mockall::automock)]
pub trait MailLauncher: Send + Sync {
    fn open(&self, link: &str) -> std::io::Result<()>;
}
