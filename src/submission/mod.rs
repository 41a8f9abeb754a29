//! Delivery of completed quote requests
//!
//! The wizard only sees [`Submitter`]; [`RelaySubmitter`] is the concrete
//! implementation that posts to a hosted form relay and falls back to the
//! user's mail client.

mod mailto;
mod payload;
mod relay;
mod traits;

pub use mailto::{mailto_link, SystemMailLauncher};
pub use payload::{subject, summary_text, SubmissionPayload};
pub use relay::RelaySubmitter;
pub use traits::{MailLauncher, Submitter};

#[cfg(test)]
pub use traits::{MockMailLauncher, MockSubmitter};

use thiserror::Error;

/// How a successful submission reached its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The form relay accepted the request
    Relay,
    /// The relay failed; a prefilled message was opened in the mail client
    /// and the user still has to send it
    MailClientFallback,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("form relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("form relay answered with status {0}")]
    RelayStatus(u16),
    #[error("mail client could not be opened: {0}")]
    MailClient(#[source] std::io::Error),
    #[error("{relay}; mail fallback also failed: {fallback}")]
    AllChannelsFailed {
        relay: Box<SubmissionError>,
        fallback: Box<SubmissionError>,
    },
    #[error("submission ended without a result")]
    Interrupted,
}
