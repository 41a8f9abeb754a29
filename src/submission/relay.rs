//! Hosted form relay client and the relay-then-mail submitter

use super::{
    mailto_link, subject, summary_text, Delivery, MailLauncher, SubmissionError,
    SubmissionPayload, Submitter, SystemMailLauncher,
};
use crate::config::WizardConfig;
use crate::state::QuoteForm;
use async_trait::async_trait;
use chrono::Local;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use std::time::Duration;

/// Posts payloads as multipart form data to a single endpoint
#[derive(Debug, Clone)]
pub struct FormRelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FormRelayClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `payload`; any non-2xx answer is a failure
    pub async fn post(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        let form = payload
            .fields()
            .iter()
            .fold(Form::new(), |form, (key, value)| form.text(*key, value.clone()));

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::RelayStatus(status.as_u16()));
        }
        Ok(())
    }
}

/// Delivers through the form relay, opening a prefilled mail when it fails
pub struct RelaySubmitter {
    relay: FormRelayClient,
    mail: Option<Box<dyn MailLauncher>>,
    recipient: String,
    cc: Option<String>,
}

impl RelaySubmitter {
    pub fn new(relay: FormRelayClient, recipient: impl Into<String>, cc: Option<String>) -> Self {
        Self {
            relay,
            mail: None,
            recipient: recipient.into(),
            cc,
        }
    }

    pub fn with_mail_fallback(mut self, launcher: Box<dyn MailLauncher>) -> Self {
        self.mail = Some(launcher);
        self
    }

    pub fn from_config(config: &WizardConfig) -> Result<Self, SubmissionError> {
        let relay = FormRelayClient::new(config.relay_url(), config.request_timeout())?;
        let submitter = Self::new(
            relay,
            config.recipient(),
            config.cc().map(str::to_string),
        );
        Ok(if config.mail_fallback() {
            submitter.with_mail_fallback(Box::new(SystemMailLauncher))
        } else {
            submitter
        })
    }

    fn open_mail_client(
        &self,
        mail: &dyn MailLauncher,
        form: &QuoteForm,
    ) -> Result<(), SubmissionError> {
        let link = mailto_link(&self.recipient, &subject(form), &summary_text(form));
        mail.open(&link).map_err(SubmissionError::MailClient)
    }
}

#[async_trait]
impl Submitter for RelaySubmitter {
    async fn submit(&self, form: &QuoteForm) -> Result<Delivery, SubmissionError> {
        let payload = SubmissionPayload::build(form, self.cc.as_deref(), &Local::now());

        let relay_error = match self.relay.post(&payload).await {
            Ok(()) => {
                tracing::info!(endpoint = %self.relay.endpoint(), "quote request delivered");
                return Ok(Delivery::Relay);
            }
            Err(e) => e,
        };
        tracing::warn!(error = %relay_error, "form relay failed");

        let Some(mail) = self.mail.as_deref() else {
            return Err(relay_error);
        };

        match self.open_mail_client(mail, form) {
            Ok(()) => {
                tracing::info!("opened mail client with prefilled quote request");
                Ok(Delivery::MailClientFallback)
            }
            Err(fallback) => {
                tracing::error!(error = %fallback, "mail client fallback failed");
                Err(SubmissionError::AllChannelsFailed {
                    relay: Box::new(relay_error),
                    fallback: Box::new(fallback),
                })
            }
        }
    }
}
