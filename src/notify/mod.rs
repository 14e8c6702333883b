// src/notify/mod.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// A fully rendered notification, ready for delivery. Computed once after
/// the scan; a failing send never alters it.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub subject: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
    pub html_body: String,
}

/// Delivery boundary. The engine only ever sees this trait; what sits
/// behind it (webhook, SMTP bridge, log line) is the host's business.
pub trait Transport {
    fn send(&self, message: &OutboundMessage) -> Result<()>;
}

/// Posts the message as JSON to a mail-relay webhook.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("building HTTP client for mail webhook")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, message: &OutboundMessage) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(message)
            .send()
            .with_context(|| format!("posting alert mail to {}", self.endpoint))?;
        response
            .error_for_status()
            .with_context(|| format!("mail webhook {} rejected the message", self.endpoint))?;
        info!(recipients = message.to.len(), "alert mail accepted");
        Ok(())
    }
}

/// Logs instead of delivering. Used for dry runs and when no endpoint is
/// configured.
pub struct LogTransport;

impl Transport for LogTransport {
    fn send(&self, message: &OutboundMessage) -> Result<()> {
        info!(
            subject = %message.subject,
            recipients = message.to.len(),
            bcc = message.bcc.len(),
            body_bytes = message.html_body.len(),
            "dry run; message not sent"
        );
        Ok(())
    }
}
