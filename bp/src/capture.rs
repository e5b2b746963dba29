//! Email capture side task
//!
//! Submitting an email never blocks or fails plan generation. The POST runs on
//! its own task and the caller only waits for it, bounded by a grace period,
//! after the document has been written.

use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CaptureConfig;

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Errors from a capture request
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Capture endpoint returned {status}")]
    Status { status: u16 },
}

/// Final state of a capture after `finish`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Delivered,
    Failed,
    TimedOut,
}

#[derive(Debug, Serialize)]
struct CapturePayload<'a> {
    email: &'a str,
    timestamp: String,
    source: &'a str,
}

/// Check an address against the capture form's pattern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Client for the email capture endpoint
pub struct EmailCapture {
    endpoint: Option<String>,
    source: String,
    http: Client,
}

impl EmailCapture {
    pub fn new(config: &CaptureConfig) -> Result<Self, CaptureError> {
        debug!(?config, "EmailCapture::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            source: config.source.clone(),
            http,
        })
    }

    /// Start a capture request in the background
    ///
    /// Returns `None` when the address is malformed or no endpoint is configured.
    pub fn submit(&self, email: &str) -> Option<CaptureHandle> {
        let email = email.trim();
        debug!(%email, "submit: called");

        if !is_valid_email(email) {
            warn!(%email, "Email capture skipped: invalid address");
            return None;
        }

        let Some(endpoint) = self.endpoint.clone() else {
            warn!("Email capture skipped: no capture endpoint configured");
            return None;
        };

        let http = self.http.clone();
        let email = email.to_string();
        let source = self.source.clone();

        let task = tokio::spawn(async move {
            let payload = CapturePayload {
                email: &email,
                timestamp: chrono::Utc::now().to_rfc3339(),
                source: &source,
            };
            debug!(%endpoint, "submit: posting capture");
            let response = http.post(&endpoint).json(&payload).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CaptureError::Status {
                    status: status.as_u16(),
                });
            }
            Ok(())
        });

        Some(CaptureHandle { task })
    }
}

/// In-flight capture request
pub struct CaptureHandle {
    task: JoinHandle<Result<(), CaptureError>>,
}

impl CaptureHandle {
    /// Wait at most `grace` for the request, then abandon it
    pub async fn finish(self, grace: Duration) -> CaptureOutcome {
        debug!(?grace, "finish: called");
        let abort = self.task.abort_handle();

        match tokio::time::timeout(grace, self.task).await {
            Ok(Ok(Ok(()))) => {
                info!("Email captured");
                CaptureOutcome::Delivered
            }
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "Email capture failed");
                CaptureOutcome::Failed
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Email capture task did not complete");
                CaptureOutcome::Failed
            }
            Err(_) => {
                warn!(?grace, "Email capture still pending, abandoning");
                abort.abort();
                CaptureOutcome::TimedOut
            }
        }
    }
}
