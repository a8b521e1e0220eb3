//! Registration form state.
//!
//! Mirrors the public form's behavior: local validation runs before any
//! network call, a successful submission resets the fields to their
//! empty defaults and shows a transient success notice, and a failed
//! submission keeps the fields and shows a categorized message.

use crate::client::{RegistrationApiClient, RegistrationSubmission};
use std::time::{Duration, Instant};
use tracing::warn;

/// How long the success notice stays visible.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Transient success notice with a fixed display window.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Notice {
    fn new(message: String, ttl: Duration) -> Self {
        Self {
            message,
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the notice is still within its display window at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) < self.ttl
    }
}

/// Editable registration form.
#[derive(Debug)]
pub struct RegistrationFormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub event: String,
    pub shirt_size: String,
    pub agree_to_terms: bool,

    notice: Option<Notice>,
    error: Option<String>,
    notice_ttl: Duration,
}

impl Default for RegistrationFormState {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            event: String::new(),
            shirt_size: String::new(),
            agree_to_terms: false,
            notice: None,
            error: None,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}

impl RegistrationFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the success-notice display window.
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// Reset every field to its empty default.
    pub fn reset(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
        self.event.clear();
        self.shirt_size.clear();
        self.agree_to_terms = false;
    }

    /// The success notice, if it is still within its display window.
    pub fn notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| n.is_visible(Instant::now()))
            .map(Notice::message)
    }

    /// The current inline error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the form.
    ///
    /// Local validation failures never reach the network. On success the
    /// fields reset and the notice is armed; on failure the fields are
    /// kept so the user can correct and resubmit.
    pub async fn submit(&mut self, client: &RegistrationApiClient) -> bool {
        self.error = None;

        if !self.agree_to_terms {
            self.error = Some("You must agree to the terms and conditions".to_string());
            return false;
        }
        if self.event.is_empty() {
            self.error = Some("Choose an event".to_string());
            return false;
        }

        let submission = RegistrationSubmission {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            event: self.event.clone(),
            shirt_size: self.shirt_size.clone(),
            agree_to_terms: true,
        };

        match client.submit(&submission).await {
            Ok(ack) => {
                self.reset();
                self.notice = Some(Notice::new(
                    format!("{} Your registration fee is ${}.", ack.message, ack.event_fee),
                    self.notice_ttl,
                ));
                true
            }
            Err(e) => {
                warn!("Registration submission failed: {}", e);
                self.error = Some(e.user_message());
                false
            }
        }
    }
}
