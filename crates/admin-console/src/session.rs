//! Admin session state.
//!
//! Authentication state and the registration list live only in memory;
//! nothing persists across a restart of the console. Deletes update the
//! local list optimistically on success instead of re-fetching.

use crate::client::{RegistrationApiClient, RegistrationRow};
use std::collections::HashSet;
use tracing::error;

/// The admin view: login gate, registration list and per-row delete
/// state.
pub struct AdminSession {
    client: RegistrationApiClient,
    token: Option<String>,
    rows: Vec<RegistrationRow>,
    deleting: HashSet<String>,
    error: Option<String>,
}

impl AdminSession {
    pub fn new(client: RegistrationApiClient) -> Self {
        Self {
            client,
            token: None,
            rows: Vec::new(),
            deleting: HashSet::new(),
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn rows(&self) -> &[RegistrationRow] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a delete is in flight for this identifier.
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }

    /// Attempt to log in. On success the registration list is fetched
    /// immediately; on mismatch the error is shown and state stays
    /// unauthenticated.
    pub async fn login(&mut self, password: &str) -> bool {
        match self.client.login(password).await {
            Ok(token) => {
                self.token = Some(token);
                self.error = None;
                self.refresh().await;
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }

    /// Re-fetch the full registration list. Safe to call repeatedly; a
    /// failed fetch keeps the rows already shown.
    pub async fn refresh(&mut self) {
        let Some(token) = self.token.clone() else {
            return;
        };

        match self.client.list(&token).await {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
            }
            Err(e) => {
                error!("Failed to fetch registrations: {}", e);
                self.error = Some("Failed to load registrations".to_string());
            }
        }
    }

    /// Delete one registration. The caller has already confirmed the
    /// action interactively.
    ///
    /// The identifier is marked as deleting for the duration of the
    /// request and unmarked on both paths. On success the row is removed
    /// from the local list without a re-fetch; on failure the list is
    /// left as it was and the error is surfaced.
    pub async fn delete(&mut self, id: &str) -> bool {
        let Some(token) = self.token.clone() else {
            return false;
        };
        if !self.deleting.insert(id.to_string()) {
            // Already in flight for this id
            return false;
        }

        let result = self.client.delete(&token, id).await;
        self.deleting.remove(id);

        match result {
            Ok(()) => {
                self.rows.retain(|row| row.id != id);
                self.error = None;
                true
            }
            Err(e) => {
                error!(registration_id = %id, "Delete failed: {}", e);
                self.error = Some(e.user_message());
                false
            }
        }
    }
}
