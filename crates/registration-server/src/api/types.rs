//! API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response after a registration is stored.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: String,
    pub event_fee: u32,
    pub status: String,
    pub message: String,
}

/// Admin login request.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Admin login response carrying the session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

/// One registration row: the store identifier plus whatever fields the
/// document carries. No schema validation happens on the way out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRow {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// List of stored registrations.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationsResponse {
    pub registrations: Vec<RegistrationRow>,
    pub total: usize,
}

/// Response after a delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub registration_count: usize,
}
