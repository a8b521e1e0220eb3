//! HTTP request handlers.

use super::types::{
    DeleteResponse, HealthResponse, LoginRequest, LoginResponse, RegistrationResponse,
    RegistrationRow, RegistrationsResponse,
};
use super::AppState;
use crate::error::ApiError;
use crate::registrations::{build_record, RegistrationForm, REGISTRATIONS_COLLECTION};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registration_count = state.store.count(REGISTRATIONS_COLLECTION).await;

    Json(HealthResponse {
        status: "ok".to_string(),
        registration_count,
    })
}

/// Accept a registration submission from the public form.
///
/// Validation failures reject the submission before any store
/// interaction; the fee comes from the fixed event table, never from
/// client input, and the creation timestamp is stamped by the store.
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let (event, fields) = build_record(&form)?;

    let document = state
        .store
        .create(REGISTRATIONS_COLLECTION, fields)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    info!(
        registration_id = %document.id,
        event = event.key(),
        "Registration stored"
    );

    Ok(Json(RegistrationResponse {
        id: document.id,
        event_fee: event.fee(),
        status: crate::registrations::STATUS_REGISTERED.to_string(),
        message: "Registration successful! See you at the race.".to_string(),
    }))
}

/// Admin login: exact password match mints a session token.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.sessions.login(&request.password).await?;

    Ok(Json(LoginResponse {
        token,
        message: "Authenticated.".to_string(),
    }))
}

/// List every stored registration.
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<RegistrationsResponse>, ApiError> {
    let registrations: Vec<RegistrationRow> = state
        .store
        .list(REGISTRATIONS_COLLECTION)
        .await
        .into_iter()
        .map(|doc| RegistrationRow {
            id: doc.id,
            fields: doc.fields,
        })
        .collect();

    let total = registrations.len();
    Ok(Json(RegistrationsResponse {
        registrations,
        total,
    }))
}

/// Delete a single registration by identifier.
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.store.delete(REGISTRATIONS_COLLECTION, &id).await?;

    info!(registration_id = %id, "Registration deleted");

    Ok(Json(DeleteResponse {
        id,
        message: "Registration deleted.".to_string(),
    }))
}
