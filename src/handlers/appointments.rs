//! Appointment write handlers: create, update, delete. Bodies arrive as raw JSON and are validated
//! into typed payloads before the store is touched.

use crate::error::AppError;
use crate::response::{success_data, success_empty, CreatedId, Envelope};
use crate::service::{AppointmentRef, AppointmentUpdate, NewAppointment};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::Value;

/// Body rejections keep the gateway envelope: oversized bodies are 413, anything else malformed is 400.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v).map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::Validation(format!("invalid JSON body: {}", e.body_text()))
        }
    })
}

#[tracing::instrument(name = "create_appointment", skip_all, err)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<CreatedId>>, AppError> {
    let payload = NewAppointment::from_body(json_body(body)?)?;
    let id = state.store.create_appointment(&payload).await?;
    Ok(success_data(CreatedId { id }))
}

#[tracing::instrument(name = "update_appointment", skip_all, err)]
pub async fn update(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let payload = AppointmentUpdate::from_body(json_body(body)?)?;
    state.store.update_appointment(&payload).await?;
    Ok(success_empty())
}

#[tracing::instrument(name = "delete_appointment", skip_all, err)]
pub async fn delete(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<()>>, AppError> {
    let target = AppointmentRef::from_body(json_body(body)?)?;
    state.store.delete_appointment(target.appointment_id).await?;
    Ok(success_empty())
}
