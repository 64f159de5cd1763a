use crate::error::AppError;
use crate::service::{AppointmentUpdate, NewAppointment};
use crate::table::Table;
use async_trait::async_trait;
use serde_json::Value;

/// Storage operations behind the HTTP surface. Each call is independent and self-contained;
/// multi-statement writes commit together or not at all.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Every row of `table` as a JSON object keyed by column name, in column declaration order.
    async fn read_table(&self, table: Table) -> Result<Vec<Value>, AppError>;

    /// Insert the appointment and its service links; returns the generated id.
    async fn create_appointment(&self, new: &NewAppointment) -> Result<i64, AppError>;

    /// Apply attribute changes and replace the full service set.
    /// `AppError::NotFound` when no appointment has the id.
    async fn update_appointment(&self, update: &AppointmentUpdate) -> Result<(), AppError>;

    /// Remove the appointment and its service links.
    /// `AppError::NotFound` when no appointment has the id.
    async fn delete_appointment(&self, appointment_id: i64) -> Result<(), AppError>;

    /// Cheap round trip used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
