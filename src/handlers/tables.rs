//! Generic read handler shared by every allow-listed table.

use crate::error::AppError;
use crate::response::{success_data, Envelope};
use crate::state::AppState;
use crate::table::Table;
use axum::Json;
use serde_json::Value;

#[tracing::instrument(name = "read_table", skip_all, fields(table = %table), err)]
pub async fn read_table(state: AppState, table: Table) -> Result<Json<Envelope<Vec<Value>>>, AppError> {
    let rows = state.store.read_table(table).await?;
    Ok(success_data(rows))
}
