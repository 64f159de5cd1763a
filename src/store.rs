//! PostgreSQL implementation of [`ScheduleStore`]. Every write runs in one transaction; an early
//! return drops the transaction, which rolls it back.

use crate::config::GatewayConfig;
use crate::error::AppError;
use crate::service::{AppointmentUpdate, NewAppointment, ScheduleStore};
use crate::sql::{self, ColumnInfo, QueryBuf};
use crate::table::Table;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};

/// Open the shared pool. Connections are checked out per request and returned on drop.
pub async fn connect(config: &GatewayConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
}

#[derive(Clone)]
pub struct PgScheduleStore {
    pool: PgPool,
}

impl PgScheduleStore {
    pub fn new(pool: PgPool) -> Self {
        PgScheduleStore { pool }
    }
}

async fn appointment_columns(conn: &mut PgConnection) -> Result<Vec<ColumnInfo>, AppError> {
    let rows: Vec<(String, String, String)> = sqlx::query_as(sql::APPOINTMENT_COLUMNS)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(name, type_schema, type_name)| ColumnInfo {
            name,
            type_schema,
            type_name,
        })
        .collect())
}

async fn execute(conn: &mut PgConnection, q: &QueryBuf) -> Result<u64, AppError> {
    tracing::debug!(sql = %q.sql, params = q.params.len(), "execute");
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(p.as_deref());
    }
    Ok(query.execute(&mut *conn).await?.rows_affected())
}

async fn insert_services(conn: &mut PgConnection, appointment_id: i64, services: &[i64]) -> Result<(), AppError> {
    for service_id in services {
        sqlx::query(sql::INSERT_APPOINTMENT_SERVICE)
            .bind(appointment_id)
            .bind(*service_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn delete_services(conn: &mut PgConnection, appointment_id: i64) -> Result<u64, AppError> {
    let done = sqlx::query(sql::DELETE_APPOINTMENT_SERVICES)
        .bind(appointment_id)
        .execute(&mut *conn)
        .await?;
    Ok(done.rows_affected())
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    #[tracing::instrument(skip(self), err)]
    async fn read_table(&self, table: Table) -> Result<Vec<Value>, AppError> {
        let stmt = sql::select_all(table);
        tracing::debug!(sql = %stmt, "query");
        let rows: Vec<Value> = sqlx::query_scalar(&stmt).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    #[tracing::instrument(skip(self, new), fields(services = new.services.len()), err)]
    async fn create_appointment(&self, new: &NewAppointment) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;
        let columns = appointment_columns(&mut tx).await?;
        let q = sql::insert_appointment(&new.attributes, &columns)?;
        tracing::debug!(sql = %q.sql, params = q.params.len(), "insert appointment");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_deref());
        }
        let id = query.fetch_one(&mut *tx).await?;
        insert_services(&mut tx, id, &new.services).await?;
        tx.commit().await?;
        tracing::info!(appointment_id = id, "appointment created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, update), fields(appointment_id = update.appointment_id), err)]
    async fn update_appointment(&self, update: &AppointmentUpdate) -> Result<(), AppError> {
        let id = update.appointment_id;
        let mut tx = self.pool.begin().await?;
        let found: Option<i64> = sqlx::query_scalar(sql::LOCK_APPOINTMENT)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("appointment {}", id)));
        }
        let columns = appointment_columns(&mut tx).await?;
        if let Some(q) = sql::update_appointment(id, &update.attributes, &columns)? {
            execute(&mut tx, &q).await?;
        }
        let removed = delete_services(&mut tx, id).await?;
        insert_services(&mut tx, id, &update.services).await?;
        tx.commit().await?;
        tracing::info!(removed, added = update.services.len(), "appointment updated");
        Ok(())
    }

    #[tracing::instrument(skip(self), err)]
    async fn delete_appointment(&self, appointment_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        delete_services(&mut tx, appointment_id).await?;
        let done = sqlx::query(sql::DELETE_APPOINTMENT)
            .bind(appointment_id)
            .execute(&mut *tx)
            .await?;
        if done.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("appointment {}", appointment_id)));
        }
        tx.commit().await?;
        tracing::info!("appointment deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
