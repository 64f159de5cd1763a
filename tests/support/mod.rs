#![allow(dead_code)]

//! In-memory `ScheduleStore` with the same observable behaviour as the PostgreSQL store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use schedule_gateway::service::{AppointmentUpdate, NewAppointment};
use schedule_gateway::{app, AppError, AppState, ScheduleStore, Table};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const APPOINTMENT_COLUMNS: &[&str] = &["id", "client_id", "user_id", "start_time", "end_time"];

#[derive(Default)]
struct Inner {
    rows: HashMap<Table, Vec<Map<String, Value>>>,
    next_id: i64,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn seeded() -> Self {
        let store = MemoryStore::default();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.next_id = 1;
            inner.rows.insert(
                Table::Users,
                vec![obj(json!({ "id": 1, "name": "Dana" }))],
            );
            inner.rows.insert(
                Table::Clients,
                vec![
                    obj(json!({ "id": 3, "name": "Ari", "phone": "555-0100" })),
                    obj(json!({ "id": 4, "name": "Bo", "phone": null })),
                ],
            );
            inner.rows.insert(
                Table::Services,
                vec![
                    obj(json!({ "id": 1, "name": "Cut", "minutes": 30 })),
                    obj(json!({ "id": 2, "name": "Color", "minutes": 60 })),
                ],
            );
        }
        store
    }

    /// Every call fails as if the database were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().unwrap().failing = failing;
    }

    pub fn rows(&self, table: Table) -> Vec<Map<String, Value>> {
        self.inner.lock().unwrap().rows.get(&table).cloned().unwrap_or_default()
    }

    /// Service ids linked to an appointment, in insertion order.
    pub fn links(&self, appointment_id: i64) -> Vec<i64> {
        self.rows(Table::AppointmentServices)
            .iter()
            .filter(|r| r["appointment_id"] == json!(appointment_id))
            .filter_map(|r| r["service_id"].as_i64())
            .collect()
    }

    pub fn router(&self) -> Router {
        let config = schedule_gateway::config::load_with(|_| None).unwrap();
        app(AppState::new(self.clone()), &config)
    }
}

fn obj(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => unreachable!(),
    }
}

fn storage_down() -> AppError {
    AppError::Storage(sqlx::Error::PoolTimedOut)
}

fn check_columns(attrs: &[schedule_gateway::service::Attribute]) -> Result<(), AppError> {
    for a in attrs {
        if !APPOINTMENT_COLUMNS.contains(&a.name.as_str()) {
            return Err(AppError::Validation(format!("unknown appointments column '{}'", a.name)));
        }
    }
    Ok(())
}

fn link(appointment_id: i64, service_id: i64) -> Map<String, Value> {
    obj(json!({ "appointment_id": appointment_id, "service_id": service_id }))
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn read_table(&self, table: Table) -> Result<Vec<Value>, AppError> {
        if self.inner.lock().unwrap().failing {
            return Err(storage_down());
        }
        Ok(self.rows(table).into_iter().map(Value::Object).collect())
    }

    async fn create_appointment(&self, new: &NewAppointment) -> Result<i64, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing {
            return Err(storage_down());
        }
        check_columns(&new.attributes)?;
        let id = inner.next_id;
        inner.next_id += 1;
        let mut row = Map::new();
        for c in APPOINTMENT_COLUMNS {
            row.insert(c.to_string(), Value::Null);
        }
        row.insert("id".into(), json!(id));
        for a in &new.attributes {
            row.insert(a.name.clone(), json!(a.value));
        }
        inner.rows.entry(Table::Appointments).or_default().push(row);
        let links = inner.rows.entry(Table::AppointmentServices).or_default();
        links.extend(new.services.iter().map(|s| link(id, *s)));
        Ok(id)
    }

    async fn update_appointment(&self, update: &AppointmentUpdate) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing {
            return Err(storage_down());
        }
        let id = update.appointment_id;
        let appointments = inner.rows.entry(Table::Appointments).or_default();
        let Some(row) = appointments.iter_mut().find(|r| r["id"] == json!(id)) else {
            return Err(AppError::NotFound(format!("appointment {}", id)));
        };
        check_columns(&update.attributes)?;
        for a in &update.attributes {
            row.insert(a.name.clone(), json!(a.value));
        }
        let links = inner.rows.entry(Table::AppointmentServices).or_default();
        links.retain(|r| r["appointment_id"] != json!(id));
        links.extend(update.services.iter().map(|s| link(id, *s)));
        Ok(())
    }

    async fn delete_appointment(&self, appointment_id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing {
            return Err(storage_down());
        }
        let appointments = inner.rows.entry(Table::Appointments).or_default();
        let before = appointments.len();
        appointments.retain(|r| r["id"] != json!(appointment_id));
        if appointments.len() == before {
            return Err(AppError::NotFound(format!("appointment {}", appointment_id)));
        }
        inner
            .rows
            .entry(Table::AppointmentServices)
            .or_default()
            .retain(|r| r["appointment_id"] != json!(appointment_id));
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.inner.lock().unwrap().failing {
            return Err(storage_down());
        }
        Ok(())
    }
}

/// Send one request through the full router and decode the JSON response body.
pub async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
