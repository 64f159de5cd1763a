//! Request bodies for appointment writes, validated before any statement is built.

use crate::error::AppError;
use crate::sql::{scalar_to_param, value_to_id, TextParam};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const SERVICES_KEY: &str = "services";
const APPOINTMENT_ID_KEY: &str = "appointment_id";

/// One caller-supplied appointments column and its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: TextParam,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAppointment {
    pub attributes: Vec<Attribute>,
    pub services: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppointmentUpdate {
    pub appointment_id: i64,
    pub attributes: Vec<Attribute>,
    pub services: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppointmentRef {
    pub appointment_id: i64,
}

impl NewAppointment {
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let mut map = body_to_map(body)?;
        let services = take_services(&mut map)?;
        let attributes = attributes(map)?;
        Ok(NewAppointment { attributes, services })
    }
}

impl AppointmentUpdate {
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let mut map = body_to_map(body)?;
        let appointment_id = take_appointment_id(&mut map)?;
        let services = take_services(&mut map)?;
        let attributes = attributes(map)?;
        Ok(AppointmentUpdate {
            appointment_id,
            attributes,
            services,
        })
    }
}

impl AppointmentRef {
    /// Keys other than `appointment_id` are ignored.
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let mut map = body_to_map(body)?;
        let appointment_id = take_appointment_id(&mut map)?;
        Ok(AppointmentRef { appointment_id })
    }
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::Validation("body must be a JSON object".into())),
    }
}

fn take_appointment_id(map: &mut Map<String, Value>) -> Result<i64, AppError> {
    let v = map
        .remove(APPOINTMENT_ID_KEY)
        .ok_or_else(|| AppError::Validation(format!("{} is required", APPOINTMENT_ID_KEY)))?;
    value_to_id(&v).ok_or_else(|| AppError::Validation(format!("{} must be an integer", APPOINTMENT_ID_KEY)))
}

/// Service ids in submission order with duplicates dropped.
fn take_services(map: &mut Map<String, Value>) -> Result<Vec<i64>, AppError> {
    let v = map
        .remove(SERVICES_KEY)
        .ok_or_else(|| AppError::Validation(format!("{} is required", SERVICES_KEY)))?;
    let Value::Array(items) = v else {
        return Err(AppError::Validation(format!("{} must be an array", SERVICES_KEY)));
    };
    let mut out: Vec<i64> = Vec::with_capacity(items.len());
    for item in &items {
        let id = value_to_id(item)
            .ok_or_else(|| AppError::Validation(format!("{} must contain integer ids", SERVICES_KEY)))?;
        if !out.contains(&id) {
            out.push(id);
        }
    }
    Ok(out)
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"))
}

fn attributes(map: Map<String, Value>) -> Result<Vec<Attribute>, AppError> {
    let mut out = Vec::with_capacity(map.len());
    for (name, v) in map {
        if !identifier_re().is_match(&name) {
            return Err(AppError::Validation(format!("invalid attribute name '{}'", name)));
        }
        if name == "id" {
            return Err(AppError::Validation("id is generated and cannot be set".into()));
        }
        let value = scalar_to_param(&name, &v)?;
        out.push(Attribute { name, value });
    }
    Ok(out)
}
