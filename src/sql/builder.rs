//! Builds parameterized statements for the gateway.
//!
//! Table identifiers come from [`Table`]; column identifiers come from the catalog. Request data only
//! ever reaches the database as bind parameters.

use crate::error::AppError;
use crate::service::Attribute;
use crate::sql::TextParam;
use crate::table::Table;

/// One appointments column as reported by `information_schema.columns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub type_schema: String,
    pub type_name: String,
}

impl ColumnInfo {
    /// `$n::"schema"."type"` so text parameters convert to the column type server-side.
    fn placeholder(&self, n: usize) -> String {
        format!("${}::{}.{}", n, quoted(&self.type_schema), quoted(&self.type_name))
    }
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<TextParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: TextParam) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

pub const APPOINTMENT_COLUMNS: &str = "SELECT column_name::text, udt_schema::text, udt_name::text \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = 'appointments' \
     ORDER BY ordinal_position";

pub const LOCK_APPOINTMENT: &str = r#"SELECT "id"::int8 FROM "appointments" WHERE "id" = $1 FOR UPDATE"#;

pub const DELETE_APPOINTMENT: &str = r#"DELETE FROM "appointments" WHERE "id" = $1"#;

pub const INSERT_APPOINTMENT_SERVICE: &str =
    r#"INSERT INTO "appointment_services" ("appointment_id", "service_id") VALUES ($1, $2)"#;

pub const DELETE_APPOINTMENT_SERVICES: &str =
    r#"DELETE FROM "appointment_services" WHERE "appointment_id" = $1"#;

/// Full scan; each row comes back as one JSON object in column declaration order.
pub fn select_all(table: Table) -> String {
    format!("SELECT row_to_json(gateway_row) FROM {} gateway_row", quoted(table.as_str()))
}

/// Pair each attribute with its column. Unknown columns are rejected before anything is written.
fn resolve<'a>(
    attributes: &'a [Attribute],
    columns: &'a [ColumnInfo],
) -> Result<Vec<(&'a Attribute, &'a ColumnInfo)>, AppError> {
    attributes
        .iter()
        .map(|a| {
            columns
                .iter()
                .find(|c| c.name == a.name)
                .map(|c| (a, c))
                .ok_or_else(|| AppError::Validation(format!("unknown appointments column '{}'", a.name)))
        })
        .collect()
}

/// INSERT one appointment and return its generated id as int8.
pub fn insert_appointment(attributes: &[Attribute], columns: &[ColumnInfo]) -> Result<QueryBuf, AppError> {
    let resolved = resolve(attributes, columns)?;
    let mut q = QueryBuf::new();
    if resolved.is_empty() {
        q.sql = r#"INSERT INTO "appointments" DEFAULT VALUES RETURNING "id"::int8"#.to_string();
        return Ok(q);
    }
    let mut cols = Vec::with_capacity(resolved.len());
    let mut placeholders = Vec::with_capacity(resolved.len());
    for (attr, col) in resolved {
        let n = q.push_param(attr.value.clone());
        cols.push(quoted(&col.name));
        placeholders.push(col.placeholder(n));
    }
    q.sql = format!(
        r#"INSERT INTO "appointments" ({}) VALUES ({}) RETURNING "id"::int8"#,
        cols.join(", "),
        placeholders.join(", ")
    );
    Ok(q)
}

/// UPDATE by id, setting only the given attributes. `None` when there is nothing to set.
pub fn update_appointment(
    id: i64,
    attributes: &[Attribute],
    columns: &[ColumnInfo],
) -> Result<Option<QueryBuf>, AppError> {
    let resolved = resolve(attributes, columns)?;
    if resolved.is_empty() {
        return Ok(None);
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(resolved.len());
    for (attr, col) in resolved {
        let n = q.push_param(attr.value.clone());
        sets.push(format!("{} = {}", quoted(&col.name), col.placeholder(n)));
    }
    let id_param = q.push_param(Some(id.to_string()));
    q.sql = format!(
        r#"UPDATE "appointments" SET {} WHERE "id" = ${}::int8"#,
        sets.join(", "),
        id_param
    );
    Ok(Some(q))
}
