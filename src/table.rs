//! Fixed allow-list of tables the gateway may read.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Clients,
    Services,
    AppointmentServices,
    Appointments,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Users,
        Table::Clients,
        Table::Services,
        Table::AppointmentServices,
        Table::Appointments,
    ];

    /// SQL table name; also the route path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Clients => "clients",
            Table::Services => "services",
            Table::AppointmentServices => "appointment_services",
            Table::Appointments => "appointments",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownTable(pub String);

impl fmt::Display for UnknownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown table '{}'", self.0)
    }
}

impl std::error::Error for UnknownTable {}

impl FromStr for Table {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}
