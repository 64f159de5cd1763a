//! ScheduleStore: the gateway seam, plus request payload validation.

mod gateway;
mod payload;
pub use gateway::ScheduleStore;
pub use payload::{AppointmentRef, AppointmentUpdate, Attribute, NewAppointment};
