//! HTTP handlers for table reads and appointment writes.

pub mod appointments;
pub mod tables;
pub use tables::read_table;
