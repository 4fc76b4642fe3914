//! Backends for the flat key-value timetable record.

pub mod file;
pub mod postgres;

pub use file::FileStorage;
pub use postgres::PgStorage;
