//! # Timetable Core
//!
//! Domain model and behaviour of the weekly timetable builder: courses, the
//! fixed day × hour grid, slot assignment, persistence of the snapshot, and the
//! projections built on top of it (grid view, share links, calendar events,
//! raster/PDF export, AI suggestions).

pub mod advisor;
pub mod calendar;
pub mod drag_drop;
pub mod errors;
pub mod export;
pub mod grid;
pub mod models;
pub mod share;
pub mod store;
pub mod timetable;
