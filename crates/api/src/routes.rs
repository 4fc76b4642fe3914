pub mod courses;
pub mod health;
pub mod share;
pub mod suggestions;
pub mod timetable;
