pub mod calendar;
pub mod courses;
pub mod export;
pub mod share;
pub mod suggestions;
pub mod timetable;
