pub mod course;
pub mod suggestion;
pub mod time_slot;
pub mod timetable;
