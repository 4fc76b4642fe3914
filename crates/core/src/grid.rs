//! Grid projection of a [`Timetable`].
//!
//! The view is a plain day × hour matrix: drop targets are keyed by slot id,
//! drag sources by course id. It holds no state of its own.

use serde::{Deserialize, Serialize};

use crate::models::course::CourseColor;
use crate::models::time_slot::{Day, HOURS};
use crate::timetable::Timetable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCourse {
    pub id: String,
    pub name: String,
    pub lecturer: String,
    pub color: CourseColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub slot_id: String,
    pub day: Day,
    pub course: Option<GridCourse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub hour: u8,
    pub label: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    pub days: Vec<Day>,
    pub rows: Vec<GridRow>,
}

/// Formats a start hour as `7AM`, `12PM`, `1PM`.
pub fn format_hour(hour: u8) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}{}", display, period)
}

pub fn render_grid(timetable: &Timetable) -> GridView {
    let rows = HOURS
        .iter()
        .map(|hour| GridRow {
            hour: *hour,
            label: format_hour(*hour),
            cells: Day::ALL
                .iter()
                .filter_map(|day| timetable.slot_at(*day, *hour))
                .map(|slot| GridCell {
                    slot_id: slot.id.clone(),
                    day: slot.day,
                    course: slot
                        .course_id
                        .as_deref()
                        .and_then(|id| timetable.course(id))
                        .map(|course| GridCourse {
                            id: course.id.clone(),
                            name: course.name.clone(),
                            lecturer: course.lecturer.clone(),
                            color: course.color,
                        }),
                })
                .collect(),
        })
        .collect();

    GridView {
        days: Day::ALL.to_vec(),
        rows,
    }
}
