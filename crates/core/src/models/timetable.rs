use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::course::Course;
use super::time_slot::TimeSlot;

/// Full `{courses, slots}` record. This is both the persisted layout and the
/// share-link payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableSnapshot {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSlotRequest {
    pub course_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkResponse {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedQuery {
    pub shared: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedPreviewResponse {
    pub timetable: Option<TimetableSnapshot>,
}

/// Accepts either a full share link or the bare `shared` parameter value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSharedRequest {
    pub shared: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventResponse {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarExportResponse {
    pub events: Vec<CalendarEventResponse>,
}
