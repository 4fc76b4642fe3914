use serde::{Deserialize, Serialize};

use super::course::Course;
use super::time_slot::{Day, slot_id};

/// One placement proposed by the schedule advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub course_id: String,
    pub day: Day,
    pub start_time: u8,
    #[serde(default)]
    pub reason: String,
}

impl Suggestion {
    pub fn slot_id(&self) -> String {
        slot_id(self.day, self.start_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestScheduleRequest {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub preferences: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableSuggestRequest {
    #[serde(default)]
    pub preferences: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestScheduleResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplySuggestionsRequest {
    pub suggestions: Vec<Suggestion>,
}
