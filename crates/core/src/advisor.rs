//! AI schedule suggestions.
//!
//! The advisor is a thin proxy: it sends the course list and the user's
//! free-text preferences to a text-generation model and turns the reply into
//! [`Suggestion`] records. Replies are validated on ingest; entries missing
//! required fields are dropped. Applying suggestions goes through the regular
//! slot assignment.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{TimetableError, TimetableResult};
use crate::models::course::Course;
use crate::models::suggestion::Suggestion;
use crate::models::time_slot::{Day, FIRST_HOUR, LAST_HOUR};
use crate::timetable::Timetable;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful scheduling assistant. Always respond with valid JSON only.";

const NO_PREFERENCES: &str = "No specific preferences provided";

#[async_trait]
pub trait ScheduleAdvisor: Send + Sync {
    async fn suggest(&self, courses: &[Course], preferences: &str) -> TimetableResult<Vec<Suggestion>>;
}

fn hour_label(hour: u8) -> String {
    match hour {
        0 => "12 AM".to_string(),
        h if h < 12 => format!("{} AM", h),
        12 => "12 PM".to_string(),
        h => format!("{} PM", h - 12),
    }
}

pub fn build_prompt(courses: &[Course], preferences: &str) -> TimetableResult<String> {
    let courses_json = serde_json::to_string_pretty(courses)
        .map_err(|e| TimetableError::Internal(Box::new(e)))?;
    let preferences = match preferences.trim() {
        "" => NO_PREFERENCES,
        text => text,
    };
    let first_day = Day::ALL[0];
    let last_day = Day::ALL[Day::ALL.len() - 1];

    Ok(format!(
        r#"You are a smart timetable scheduling assistant. Given the following courses and preferences, suggest an optimal weekly schedule from {first_day} to {last_day}, {start} to {end}.

Courses:
{courses_json}

User Preferences:
{preferences}

Rules:
1. Each course must be scheduled according to its duration (in consecutive hours)
2. Avoid scheduling back-to-back classes if possible
3. Try to balance the workload across days
4. Consider typical peak productivity times (morning and early afternoon)
5. Leave breaks between classes

Return a JSON array of scheduling suggestions in this format:
[
  {{
    "courseId": "course_id",
    "day": "Monday",
    "startTime": 9,
    "reason": "Brief explanation why this time works well"
  }}
]

Return ONLY the JSON array, no additional text."#,
        start = hour_label(FIRST_HOUR),
        end = hour_label(LAST_HOUR + 1),
    ))
}

/// Finds the first fenced code block (optionally tagged `json`) whose body is
/// a JSON array.
fn extract_fenced_array(content: &str) -> Option<&str> {
    let mut rest = content;
    while let Some(open) = rest.find("```") {
        let after = &rest[open + 3..];
        let body = after.strip_prefix("json").unwrap_or(after);
        let Some(close) = body.find("```") else {
            return None;
        };
        let candidate = body[..close].trim();
        if candidate.starts_with('[') && candidate.ends_with(']') {
            return Some(candidate);
        }
        rest = &body[close + 3..];
    }
    None
}

fn parse_entry(entry: &Value) -> Option<Suggestion> {
    let course_id = entry.get("courseId")?.as_str()?.trim();
    if course_id.is_empty() {
        return None;
    }
    let day = entry.get("day")?.as_str()?.parse::<Day>().ok()?;
    let start_time = u8::try_from(entry.get("startTime")?.as_u64()?).ok()?;
    let reason = entry
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(Suggestion {
        course_id: course_id.to_string(),
        day,
        start_time,
        reason,
    })
}

/// Keeps the well-formed entries of a suggestion array.
pub fn validate_suggestions(entries: &[Value]) -> Vec<Suggestion> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let parsed = parse_entry(entry);
            if parsed.is_none() {
                warn!(index, %entry, "Skipping malformed suggestion");
            }
            parsed
        })
        .collect()
}

/// Parses the model's reply text into suggestions.
pub fn parse_suggestions(content: &str) -> TimetableResult<Vec<Suggestion>> {
    let value = match serde_json::from_str::<Value>(content.trim()) {
        Ok(value) => value,
        Err(_) => {
            let fenced = extract_fenced_array(content).ok_or_else(|| {
                TimetableError::Upstream("Failed to parse AI response".to_string())
            })?;
            serde_json::from_str::<Value>(fenced)
                .map_err(|_| TimetableError::Upstream("Failed to parse AI response".to_string()))?
        }
    };

    let Value::Array(entries) = value else {
        return Err(TimetableError::Upstream("Invalid response format".to_string()));
    };

    let suggestions = validate_suggestions(&entries);
    debug!(received = entries.len(), kept = suggestions.len(), "Parsed suggestions");
    Ok(suggestions)
}

/// Feeds each suggestion through the regular assignment, in order.
pub fn apply_suggestions(timetable: &mut Timetable, suggestions: &[Suggestion]) -> bool {
    suggestions.iter().fold(false, |changed, suggestion| {
        timetable.assign_course_to_slot(&suggestion.course_id, &suggestion.slot_id()) || changed
    })
}
