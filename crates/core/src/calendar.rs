//! Projection of the weekly grid onto concrete calendar events.
//!
//! Each (day, course) group of assigned slots becomes one event, anchored on
//! the group's first slot and placed on the next occurrence of that weekday.
//! Events are exported as Google Calendar "create event" links repeating
//! weekly.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;
use url::Url;

use crate::errors::{TimetableError, TimetableResult};
use crate::models::time_slot::{Day, TimeSlot};
use crate::models::timetable::CalendarEventResponse;
use crate::timetable::Timetable;

pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";
/// Number of weekly repetitions attached to every exported event.
pub const WEEKLY_OCCURRENCES: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
}

/// Date of the next `day` on or after `now`'s date.
fn next_occurrence(now: &DateTime<Tz>, day: Day) -> chrono::NaiveDate {
    let today = now.date_naive();
    let current = today.weekday().num_days_from_sunday();
    let until = (day.number_from_sunday() + 7 - current) % 7;
    today + Duration::days(i64::from(until))
}

fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Some(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

pub fn create_calendar_events(timetable: &Timetable, now: DateTime<Tz>) -> Vec<CalendarEvent> {
    let mut groups: Vec<(Day, &str, Vec<&TimeSlot>)> = Vec::new();
    for slot in timetable.slots() {
        let Some(course_id) = slot.course_id.as_deref() else {
            continue;
        };
        match groups
            .iter_mut()
            .find(|(day, id, _)| *day == slot.day && *id == course_id)
        {
            Some((_, _, slots)) => slots.push(slot),
            None => groups.push((slot.day, course_id, vec![slot])),
        }
    }

    let tz = now.timezone();
    groups
        .into_iter()
        .filter_map(|(day, course_id, slots)| {
            let anchor = slots.first()?;
            let course = timetable.course(course_id)?;

            let date = next_occurrence(&now, day);
            let start_local = date.and_hms_opt(u32::from(anchor.start_time), 0, 0)?;
            let Some(end_local) =
                start_local.checked_add_signed(Duration::hours(i64::from(course.duration)))
            else {
                warn!(slot_id = %anchor.id, duration = course.duration, "Skipping event whose end is out of range");
                return None;
            };

            let (Some(start), Some(end)) = (localize(&tz, start_local), localize(&tz, end_local))
            else {
                warn!(slot_id = %anchor.id, "Skipping event that falls into a timezone gap");
                return None;
            };

            Some(CalendarEvent {
                title: course.name.clone(),
                start,
                end,
                description: format!("Lecturer: {}", course.lecturer),
            })
        })
        .collect()
}

fn format_calendar_date(date: &DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn calendar_event_url(event: &CalendarEvent) -> TimetableResult<String> {
    let dates = format!(
        "{}/{}",
        format_calendar_date(&event.start),
        format_calendar_date(&event.end)
    );
    let recur = format!("RRULE:FREQ=WEEKLY;COUNT={}", WEEKLY_OCCURRENCES);

    let url = Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title.as_str()),
            ("dates", dates.as_str()),
            ("details", event.description.as_str()),
            ("recur", recur.as_str()),
        ],
    )
    .map_err(|e| TimetableError::Internal(Box::new(e)))?;

    Ok(url.to_string())
}

/// One creation link per event. Fails when nothing is scheduled.
pub fn export_calendar_links(
    timetable: &Timetable,
    now: DateTime<Tz>,
) -> TimetableResult<Vec<CalendarEventResponse>> {
    let events = create_calendar_events(timetable, now);
    if events.is_empty() {
        return Err(TimetableError::Validation("No events to export".to_string()));
    }

    events
        .into_iter()
        .map(|event| {
            let url = calendar_event_url(&event)?;
            Ok(CalendarEventResponse {
                title: event.title,
                start: event.start,
                end: event.end,
                description: event.description,
                url,
            })
        })
        .collect()
}
