use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First start hour of the grid (7 AM).
pub const FIRST_HOUR: u8 = 7;
/// Last start hour of the grid (6 PM, the row ending at 7 PM).
pub const LAST_HOUR: u8 = 18;

/// Start hours of every grid row, in display order.
pub const HOURS: [u8; 12] = [7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// Grid columns, in display order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }

    /// Day-of-week number counted from Sunday = 0.
    pub fn number_from_sunday(&self) -> u32 {
        match self {
            Day::Monday => 1,
            Day::Tuesday => 2,
            Day::Wednesday => 3,
            Day::Thursday => 4,
            Day::Friday => 5,
            Day::Saturday => 6,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| format!("Unknown day: {}", s))
    }
}

/// Deterministic slot identity, e.g. `Monday-9`.
pub fn slot_id(day: Day, start_time: u8) -> String {
    format!("{}-{}", day, start_time)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub day: Day,
    pub start_time: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}

impl TimeSlot {
    pub fn empty(day: Day, start_time: u8) -> Self {
        Self {
            id: slot_id(day, start_time),
            day,
            start_time,
            course_id: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.course_id.is_some()
    }
}
