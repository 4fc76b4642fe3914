use serde::{Deserialize, Serialize};

/// Fixed course palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseColor {
    #[default]
    Blue,
    Teal,
    Green,
    Orange,
    Red,
    Purple,
    Pink,
    Yellow,
}

impl CourseColor {
    pub const PALETTE: [CourseColor; 8] = [
        CourseColor::Blue,
        CourseColor::Teal,
        CourseColor::Green,
        CourseColor::Orange,
        CourseColor::Red,
        CourseColor::Purple,
        CourseColor::Pink,
        CourseColor::Yellow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CourseColor::Blue => "Blue",
            CourseColor::Teal => "Teal",
            CourseColor::Green => "Green",
            CourseColor::Orange => "Orange",
            CourseColor::Red => "Red",
            CourseColor::Purple => "Purple",
            CourseColor::Pink => "Pink",
            CourseColor::Yellow => "Yellow",
        }
    }

    /// CSS value for front-ends that theme the palette with custom properties.
    pub fn css_value(&self) -> String {
        format!("hsl(var(--course-{}))", self.name().to_lowercase())
    }

    /// Fill color used by the raster export.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            CourseColor::Blue => [59, 130, 246],
            CourseColor::Teal => [20, 184, 166],
            CourseColor::Green => [34, 197, 94],
            CourseColor::Orange => [249, 115, 22],
            CourseColor::Red => [239, 68, 68],
            CourseColor::Purple => [168, 85, 247],
            CourseColor::Pink => [236, 72, 153],
            CourseColor::Yellow => [234, 179, 8],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub lecturer: String,
    #[serde(default)]
    pub color: CourseColor,
    /// Length in whole hours.
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub name: String,
    pub lecturer: String,
    #[serde(default)]
    pub color: CourseColor,
    pub duration: u32,
}

/// Partial course update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub lecturer: Option<String>,
    pub color: Option<CourseColor>,
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCourseResponse {
    pub deleted: bool,
}
