//! Maps a finished drag gesture onto a timetable mutation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::timetable::TimetableSnapshot;
use crate::timetable::Timetable;

/// Droppable id of the course sidebar.
pub const COURSE_LIST_ID: &str = "courses-list";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropLocation {
    pub droppable_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub draggable_id: String,
    pub source: DropLocation,
    /// `None` when the item was released outside any drop target.
    pub destination: Option<DropLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragOutcome {
    #[serde(rename_all = "camelCase")]
    Assigned { course_id: String, slot_id: String },
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEndResponse {
    pub outcome: DragOutcome,
    pub timetable: TimetableSnapshot,
}

impl DragOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, DragOutcome::Assigned { .. })
    }
}

/// Only a drag from the course list onto something else is meaningful; it
/// becomes `assign_course_to_slot(draggable, destination)`.
pub fn apply_drag_end(timetable: &mut Timetable, drag: &DragEnd) -> DragOutcome {
    let Some(destination) = &drag.destination else {
        debug!(draggable_id = %drag.draggable_id, "Drag cancelled");
        return DragOutcome::Ignored;
    };

    if drag.source.droppable_id != COURSE_LIST_ID || destination.droppable_id == COURSE_LIST_ID {
        return DragOutcome::Ignored;
    }

    if timetable.assign_course_to_slot(&drag.draggable_id, &destination.droppable_id) {
        DragOutcome::Assigned {
            course_id: drag.draggable_id.clone(),
            slot_id: destination.droppable_id.clone(),
        }
    } else {
        DragOutcome::Ignored
    }
}
