//! In-memory timetable state and the slot-assignment algorithm.
//!
//! A [`Timetable`] owns the course list and the fixed day × hour grid. The
//! grid is seeded once in day-major order and never grows or shrinks; only
//! the `course_id` of each slot changes.

use tracing::debug;
use uuid::Uuid;

use crate::models::course::{Course, CreateCourseRequest, UpdateCourseRequest};
use crate::models::time_slot::{Day, HOURS, TimeSlot};
use crate::models::timetable::TimetableSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    courses: Vec<Course>,
    slots: Vec<TimeSlot>,
}

impl Default for Timetable {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the fixed grid: every hour of Monday, then every hour of Tuesday, and so on.
pub fn seed_grid() -> Vec<TimeSlot> {
    Day::ALL
        .iter()
        .flat_map(|day| HOURS.iter().map(move |hour| TimeSlot::empty(*day, *hour)))
        .collect()
}

impl Timetable {
    /// Empty course list over a fully unassigned grid.
    pub fn new() -> Self {
        Self {
            courses: Vec::new(),
            slots: seed_grid(),
        }
    }

    /// Rebuilds a timetable from a persisted or shared record.
    ///
    /// The record's slots are laid back onto a freshly seeded grid, so slot
    /// order is always canonical. Slots whose id is not part of the grid, and
    /// assignments that point at a course the record does not contain, are
    /// dropped.
    pub fn from_snapshot(snapshot: TimetableSnapshot) -> Self {
        let mut timetable = Self {
            courses: snapshot.courses,
            slots: seed_grid(),
        };

        for stored in snapshot.slots {
            let Some(course_id) = stored.course_id else {
                continue;
            };
            if timetable.course(&course_id).is_none() {
                debug!(slot_id = %stored.id, %course_id, "Dropping assignment to unknown course");
                continue;
            }
            match timetable.slots.iter_mut().find(|slot| slot.id == stored.id) {
                Some(slot) => slot.course_id = Some(course_id),
                None => debug!(slot_id = %stored.id, "Dropping slot outside the grid"),
            }
        }

        timetable
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn slot_at(&self, day: Day, start_time: u8) -> Option<&TimeSlot> {
        self.slots
            .iter()
            .find(|slot| slot.day == day && slot.start_time == start_time)
    }

    /// Slots currently occupied by `course_id`, in grid order.
    pub fn slots_for_course<'a>(&'a self, course_id: &'a str) -> impl Iterator<Item = &'a TimeSlot> {
        self.slots
            .iter()
            .filter(move |slot| slot.course_id.as_deref() == Some(course_id))
    }

    pub fn snapshot(&self) -> TimetableSnapshot {
        TimetableSnapshot {
            courses: self.courses.clone(),
            slots: self.slots.clone(),
        }
    }

    /// Courses plus only the slots that carry an assignment.
    pub fn shared_snapshot(&self) -> TimetableSnapshot {
        TimetableSnapshot {
            courses: self.courses.clone(),
            slots: self
                .slots
                .iter()
                .filter(|slot| slot.is_assigned())
                .cloned()
                .collect(),
        }
    }

    pub fn add_course(&mut self, request: CreateCourseRequest) -> Course {
        let course = Course {
            id: Uuid::now_v7().to_string(),
            name: request.name,
            lecturer: request.lecturer,
            color: request.color,
            duration: request.duration,
        };
        debug!(course_id = %course.id, name = %course.name, "Adding course");
        self.courses.push(course.clone());
        course
    }

    /// Merges the present fields of `update` into the course. Returns the
    /// updated course, or `None` when the id is unknown.
    pub fn update_course(&mut self, id: &str, update: UpdateCourseRequest) -> Option<Course> {
        let course = self.courses.iter_mut().find(|course| course.id == id)?;

        if let Some(name) = update.name {
            course.name = name;
        }
        if let Some(lecturer) = update.lecturer {
            course.lecturer = lecturer;
        }
        if let Some(color) = update.color {
            course.color = color;
        }
        if let Some(duration) = update.duration {
            course.duration = duration;
        }

        debug!(course_id = %id, "Updated course");
        Some(course.clone())
    }

    /// Removes the course and clears every slot that references it.
    /// Remaining assignments are not compacted.
    pub fn delete_course(&mut self, id: &str) -> bool {
        let before = self.courses.len();
        self.courses.retain(|course| course.id != id);
        if self.courses.len() == before {
            return false;
        }

        self.clear_course(id);
        debug!(course_id = %id, "Deleted course");
        true
    }

    /// Places `course_id` starting at `slot_id`.
    ///
    /// Any previous placement of the course is cleared first. The walk then
    /// covers `duration` positions from the anchor, filling a position only if
    /// it lies on the anchor's day and is free. Occupied or next-day positions
    /// are skipped, never rejected, so the resulting block may be shorter than
    /// the course duration.
    ///
    /// Returns whether any slot changed. Unknown ids are a silent no-op.
    pub fn assign_course_to_slot(&mut self, course_id: &str, slot_id: &str) -> bool {
        let Some(duration) = self.course(course_id).map(|course| course.duration as usize) else {
            debug!(%course_id, "Ignoring assignment of unknown course");
            return false;
        };
        let Some(anchor) = self.slots.iter().position(|slot| slot.id == slot_id) else {
            debug!(%slot_id, "Ignoring assignment to unknown slot");
            return false;
        };

        let before: Vec<Option<String>> =
            self.slots.iter().map(|slot| slot.course_id.clone()).collect();

        self.clear_course(course_id);

        let day = self.slots[anchor].day;
        for slot in self.slots.iter_mut().skip(anchor).take(duration) {
            if slot.day == day && slot.course_id.is_none() {
                slot.course_id = Some(course_id.to_string());
            }
        }

        let changed = self
            .slots
            .iter()
            .zip(&before)
            .any(|(slot, previous)| &slot.course_id != previous);
        debug!(%course_id, %slot_id, changed, "Assigned course");
        changed
    }

    /// Clears a single slot. Sibling slots of a multi-hour block keep their
    /// assignment.
    pub fn remove_course_from_slot(&mut self, slot_id: &str) -> bool {
        match self.slots.iter_mut().find(|slot| slot.id == slot_id) {
            Some(slot) => slot.course_id.take().is_some(),
            None => false,
        }
    }

    /// Replaces the whole state with `snapshot`, normalised onto the grid.
    pub fn replace_with(&mut self, snapshot: TimetableSnapshot) -> bool {
        let replacement = Self::from_snapshot(snapshot);
        if *self == replacement {
            return false;
        }
        *self = replacement;
        true
    }

    fn clear_course(&mut self, course_id: &str) {
        for slot in &mut self.slots {
            if slot.course_id.as_deref() == Some(course_id) {
                slot.course_id = None;
            }
        }
    }
}
