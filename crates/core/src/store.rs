//! Persistent timetable store.
//!
//! [`TimetableStore`] wraps a [`Timetable`] and mirrors it to a flat
//! key-value record after every mutation that changed something. The record
//! holds the JSON-encoded `{courses, slots}` snapshot under one fixed key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eyre::{WrapErr, eyre};
use tracing::{debug, error, warn};

use crate::errors::TimetableResult;
use crate::models::course::{Course, CreateCourseRequest, UpdateCourseRequest};
use crate::models::timetable::TimetableSnapshot;
use crate::timetable::Timetable;

/// Default key of the persisted record.
pub const DEFAULT_STORAGE_KEY: &str = "weekly-timetable";

/// Flat key-value storage for the serialized timetable record.
#[async_trait]
pub trait TimetableStorage: Send + Sync {
    async fn load(&self, key: &str) -> eyre::Result<Option<String>>;

    async fn save(&self, key: &str, value: &str) -> eyre::Result<()>;
}

/// Process-local storage, mainly for tests and ephemeral servers.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimetableStorage for MemoryStorage {
    async fn load(&self, key: &str) -> eyre::Result<Option<String>> {
        let records = self
            .records
            .lock()
            .map_err(|_| eyre!("Memory storage lock poisoned"))?;
        Ok(records.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> eyre::Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| eyre!("Memory storage lock poisoned"))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct TimetableStore {
    timetable: Timetable,
    storage: Arc<dyn TimetableStorage>,
    key: String,
}

impl TimetableStore {
    /// Loads the record stored under `key`, or seeds an empty grid when there
    /// is none. An unreadable record is logged and replaced by an empty grid.
    pub async fn open(storage: Arc<dyn TimetableStorage>, key: &str) -> TimetableResult<Self> {
        let raw = storage
            .load(key)
            .await
            .wrap_err_with(|| format!("Failed to load timetable record {}", key))?;

        let timetable = match raw {
            Some(raw) => match serde_json::from_str::<TimetableSnapshot>(&raw) {
                Ok(snapshot) => Timetable::from_snapshot(snapshot),
                Err(e) => {
                    warn!(%key, error = %e, "Persisted timetable is corrupt, starting from an empty grid");
                    Timetable::new()
                }
            },
            None => {
                debug!(%key, "No persisted timetable, seeding empty grid");
                Timetable::new()
            }
        };

        Ok(Self {
            timetable,
            storage,
            key: key.to_string(),
        })
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn snapshot(&self) -> TimetableSnapshot {
        self.timetable.snapshot()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn add_course(&mut self, request: CreateCourseRequest) -> TimetableResult<Course> {
        self.commit(|timetable| timetable.add_course(request), |_| true)
            .await
    }

    pub async fn update_course(
        &mut self,
        id: &str,
        update: UpdateCourseRequest,
    ) -> TimetableResult<Option<Course>> {
        self.commit(|timetable| timetable.update_course(id, update), Option::is_some)
            .await
    }

    pub async fn delete_course(&mut self, id: &str) -> TimetableResult<bool> {
        self.apply(|timetable| timetable.delete_course(id)).await
    }

    pub async fn assign_course_to_slot(
        &mut self,
        course_id: &str,
        slot_id: &str,
    ) -> TimetableResult<bool> {
        self.apply(|timetable| timetable.assign_course_to_slot(course_id, slot_id))
            .await
    }

    pub async fn remove_course_from_slot(&mut self, slot_id: &str) -> TimetableResult<bool> {
        self.apply(|timetable| timetable.remove_course_from_slot(slot_id))
            .await
    }

    pub async fn replace_with(&mut self, snapshot: TimetableSnapshot) -> TimetableResult<bool> {
        self.apply(|timetable| timetable.replace_with(snapshot)).await
    }

    /// Runs a batch of in-memory mutations and writes the result once.
    pub async fn apply<F>(&mut self, mutate: F) -> TimetableResult<bool>
    where
        F: FnOnce(&mut Timetable) -> bool,
    {
        self.commit(mutate, |changed| *changed).await
    }

    /// Mutates the timetable and persists it when `changed` says so. A failed
    /// write restores the timetable to its state before the mutation.
    async fn commit<T, F, C>(&mut self, mutate: F, changed: C) -> TimetableResult<T>
    where
        F: FnOnce(&mut Timetable) -> T,
        C: FnOnce(&T) -> bool,
    {
        let previous = self.timetable.clone();
        let outcome = mutate(&mut self.timetable);
        if !changed(&outcome) {
            return Ok(outcome);
        }

        if let Err(e) = self.persist().await {
            self.timetable = previous;
            return Err(e);
        }
        Ok(outcome)
    }

    async fn persist(&self) -> TimetableResult<()> {
        let value = serde_json::to_string(&self.timetable.snapshot())
            .wrap_err("Failed to serialize timetable")?;

        if let Err(e) = self.storage.save(&self.key, &value).await {
            error!(key = %self.key, error = %e, "Failed to persist timetable");
            return Err(e.wrap_err("Failed to persist timetable").into());
        }

        debug!(key = %self.key, bytes = value.len(), "Persisted timetable");
        Ok(())
    }
}
