//! JSON-backed habit store.
//!
//! Habits persist as one ordered JSON document at
//! `~/.config/habits/habits.json`. Order is user-controlled (list
//! reordering) and survives round trips, as does every habit field
//! including the entry set and reminder time.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{data_dir, StorageError};
use crate::habit::Habit;

/// Ordered collection of habits with load/save.
#[derive(Debug)]
pub struct HabitStore {
    path: PathBuf,
    habits: Vec<Habit>,
}

impl HabitStore {
    /// Open the store at the default location, creating an empty one
    /// if no file exists yet.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("habits.json");
        Self::open_at(path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let habits = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|err| StorageError::Parse {
                path: path.clone(),
                message: err.to_string(),
            })?
        } else {
            Vec::new()
        };
        Ok(Self { path, habits })
    }

    /// Write the current state back to disk.
    pub fn save(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.habits).map_err(|err| {
            StorageError::Serialize {
                what: "habits",
                message: err.to_string(),
            }
        })?;
        std::fs::write(&self.path, raw).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habits_mut(&mut self) -> &mut [Habit] {
        &mut self.habits
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    /// Append a habit at the end of the list.
    pub fn add(&mut self, habit: Habit) {
        self.habits.push(habit);
    }

    pub fn get(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id() == id)
    }

    /// Find a habit by exact name. Ambiguous only if the user created
    /// duplicate names; returns the first match in list order.
    pub fn find_by_name(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.name == name)
    }

    /// Remove a habit by id, returning it. The caller is responsible
    /// for cancelling its reminder first (`Reconciler::on_deleted`).
    pub fn remove(&mut self, id: Uuid) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id() == id)?;
        Some(self.habits.remove(index))
    }

    /// Move the habit at `from` to position `to`, shifting the rest.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.habits.len() || to >= self.habits.len() {
            return false;
        }
        let habit = self.habits.remove(from);
        self.habits.insert(to, habit);
        true
    }
}
