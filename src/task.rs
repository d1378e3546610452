//! Task records and id generation.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::config::IdStrategy;

/// Opaque task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Raw due date as typed; only interpreted when rendered.
    pub due_date: String,
    pub completed: bool,
}

/// Source of fresh task ids.
#[derive(Debug, Clone)]
pub enum IdGenerator {
    Sequential { next: u64 },
    Ulid,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Sequential => IdGenerator::Sequential { next: 1 },
            IdStrategy::Ulid => IdGenerator::Ulid,
        }
    }

    pub fn next_id(&mut self) -> TaskId {
        match self {
            IdGenerator::Sequential { next } => {
                let id = *next;
                *next += 1;
                TaskId(id.to_string())
            }
            IdGenerator::Ulid => TaskId(Ulid::new().to_string().to_ascii_lowercase()),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}
