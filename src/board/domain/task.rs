//! Task entity: a card positioned inside a column.

use super::{BoardDomainError, ColumnId, Position, TaskId, TextField};
use serde::{Deserialize, Serialize};

/// Validated input for appending a task to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: String,
    description: String,
    index: Position,
    column_id: ColumnId,
}

impl NewTask {
    /// Validates task fields and captures the slot the task will occupy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the name is empty or longer than 500
    /// characters, or the description exceeds 5000 characters.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        index: Position,
        column_id: ColumnId,
    ) -> Result<Self, BoardDomainError> {
        let raw_name = name.into();
        let raw_description = description.into();
        validate_fields(&raw_name, &raw_description)?;
        Ok(Self {
            name: raw_name,
            description: raw_description,
            index,
            column_id,
        })
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the slot the task will occupy.
    #[must_use]
    pub const fn index(&self) -> Position {
        self.index
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted position within the column.
    pub index: Position,
    /// Persisted owning column.
    pub column_id: ColumnId,
}

/// A task positioned among the tasks of its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    index: Position,
    column_id: ColumnId,
}

impl Task {
    /// Builds a stored task from creation input and its assigned identity.
    #[must_use]
    pub fn from_new(id: TaskId, new: NewTask) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            index: new.index,
            column_id: new.column_id,
        }
    }

    /// Reconstructs a task from persisted storage without validation.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            index: data.index,
            column_id: data.column_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task position within its column.
    #[must_use]
    pub const fn index(&self) -> Position {
        self.index
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Moves the task to another slot of its current column.
    pub const fn set_index(&mut self, index: Position) {
        self.index = index;
    }

    /// Moves the task into `column_id` at `index`.
    pub const fn relocate(&mut self, column_id: ColumnId, index: Position) {
        self.column_id = column_id;
        self.index = index;
    }

    /// Replaces name and description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] under the same rules as [`NewTask::new`].
    pub fn edit(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), BoardDomainError> {
        let raw_name = name.into();
        let raw_description = description.into();
        validate_fields(&raw_name, &raw_description)?;
        self.name = raw_name;
        self.description = raw_description;
        Ok(())
    }
}

fn validate_fields(name: &str, description: &str) -> Result<(), BoardDomainError> {
    TextField::TaskName.validate(name)?;
    TextField::TaskDescription.validate(description)
}
