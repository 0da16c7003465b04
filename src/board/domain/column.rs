//! Column entity: an ordered lane of tasks inside a project.

use super::{BoardDomainError, ColumnId, Position, ProjectId, TextField};
use serde::{Deserialize, Serialize};

/// Validated input for appending a column to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColumn {
    name: String,
    index: Position,
    project_id: ProjectId,
}

impl NewColumn {
    /// Validates the column name and captures the slot it will occupy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the name is empty or longer than 255
    /// characters.
    pub fn new(
        name: impl Into<String>,
        index: Position,
        project_id: ProjectId,
    ) -> Result<Self, BoardDomainError> {
        let raw_name = name.into();
        TextField::ColumnName.validate(&raw_name)?;
        Ok(Self {
            name: raw_name,
            index,
            project_id,
        })
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slot the column will occupy.
    #[must_use]
    pub const fn index(&self) -> Position {
        self.index
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

/// A column positioned among the columns of its project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    name: String,
    index: Position,
    project_id: ProjectId,
}

impl Column {
    /// Builds a stored column from creation input and its assigned identity.
    #[must_use]
    pub fn from_new(id: ColumnId, new: NewColumn) -> Self {
        Self {
            id,
            name: new.name,
            index: new.index,
            project_id: new.project_id,
        }
    }

    /// Reconstructs a column from persisted storage without validation.
    #[must_use]
    pub const fn from_persisted(
        id: ColumnId,
        name: String,
        index: Position,
        project_id: ProjectId,
    ) -> Self {
        Self {
            id,
            name,
            index,
            project_id,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column position within its project.
    #[must_use]
    pub const fn index(&self) -> Position {
        self.index
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Moves the column to another slot of the same project.
    pub const fn set_index(&mut self, index: Position) {
        self.index = index;
    }

    /// Renames the column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the name is empty or longer than 255
    /// characters.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), BoardDomainError> {
        let raw_name = name.into();
        TextField::ColumnName.validate(&raw_name)?;
        self.name = raw_name;
        Ok(())
    }
}
