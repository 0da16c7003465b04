//! Project aggregate.

use super::{BoardDomainError, ProjectId, TextField};
use serde::{Deserialize, Serialize};

/// Name of the column every project is created with.
pub const DEFAULT_COLUMN_NAME: &str = "default";

/// Validated input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: String,
    description: String,
}

impl NewProject {
    /// Validates project fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the name is empty or longer than 500
    /// characters, or the description is longer than 1000 characters.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, BoardDomainError> {
        let raw_name = name.into();
        let raw_description = description.into();
        TextField::ProjectName.validate(&raw_name)?;
        TextField::ProjectDescription.validate(&raw_description)?;
        Ok(Self {
            name: raw_name,
            description: raw_description,
        })
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A board owning an ordered sequence of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
}

impl Project {
    /// Builds a stored project from creation input and its assigned identity.
    #[must_use]
    pub fn from_new(id: ProjectId, new: NewProject) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
        }
    }

    /// Reconstructs a project from persisted storage without validation.
    #[must_use]
    pub const fn from_persisted(id: ProjectId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces name and description with validated values.
    pub fn apply(&mut self, update: NewProject) {
        self.name = update.name;
        self.description = update.description;
    }
}
