//! Backend descriptor aggregate root.

use super::{BackendDomainError, BackendId, BackendKind, BackendType};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Registered backend descriptor.
///
/// The serialized form is a flat JSON object: the common fields plus the
/// `type` tag and the type-specific keys of [`BackendKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    id: BackendId,
    name: String,
    description: String,
    #[serde(flatten)]
    kind: BackendKind,
    created_at: DateTime<Utc>,
}

/// Partial update applied to an existing descriptor.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendUpdate {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement dispatch kind.
    pub kind: Option<BackendKind>,
}

impl BackendUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement kind.
    #[must_use]
    pub fn with_kind(mut self, kind: BackendKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns `true` when the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.kind.is_none()
    }
}

fn normalize_text(
    value: impl Into<String>,
    err: BackendDomainError,
) -> Result<String, BackendDomainError> {
    let normalized = value.into().trim().to_owned();
    if normalized.is_empty() {
        return Err(err);
    }
    Ok(normalized)
}

impl BackendDescriptor {
    /// Creates a new descriptor with a freshly generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BackendDomainError::EmptyName`] or
    /// [`BackendDomainError::EmptyDescription`] when the corresponding field
    /// is blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: BackendKind,
        clock: &impl Clock,
    ) -> Result<Self, BackendDomainError> {
        Ok(Self {
            id: BackendId::new(),
            name: normalize_text(name, BackendDomainError::EmptyName)?,
            description: normalize_text(description, BackendDomainError::EmptyDescription)?,
            kind,
            created_at: clock.utc(),
        })
    }

    /// Returns the backend identifier.
    #[must_use]
    pub const fn id(&self) -> BackendId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the dispatch kind.
    #[must_use]
    pub const fn kind(&self) -> &BackendKind {
        &self.kind
    }

    /// Returns the coarse type label.
    #[must_use]
    pub const fn backend_type(&self) -> BackendType {
        self.kind.backend_type()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy with the update applied.
    ///
    /// The identifier and creation timestamp never change.
    ///
    /// # Errors
    ///
    /// Returns [`BackendDomainError`] when a replacement name or description
    /// is blank.
    pub fn with_update(&self, update: BackendUpdate) -> Result<Self, BackendDomainError> {
        let BackendUpdate {
            name,
            description,
            kind,
        } = update;

        let mut updated = self.clone();
        if let Some(new_name) = name {
            updated.name = normalize_text(new_name, BackendDomainError::EmptyName)?;
        }
        if let Some(new_description) = description {
            updated.description =
                normalize_text(new_description, BackendDomainError::EmptyDescription)?;
        }
        if let Some(new_kind) = kind {
            updated.kind = new_kind;
        }
        Ok(updated)
    }
}
