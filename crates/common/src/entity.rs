//! Entity base shared by every persisted record
//!
//! Concrete entities embed a [`BaseEntity`] (flattened for both serde and
//! sqlx) instead of inheriting from an abstract record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle flag carried by every entity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default,
)]
#[sqlx(type_name = "basic_state", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BasicState {
    #[default]
    Active,
    Inactive,
    Deleted,
}

impl std::fmt::Display for BasicState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasicState::Active => write!(f, "ACTIVE"),
            BasicState::Inactive => write!(f, "INACTIVE"),
            BasicState::Deleted => write!(f, "DELETED"),
        }
    }
}

/// Identifier and lifecycle stamps common to all entities.
///
/// `id` stays `None` until the persistence layer assigns it and cannot be
/// changed from outside this crate afterwards. `updated_at` never precedes
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntity {
    id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    pub state: BasicState,
}

impl BaseEntity {
    /// Fresh, unsaved base with both stamps set to now
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            created_at: now,
            updated_at: now,
            state: BasicState::default(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assign the store-generated identifier. A no-op once an id is set.
    pub(crate) fn assign_id(&mut self, id: i64) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Refresh the modification stamp
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

impl Default for BaseEntity {
    fn default() -> Self {
        Self::new()
    }
}

/// A persisted domain record embedding a [`BaseEntity`]
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable type name used in error messages
    const NAME: &'static str;

    fn base(&self) -> &BaseEntity;

    fn base_mut(&mut self) -> &mut BaseEntity;

    fn id(&self) -> Option<i64> {
        self.base().id()
    }
}
