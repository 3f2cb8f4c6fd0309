//! Shared building blocks for Roster
//!
//! This crate provides common functionality used across the Roster service:
//! - Entity base and the generic repository abstraction
//! - Paging and HAL resource representations
//! - Configuration management following 12-factor principles
//! - Error types and handling

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod hal;
pub mod paging;
pub mod repository;

pub use config::{Config, StorageBackend};
pub use db::RepositoryError;
pub use entity::{BaseEntity, BasicState, Entity};
pub use error::{Error, Result};
pub use extractors::{RequestOrigin, ValidatedJson};
pub use hal::{EntityModel, HalJson, Link, LinkBuilder, Links, PageMetadata, PagedModel};
pub use paging::{Page, PageParams, PageRequest, PagingConfig};
pub use repository::{MemoryStore, Repository, RepositoryResult};
