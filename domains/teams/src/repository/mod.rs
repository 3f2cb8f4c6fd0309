//! Repository implementations for Teams domain

pub mod members;
pub mod memory;
pub mod teams;

use std::sync::Arc;

use roster_common::Repository;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

use crate::domain::entities::{Member, Team};

pub use members::PgMemberRepository;
pub use memory::{MemoryMemberRepository, MemoryTeamRepository};
pub use teams::PgTeamRepository;

/// Schema migrations for the `team` and `member` tables
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply pending migrations
pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Combined repository access for the Teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pub teams: Arc<dyn Repository<Team>>,
    pub members: Arc<dyn Repository<Member>>,
}

impl TeamsRepositories {
    /// Repositories backed by Postgres
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teams: Arc::new(PgTeamRepository::new(pool.clone())),
            members: Arc::new(PgMemberRepository::new(pool)),
        }
    }

    /// Repositories backed by process memory; the member store checks
    /// references against the team store
    pub fn in_memory() -> Self {
        let teams = MemoryTeamRepository::new();
        Self {
            members: Arc::new(MemoryMemberRepository::new(teams.store())),
            teams: Arc::new(teams),
        }
    }
}
