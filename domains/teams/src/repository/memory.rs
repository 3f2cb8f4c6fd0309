//! In-memory repositories for the `memory` storage backend and tests

use crate::domain::entities::{Member, Team};
use async_trait::async_trait;
use roster_common::{
    Entity, MemoryStore, Page, PageRequest, Repository, RepositoryError, RepositoryResult,
};

/// Team store that applies the same column checks as the Postgres table
#[derive(Clone, Default)]
pub struct MemoryTeamRepository {
    teams: MemoryStore<Team>,
}

impl MemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying table, shared with member reference checks
    pub fn store(&self) -> MemoryStore<Team> {
        self.teams.clone()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[async_trait]
impl Repository<Team> for MemoryTeamRepository {
    async fn save(&self, team: Team) -> RepositoryResult<Team> {
        team.validate()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        self.teams.upsert(team)
    }

    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<Team>> {
        Ok(self.teams.page(request))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        Ok(self.teams.get(id))
    }
}

/// Member store that checks team references against a shared team store
#[derive(Clone)]
pub struct MemoryMemberRepository {
    members: MemoryStore<Member>,
    teams: MemoryStore<Team>,
}

impl MemoryMemberRepository {
    pub fn new(teams: MemoryStore<Team>) -> Self {
        Self {
            members: MemoryStore::new(),
            teams,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[async_trait]
impl Repository<Member> for MemoryMemberRepository {
    async fn save(&self, member: Member) -> RepositoryResult<Member> {
        member
            .validate()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        if !self.teams.contains(member.team_id()) {
            return Err(RepositoryError::Referential(format!(
                "Team {} does not exist",
                member.team_id()
            )));
        }

        self.members.upsert(member)
    }

    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<Member>> {
        Ok(self.members.page(request))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        Ok(self.members.get(id))
    }
}
