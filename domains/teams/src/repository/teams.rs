//! Team repository

use crate::domain::entities::Team;
use async_trait::async_trait;
use roster_common::{Entity, Page, PageRequest, Repository, RepositoryError, RepositoryResult};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, team: &Team) -> RepositoryResult<Team> {
        let created = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO team (team_name, maker, year, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, team_name, maker, year, state, created_at, updated_at
            "#,
        )
        .bind(&team.name)
        .bind(&team.maker)
        .bind(team.year)
        .bind(team.base().state)
        .bind(team.base().created_at())
        .bind(team.base().updated_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i64, team: &Team) -> RepositoryResult<Team> {
        let updated = sqlx::query_as::<_, Team>(
            r#"
            UPDATE team
            SET team_name = $2, maker = $3, year = $4, state = $5,
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING id, team_name, maker, year, state, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&team.name)
        .bind(&team.maker)
        .bind(team.year)
        .bind(team.base().state)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| RepositoryError::NotFound(format!("Team {} does not exist", id)))
    }
}

#[async_trait]
impl Repository<Team> for PgTeamRepository {
    async fn save(&self, team: Team) -> RepositoryResult<Team> {
        team.validate()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        match team.id() {
            Some(id) => self.update(id, &team).await,
            None => self.insert(&team).await,
        }
    }

    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<Team>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team")
            .fetch_one(&self.pool)
            .await?;

        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, team_name, maker, year, state, created_at, updated_at
            FROM team
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(request.size()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(teams, request, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, team_name, maker, year, state, created_at, updated_at
            FROM team
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM team WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
