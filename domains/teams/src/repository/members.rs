//! Member repository
//!
//! Members reference a team through `member.team_id`; the foreign key keeps
//! that reference valid and a violation surfaces as a referential error.

use crate::domain::entities::Member;
use async_trait::async_trait;
use roster_common::{Entity, Page, PageRequest, Repository, RepositoryError, RepositoryResult};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List members of a team in insertion order
    pub async fn list_by_team(&self, team_id: i64) -> RepositoryResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, team_id, member_name, state, created_at, updated_at
            FROM member
            WHERE team_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn insert(&self, member: &Member) -> RepositoryResult<Member> {
        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO member (team_id, member_name, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, team_id, member_name, state, created_at, updated_at
            "#,
        )
        .bind(member.team_id())
        .bind(&member.name)
        .bind(member.base().state)
        .bind(member.base().created_at())
        .bind(member.base().updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| referential(e, member.team_id()))?;

        Ok(created)
    }

    async fn update(&self, id: i64, member: &Member) -> RepositoryResult<Member> {
        let updated = sqlx::query_as::<_, Member>(
            r#"
            UPDATE member
            SET member_name = $2, state = $3,
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING id, team_id, member_name, state, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&member.name)
        .bind(member.base().state)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| RepositoryError::NotFound(format!("Member {} does not exist", id)))
    }
}

/// Name the missing team when the insert trips the foreign key
fn referential(err: sqlx::Error, team_id: i64) -> RepositoryError {
    match RepositoryError::from(err) {
        RepositoryError::Referential(_) => {
            RepositoryError::Referential(format!("Team {} does not exist", team_id))
        }
        other => other,
    }
}

#[async_trait]
impl Repository<Member> for PgMemberRepository {
    async fn save(&self, member: Member) -> RepositoryResult<Member> {
        member
            .validate()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        match member.id() {
            Some(id) => self.update(id, &member).await,
            None => self.insert(&member).await,
        }
    }

    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<Member>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await?;

        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, team_id, member_name, state, created_at, updated_at
            FROM member
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(request.size()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(members, request, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, team_id, member_name, state, created_at, updated_at
            FROM member
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }
}
