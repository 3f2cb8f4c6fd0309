//! Domain entities for the Roster teams domain
//!
//! Entities are plain records embedding a [`BaseEntity`]. Construction takes
//! every required field; there are no defaults beyond the base stamps.

use roster_common::{BaseEntity, Entity, Error, Result};
use serde::Serialize;

/// Width of the text columns backing entity names
pub const MAX_TEXT_LEN: usize = 255;

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Team {
    #[serde(flatten)]
    #[sqlx(flatten)]
    base: BaseEntity,
    #[sqlx(rename = "team_name")]
    pub name: String,
    pub maker: String,
    pub year: i32,
}

impl Team {
    /// Create a new, unsaved team
    pub fn new(name: impl Into<String>, maker: impl Into<String>, year: i32) -> Self {
        Team {
            base: BaseEntity::new(),
            name: name.into(),
            maker: maker.into(),
            year,
        }
    }

    /// Check the column constraints before a write
    pub fn validate(&self) -> Result<()> {
        validate_text("Team name", &self.name)?;
        validate_text("Team maker", &self.maker)?;
        Ok(())
    }
}

impl Entity for Team {
    const NAME: &'static str = "Team";

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }
}

/// Member entity - belongs to exactly one team
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(flatten)]
    #[sqlx(flatten)]
    base: BaseEntity,
    team_id: i64,
    #[sqlx(rename = "member_name")]
    pub name: String,
}

impl Member {
    /// Create a new member of a persisted team.
    ///
    /// Fails with `NotFound` when `team` has not been saved yet, since there
    /// is nothing for the member to reference.
    pub fn new(team: &Team, name: impl Into<String>) -> Result<Self> {
        let team_id = team.id().ok_or_else(|| {
            Error::NotFound("Team must be persisted before members can reference it".to_string())
        })?;

        let member = Member {
            base: BaseEntity::new(),
            team_id,
            name: name.into(),
        };
        member.validate()?;
        Ok(member)
    }

    /// Identifier of the team this member belongs to
    pub fn team_id(&self) -> i64 {
        self.team_id
    }

    pub fn belongs_to(&self, team: &Team) -> bool {
        team.id() == Some(self.team_id)
    }

    /// Check the column constraints before a write
    pub fn validate(&self) -> Result<()> {
        validate_text("Member name", &self.name)
    }
}

impl Entity for Member {
    const NAME: &'static str = "Member";

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }
}

#[mutants::skip] // Boundary covered by the entity length tests
fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(())
}
