//! Teams domain: teams, members, and the team resource API

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{
    run_migrations, MemoryMemberRepository, MemoryTeamRepository, PgMemberRepository,
    PgTeamRepository, TeamsRepositories, MIGRATOR,
};

// Re-export API types
pub use api::handlers::teams::CreateTeamRequest;
pub use api::resources::{team_model, team_page_model, TeamModel, TeamPageModel, TEAM_LIST_REL};
pub use api::routes;
pub use api::TeamsState;
