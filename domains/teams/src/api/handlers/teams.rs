//! Team resource API handlers
//!
//! Teams can be created, listed page by page, and fetched by id. Every
//! response body is a HAL representation with absolute links.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header::LOCATION, HeaderName, StatusCode},
};
use roster_common::{Entity, Error, HalJson, PageParams, RequestOrigin, Result, ValidatedJson};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::TeamsState;
use crate::api::resources::{team_model, team_page_model, TeamModel, TeamPageModel};
use crate::domain::entities::Team;

/// Request for creating a new team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    /// Team name
    #[validate(length(max = 255))]
    pub name: String,

    /// Brand the team plays for
    #[validate(length(max = 255))]
    pub maker: String,

    /// Founding year
    pub year: i32,
}

impl CreateTeamRequest {
    pub fn into_team(self) -> Team {
        Team::new(self.name, self.maker, self.year)
    }
}

/// Create a new team
///
/// **POST /teams**
///
/// Responds `201 Created` with the team representation and a `Location`
/// header pointing at its `self` link.
pub async fn create_team(
    State(state): State<TeamsState>,
    origin: RequestOrigin,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], HalJson<TeamModel>)> {
    let team = state.repos.teams.save(request.into_team()).await?;

    let model = team_model(team, &state.links_for(&origin));
    let location = model
        .self_link()
        .map(|link| link.href.clone())
        .ok_or_else(|| Error::Internal("Saved team has no identifier".to_string()))?;

    tracing::info!(
        team_id = ?model.content.id(),
        name = %model.content.name,
        "Team created"
    );

    Ok((StatusCode::CREATED, [(LOCATION, location)], HalJson(model)))
}

/// List teams one page at a time
///
/// **GET /teams?page=&size=**
///
/// `page` is zero-based. Missing or malformed parameters fall back to the
/// configured defaults.
pub async fn list_teams(
    State(state): State<TeamsState>,
    origin: RequestOrigin,
    params: std::result::Result<Query<PageParams>, QueryRejection>,
) -> Result<HalJson<TeamPageModel>> {
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let request = params.resolve(&state.paging);

    let page = state.repos.teams.find_all(request).await?;
    let model = team_page_model(page, &state.links_for(&origin));

    tracing::debug!(
        page = request.page(),
        size = request.size(),
        returned = model.items().len(),
        total = model.page().total_elements,
        "Listed teams"
    );

    Ok(HalJson(model))
}

/// Get a single team
///
/// **GET /teams/{id}**
pub async fn get_team(
    State(state): State<TeamsState>,
    origin: RequestOrigin,
    Path(team_id): Path<i64>,
) -> Result<HalJson<TeamModel>> {
    let team = state
        .repos
        .teams
        .find_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Team {} not found", team_id)))?;

    Ok(HalJson(team_model(team, &state.links_for(&origin))))
}
