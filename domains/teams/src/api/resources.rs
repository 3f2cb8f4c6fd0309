//! HAL representations of team resources

use crate::domain::entities::Team;
use roster_common::hal::{LIST_REL, SELF_REL};
use roster_common::{Entity, EntityModel, LinkBuilder, Links, Page, PagedModel};

/// Path segment of the team collection
pub const TEAMS_PATH: &str = "teams";

/// Key teams are embedded under in collection responses
pub const TEAM_LIST_REL: &str = "teamList";

pub type TeamModel = EntityModel<Team>;
pub type TeamPageModel = PagedModel<Team>;

/// Link builder for the team collection below `origin`
pub fn teams_collection(origin: &LinkBuilder) -> LinkBuilder {
    origin.slash(TEAMS_PATH)
}

/// Wrap a team with its `self` and `list` links.
///
/// An unsaved team has no `self` link.
pub fn team_model(team: Team, origin: &LinkBuilder) -> TeamModel {
    let collection = teams_collection(origin);

    let mut links = Links::new();
    if let Some(id) = team.id() {
        links.push(SELF_REL, collection.slash(id).to_link());
    }
    links.push(LIST_REL, collection.to_link());

    EntityModel::new(team, links)
}

/// Wrap a page of teams, giving each element its own links
pub fn team_page_model(page: Page<Team>, origin: &LinkBuilder) -> TeamPageModel {
    PagedModel::assemble(page, TEAM_LIST_REL, &teams_collection(origin), |team| {
        team_model(team, origin)
    })
}
