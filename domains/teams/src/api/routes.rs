//! Route definitions for Teams domain API

use axum::{routing::get, Router};

use super::handlers::teams;
use super::middleware::TeamsState;

/// Create team resource routes
fn team_routes() -> Router<TeamsState> {
    Router::new()
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/{id}", get(teams::get_team))
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new().merge(team_routes())
}
