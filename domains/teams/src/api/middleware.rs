//! Teams domain state shared by every handler

use crate::TeamsRepositories;
use roster_common::{Config, LinkBuilder, PagingConfig, RequestOrigin};

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub repos: TeamsRepositories,
    pub paging: PagingConfig,
    /// Origin for links when the request carries no Host header
    pub public_base_url: String,
}

impl TeamsState {
    pub fn new(repos: TeamsRepositories, config: &Config) -> Self {
        Self {
            repos,
            paging: config.paging,
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Link builder rooted at the origin the client used
    pub fn links_for(&self, origin: &RequestOrigin) -> LinkBuilder {
        origin.links(&self.public_base_url)
    }
}
