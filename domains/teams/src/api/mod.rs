//! API layer for the Teams domain
//!
//! Contains HTTP handlers, HAL resources, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod resources;
pub mod routes;

pub use middleware::TeamsState;
pub use routes::routes;
