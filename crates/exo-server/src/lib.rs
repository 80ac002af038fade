//! Local reflection endpoint.
//!
//! Echoes posted planet JSON back to the caller. Holds no state between
//! requests and persists nothing.

pub mod routes;
pub mod server;

pub use routes::{HABITABILITY_FIELDS, PLANET_DATA_FIELDS, RouteResponse, route};
pub use server::{ReflectionServer, ReflectionServerError};
