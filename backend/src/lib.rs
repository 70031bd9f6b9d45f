//! GraphQL gateway exposing a person directory backed by a REST collection.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] owns the person model, error taxonomy and ports.
//! - [`outbound`] implements the driven ports against the upstream REST API.
//! - [`inbound`] serves the GraphQL schema and health probes over HTTP.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use domain::TraceId;
pub use middleware::Trace;
