//! Inbound adapters translating external requests into domain port calls.
//!
//! The GraphQL schema lives under [`graphql`]; [`http`] mounts it on Actix
//! alongside the health probes.

pub mod graphql;
pub mod http;
