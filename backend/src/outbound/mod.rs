//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **directory**: reqwest-backed client for the upstream person collection.
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no business logic.

pub mod directory;
