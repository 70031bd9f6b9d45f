//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the GraphQL schema,
//! currently trace correlation.

pub mod trace;

pub use trace::Trace;
