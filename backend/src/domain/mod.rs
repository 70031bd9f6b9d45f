//! Domain primitives, services and ports.
//!
//! Purpose: Define the person directory model and the resolver logic that sits
//! between the GraphQL surface and the upstream REST collection. Nothing in
//! this module knows about HTTP or GraphQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable failure category.
//! - Person, PersonId, Address, PhoneFilter: directory records and views.
//! - PersonDirectoryService: implementation of the driving ports.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod person;
pub mod ports;
mod persons_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::person::{
    AddPersonRequest, Address, Person, PersonId, PersonIdValidationError, PhoneFilter,
};
pub use self::persons_service::PersonDirectoryService;
pub use self::trace_id::TraceId;

/// HTTP header carrying the trace identifier on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";
