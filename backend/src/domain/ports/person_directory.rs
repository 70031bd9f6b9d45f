//! Driven port for the upstream person directory.
//!
//! One method per upstream REST call. Adapters translate transport failures
//! into [`PersonDirectoryError`] so the domain can decide which GraphQL error
//! category each failure belongs to.

use async_trait::async_trait;

use crate::domain::{Person, PersonId};

use super::define_port_error;

/// Status code the upstream returns for a successful delete.
pub const DELETE_OK_STATUS: u16 = 200;

define_port_error! {
    /// Errors surfaced while calling the upstream directory.
    pub enum PersonDirectoryError {
        /// Network transport failed before a response was received.
        Transport { message: String } =>
            "directory transport failed: {message}",
        /// The upstream call exceeded its timeout.
        Timeout { message: String } =>
            "directory timeout: {message}",
        /// The upstream answered that the targeted person does not exist.
        NotFound { message: String } =>
            "directory person not found: {message}",
        /// The upstream rejected the write as conflicting with existing data.
        Conflict { message: String } =>
            "directory conflict: {message}",
        /// The upstream answered with any other non-success status.
        Rejected { status: u16, message: String } =>
            "directory rejected request with status {status}: {message}",
        /// The upstream response body could not be decoded into a person.
        Decode { message: String } =>
            "directory response decode failed: {message}",
    }
}

impl PersonDirectoryError {
    /// Whether the failure happened before the upstream produced an answer.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

/// Port for reading and mutating the upstream person collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Fetch the whole collection in upstream order.
    async fn list(&self) -> Result<Vec<Person>, PersonDirectoryError>;

    /// Create `person` and return the record the upstream confirmed.
    async fn create(&self, person: &Person) -> Result<Person, PersonDirectoryError>;

    /// Replace only the phone of the person with `id`.
    async fn update_phone(
        &self,
        id: &PersonId,
        phone: &str,
    ) -> Result<Person, PersonDirectoryError>;

    /// Delete the person with `id`, returning the raw upstream status code.
    ///
    /// Any received response yields `Ok`; only transport-level failures are
    /// errors. Callers judge success by comparing with [`DELETE_OK_STATUS`].
    async fn delete(&self, id: &PersonId) -> Result<u16, PersonDirectoryError>;
}

/// Fixture directory serving a fixed collection and echoing writes.
///
/// Only compiled for tests and the `test-support` feature; the gateway binary
/// always talks to a real upstream.
///
/// Nothing is stored: `create` returns its input, `update_phone` returns the
/// matching fixture person with the new phone, and `delete` reports success
/// for ids present in the fixture.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FixturePersonDirectory {
    persons: Vec<Person>,
}

#[cfg(any(test, feature = "test-support"))]
impl FixturePersonDirectory {
    /// Serve `persons` as the upstream collection.
    pub fn new(persons: Vec<Person>) -> Self {
        Self { persons }
    }

    fn find(&self, id: &PersonId) -> Option<&Person> {
        self.persons.iter().find(|person| &person.id == id)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl PersonDirectory for FixturePersonDirectory {
    async fn list(&self) -> Result<Vec<Person>, PersonDirectoryError> {
        Ok(self.persons.clone())
    }

    async fn create(&self, person: &Person) -> Result<Person, PersonDirectoryError> {
        if self.persons.iter().any(|existing| existing.name == person.name) {
            return Err(PersonDirectoryError::conflict(person.name.as_str()));
        }
        Ok(person.clone())
    }

    async fn update_phone(
        &self,
        id: &PersonId,
        phone: &str,
    ) -> Result<Person, PersonDirectoryError> {
        let person = self
            .find(id)
            .ok_or_else(|| PersonDirectoryError::not_found(id.as_str()))?;
        Ok(Person {
            phone: Some(phone.to_owned()),
            ..person.clone()
        })
    }

    async fn delete(&self, id: &PersonId) -> Result<u16, PersonDirectoryError> {
        Ok(if self.find(id).is_some() {
            DELETE_OK_STATUS
        } else {
            404
        })
    }
}
