//! Driving port for person mutations.

use async_trait::async_trait;

use crate::domain::{AddPersonRequest, Error, Person, PersonId};

/// Use-case port backing the GraphQL `Mutation` root.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsCommand: Send + Sync {
    /// Create a person with a unique name under a freshly generated id.
    async fn add(&self, request: AddPersonRequest) -> Result<Person, Error>;

    /// Replace the phone number of an existing person.
    async fn edit_phone(&self, id: &PersonId, phone: &str) -> Result<Person, Error>;

    /// Delete a person, returning the upstream status code on success.
    async fn delete(&self, id: &PersonId) -> Result<u16, Error>;
}
