//! Person directory domain service.
//!
//! Implements the driving ports on top of any [`PersonDirectory`]. Each
//! operation performs one upstream round trip (or one read followed by one
//! write for `add`) and maps [`PersonDirectoryError`] into the domain
//! [`Error`] taxonomy.
//!
//! The duplicate-name check in [`PersonsCommand::add`] reads the collection
//! and then writes, so two concurrent adds with the same name can both pass
//! it. An upstream `409 Conflict` is treated as the authoritative duplicate
//! signal.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    DELETE_OK_STATUS, PersonDirectory, PersonDirectoryError, PersonsCommand, PersonsQuery,
};
use crate::domain::{AddPersonRequest, Error, Person, PersonId, PhoneFilter};

const DUPLICATE_NAME_MESSAGE: &str = "Name must be unique";

/// Person directory service implementing the driving ports.
#[derive(Clone)]
pub struct PersonDirectoryService<D> {
    directory: Arc<D>,
}

impl<D> PersonDirectoryService<D> {
    /// Create a new service over the given directory adapter.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D> PersonDirectoryService<D>
where
    D: PersonDirectory,
{
    async fn fetch_all(&self) -> Result<Vec<Person>, Error> {
        self.directory.list().await.map_err(Self::map_list_error)
    }

    fn map_list_error(error: PersonDirectoryError) -> Error {
        warn!(%error, "listing persons failed");
        match error {
            PersonDirectoryError::Decode { message } => {
                Error::internal(format!("person listing could not be decoded: {message}"))
            }
            other => Error::upstream_unavailable(format!(
                "The person directory is unavailable: {other}"
            )),
        }
    }

    fn duplicate_name(name: &str) -> Error {
        Error::invalid_request(DUPLICATE_NAME_MESSAGE).with_details(json!({ "invalidArgs": name }))
    }

    fn map_create_error(error: PersonDirectoryError, name: &str) -> Error {
        warn!(%error, name, "creating person failed");
        match error {
            PersonDirectoryError::Conflict { .. } => Self::duplicate_name(name),
            other if other.is_unreachable() => Self::unreachable(&other),
            other => Error::creation_failed("The person could not be created")
                .with_details(json!({ "reason": other.to_string() })),
        }
    }

    fn map_update_error(error: PersonDirectoryError, id: &PersonId) -> Error {
        warn!(%error, id = %id, "updating phone failed");
        match error {
            PersonDirectoryError::NotFound { .. } => {
                Error::not_found("Person not found").with_details(json!({ "id": id.as_str() }))
            }
            other if other.is_unreachable() => Self::unreachable(&other),
            other => Error::update_failed("The person phone number could not be updated")
                .with_details(json!({ "reason": other.to_string() })),
        }
    }

    fn map_delete_error(error: PersonDirectoryError, id: &PersonId) -> Error {
        warn!(%error, id = %id, "deleting person failed");
        if error.is_unreachable() {
            return Self::unreachable(&error);
        }
        Error::deletion_failed("The person could not be deleted")
            .with_details(json!({ "reason": error.to_string() }))
    }

    fn unreachable(error: &PersonDirectoryError) -> Error {
        Error::upstream_unavailable(format!("The person directory is unavailable: {error}"))
    }
}

#[async_trait]
impl<D> PersonsQuery for PersonDirectoryService<D>
where
    D: PersonDirectory,
{
    async fn count(&self) -> Result<usize, Error> {
        Ok(self.fetch_all().await?.len())
    }

    async fn all(&self, filter: Option<PhoneFilter>) -> Result<Vec<Person>, Error> {
        let persons = self.fetch_all().await?;
        Ok(match filter {
            None => persons,
            Some(filter) => persons
                .into_iter()
                .filter(|person| filter.matches(person))
                .collect(),
        })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, Error> {
        let persons = self.fetch_all().await?;
        Ok(persons.into_iter().find(|person| person.name == name))
    }
}

#[async_trait]
impl<D> PersonsCommand for PersonDirectoryService<D>
where
    D: PersonDirectory,
{
    async fn add(&self, request: AddPersonRequest) -> Result<Person, Error> {
        let persons = self.fetch_all().await?;
        if persons.iter().any(|person| person.name == request.name) {
            info!(name = %request.name, "rejecting duplicate person name");
            return Err(Self::duplicate_name(&request.name));
        }

        let person = request.into_person(PersonId::random());
        let created = self
            .directory
            .create(&person)
            .await
            .map_err(|error| Self::map_create_error(error, &person.name))?;
        info!(id = %created.id, "person created");
        Ok(created)
    }

    async fn edit_phone(&self, id: &PersonId, phone: &str) -> Result<Person, Error> {
        let updated = self
            .directory
            .update_phone(id, phone)
            .await
            .map_err(|error| Self::map_update_error(error, id))?;
        info!(id = %updated.id, "person phone updated");
        Ok(updated)
    }

    async fn delete(&self, id: &PersonId) -> Result<u16, Error> {
        let status = self
            .directory
            .delete(id)
            .await
            .map_err(|error| Self::map_delete_error(error, id))?;
        if status != DELETE_OK_STATUS {
            warn!(id = %id, status, "directory refused deletion");
            return Err(Error::deletion_failed("The person could not be deleted")
                .with_details(json!({ "status": status })));
        }
        info!(id = %id, "person deleted");
        Ok(status)
    }
}

#[cfg(test)]
#[path = "persons_service_tests.rs"]
mod tests;
