//! `Mutation` root resolvers.

use async_graphql::{Context, ID, Object, Result};

use super::error::into_graphql;
use super::types::PersonObject;
use super::GraphQlState;
use crate::domain::{AddPersonRequest, Error, PersonId};

/// Write root type.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutationRoot;

fn parse_id(id: ID) -> Result<PersonId> {
    into_graphql(PersonId::new(id.0).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(serde_json::json!({
            "invalidArgs": "id"
        }))
    }))
}

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create a person; the name must not already be taken.
    async fn add_person(
        &self,
        ctx: &Context<'_>,
        name: String,
        phone: Option<String>,
        street: String,
        city: String,
    ) -> Result<Option<PersonObject>> {
        let state = ctx.data::<GraphQlState>()?;
        let request = AddPersonRequest {
            name,
            phone,
            street,
            city,
        };
        let person = into_graphql(state.persons_command.add(request).await)?;
        Ok(Some(person.into()))
    }

    /// Replace the phone number of the person with `id`.
    async fn edit_number(
        &self,
        ctx: &Context<'_>,
        id: ID,
        phone: String,
    ) -> Result<Option<PersonObject>> {
        let state = ctx.data::<GraphQlState>()?;
        let id = parse_id(id)?;
        let person = into_graphql(state.persons_command.edit_phone(&id, &phone).await)?;
        Ok(Some(person.into()))
    }

    /// Delete the person with `id`, returning the upstream status code.
    async fn delete_person(&self, ctx: &Context<'_>, id: ID) -> Result<Option<i32>> {
        let state = ctx.data::<GraphQlState>()?;
        let id = parse_id(id)?;
        let status = into_graphql(state.persons_command.delete(&id).await)?;
        Ok(Some(i32::from(status)))
    }
}
