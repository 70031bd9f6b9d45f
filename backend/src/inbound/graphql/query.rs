//! `Query` root resolvers.

use async_graphql::{Context, Object, Result};

use super::error::into_graphql;
use super::types::{PersonObject, YesNo};
use super::GraphQlState;

/// Read-only root type.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Number of persons currently held by the directory.
    async fn person_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let state = ctx.data::<GraphQlState>()?;
        let count = into_graphql(state.persons_query.count().await)?;
        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }

    /// Every person, optionally narrowed to those with (`YES`) or without
    /// (`NO`) a phone number.
    async fn all_persons(
        &self,
        ctx: &Context<'_>,
        phone: Option<YesNo>,
    ) -> Result<Vec<PersonObject>> {
        let state = ctx.data::<GraphQlState>()?;
        let persons = into_graphql(state.persons_query.all(phone.map(Into::into)).await)?;
        Ok(persons.into_iter().map(PersonObject::from).collect())
    }

    /// First person whose name matches exactly.
    async fn find_person(&self, ctx: &Context<'_>, name: String) -> Result<Option<PersonObject>> {
        let state = ctx.data::<GraphQlState>()?;
        let person = into_graphql(state.persons_query.find_by_name(&name).await)?;
        Ok(person.map(PersonObject::from))
    }
}
