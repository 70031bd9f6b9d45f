//! GraphQL inbound adapter.
//!
//! Declares the schema (`Person`, `Address`, `Query`, `Mutation`, `YesNo`)
//! and binds each root field to a driving port. Resolvers hold no state of
//! their own; the ports arrive through [`GraphQlState`] in the schema data.

mod error;
mod mutation;
mod query;
mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::domain::ports::{PersonDirectory, PersonsCommand, PersonsQuery};
use crate::domain::PersonDirectoryService;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{AddressObject, PersonObject, YesNo};

/// Executable schema served by the gateway.
pub type PersonSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Ports injected into every resolver.
#[derive(Clone)]
pub struct GraphQlState {
    pub persons_query: Arc<dyn PersonsQuery>,
    pub persons_command: Arc<dyn PersonsCommand>,
}

impl GraphQlState {
    /// Bundle explicit query and command ports.
    pub fn new(
        persons_query: Arc<dyn PersonsQuery>,
        persons_command: Arc<dyn PersonsCommand>,
    ) -> Self {
        Self {
            persons_query,
            persons_command,
        }
    }

    /// Serve both roots from one [`PersonDirectoryService`] over `directory`.
    pub fn from_directory<D>(directory: Arc<D>) -> Self
    where
        D: PersonDirectory + 'static,
    {
        let service = Arc::new(PersonDirectoryService::new(directory));
        Self::new(service.clone(), service)
    }
}

/// Build the executable schema with `state` available to resolvers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use person_gateway::domain::ports::FixturePersonDirectory;
/// use person_gateway::inbound::graphql::{GraphQlState, build_schema};
///
/// let schema = build_schema(GraphQlState::from_directory(Arc::new(
///     FixturePersonDirectory::default(),
/// )));
/// assert!(schema.sdl().contains("enum YesNo"));
/// ```
pub fn build_schema(state: GraphQlState) -> PersonSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

/// Schema definition language for the gateway, without executable state.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
