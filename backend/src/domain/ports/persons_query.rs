//! Driving port for read-only person queries.

use async_trait::async_trait;

use crate::domain::{Error, Person, PhoneFilter};

/// Use-case port backing the GraphQL `Query` root.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsQuery: Send + Sync {
    /// Number of persons currently in the directory.
    async fn count(&self) -> Result<usize, Error>;

    /// Every person, optionally narrowed by phone presence, in upstream order.
    async fn all(&self, filter: Option<PhoneFilter>) -> Result<Vec<Person>, Error>;

    /// First person whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, Error>;
}
