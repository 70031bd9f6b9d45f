//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod person_directory;
mod persons_command;
mod persons_query;

#[cfg(test)]
pub use person_directory::MockPersonDirectory;
#[cfg(any(test, feature = "test-support"))]
pub use person_directory::FixturePersonDirectory;
pub use person_directory::{DELETE_OK_STATUS, PersonDirectory, PersonDirectoryError};
#[cfg(test)]
pub use persons_command::MockPersonsCommand;
pub use persons_command::PersonsCommand;
#[cfg(test)]
pub use persons_query::MockPersonsQuery;
pub use persons_query::PersonsQuery;
