//! GraphQL adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type GraphQL-agnostic while giving clients
//! a stable `extensions.code` to branch on. Internal errors are redacted
//! before they leave the process.

use async_graphql::{ErrorExtensions, Value};
use tracing::warn;

use crate::domain::Error;

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        let safe = self.redacted();
        async_graphql::Error::new(safe.message()).extend_with(|_, extensions| {
            extensions.set("code", safe.code().as_str().to_owned());
            if let Some(trace_id) = safe.trace_id() {
                extensions.set("traceId", trace_id.to_owned());
            }
            let Some(serde_json::Value::Object(details)) = safe.details() else {
                return;
            };
            for (key, value) in details {
                match Value::from_json(value.clone()) {
                    Ok(value) => extensions.set(key, value),
                    Err(error) => warn!(%error, key, "dropping unconvertible error detail"),
                }
            }
        })
    }
}

/// Convert a domain result into a GraphQL result carrying error extensions.
pub(crate) fn into_graphql<T>(result: Result<T, Error>) -> async_graphql::Result<T> {
    result.map_err(|error| error.extend())
}
