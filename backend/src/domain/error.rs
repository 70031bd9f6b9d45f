//! Domain-level error types.
//!
//! These errors are transport agnostic. The GraphQL adapter maps them to
//! error extensions; nothing here depends on a wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

const REDACTED_MESSAGE: &str = "Internal server error";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Client supplied data failed a rule checked before any write.
    InvalidRequest,
    /// The targeted person does not exist upstream.
    NotFound,
    /// The upstream create call produced no usable record.
    CreationFailed,
    /// The upstream partial update produced no usable record.
    UpdateFailed,
    /// The upstream delete call did not answer with `200 OK`.
    DeletionFailed,
    /// The upstream directory could not be reached or failed to answer.
    UpstreamUnavailable,
    /// An unexpected error occurred inside the gateway.
    InternalError,
}

impl ErrorCode {
    /// Wire identifier placed in GraphQL error extensions.
    ///
    /// # Examples
    /// ```
    /// use person_gateway::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::InvalidRequest.as_str(), "BAD_USER_INPUT");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "BAD_USER_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::CreationFailed => "CREATION_FAILED",
            Self::UpdateFailed => "UPDATE_FAILED",
            Self::DeletionFailed => "DELETION_FAILED",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::InternalError => "INTERNAL_SERVER_ERROR",
        }
    }
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use person_gateway::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was built.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    ///
    /// # Examples
    /// ```
    /// use person_gateway::domain::Error;
    ///
    /// let err = Error::not_found("missing").with_trace_id("abc");
    /// assert_eq!(err.trace_id(), Some("abc"));
    /// ```
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use person_gateway::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("Name must be unique")
    ///     .with_details(json!({ "invalidArgs": "David" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Return a copy that is safe to show to clients.
    ///
    /// Internal errors lose their message and details; every other category
    /// is returned unchanged.
    pub fn redacted(&self) -> Self {
        if matches!(self.code, ErrorCode::InternalError) {
            Self {
                code: ErrorCode::InternalError,
                message: REDACTED_MESSAGE.to_owned(),
                trace_id: self.trace_id.clone(),
                details: None,
            }
        } else {
            self.clone()
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::CreationFailed`].
    pub fn creation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CreationFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::UpdateFailed`].
    pub fn update_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpdateFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::DeletionFailed`].
    pub fn deletion_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeletionFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamUnavailable`].
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Tests for error construction, trace capture and redaction.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest, "BAD_USER_INPUT")]
    #[case(Error::not_found("missing"), ErrorCode::NotFound, "NOT_FOUND")]
    #[case(Error::creation_failed("no"), ErrorCode::CreationFailed, "CREATION_FAILED")]
    #[case(Error::update_failed("no"), ErrorCode::UpdateFailed, "UPDATE_FAILED")]
    #[case(Error::deletion_failed("no"), ErrorCode::DeletionFailed, "DELETION_FAILED")]
    #[case(
        Error::upstream_unavailable("down"),
        ErrorCode::UpstreamUnavailable,
        "UPSTREAM_UNAVAILABLE"
    )]
    #[case(Error::internal("boom"), ErrorCode::InternalError, "INTERNAL_SERVER_ERROR")]
    fn constructors_set_code(
        #[case] error: Error,
        #[case] expected: ErrorCode,
        #[case] wire: &str,
    ) {
        assert_eq!(error.code(), expected);
        assert_eq!(error.code().as_str(), wire);
    }

    #[tokio::test]
    async fn new_captures_trace_id_in_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let expected = trace_id.to_string();
        let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(expected.as_str()));
    }

    #[test]
    fn new_returns_none_when_out_of_scope() {
        let error = Error::internal("boom");
        assert!(error.trace_id().is_none());
    }

    #[test]
    fn redaction_hides_internal_message_and_details() {
        let error = Error::internal("database password leaked")
            .with_trace_id("abc")
            .with_details(json!({ "secret": "x" }));

        let redacted = error.redacted();
        assert_eq!(redacted.message(), REDACTED_MESSAGE);
        assert!(redacted.details().is_none());
        assert_eq!(redacted.trace_id(), Some("abc"));
    }

    #[test]
    fn redaction_keeps_client_errors_intact() {
        let error =
            Error::invalid_request("Name must be unique").with_details(json!({ "invalidArgs": "David" }));
        assert_eq!(error.redacted(), error);
    }

    #[test]
    fn serialises_with_camel_case_fields() {
        let error = Error::deletion_failed("The person could not be deleted")
            .with_trace_id("abc")
            .with_details(json!({ "status": 404 }));
        let value = serde_json::to_value(&error).expect("serialise error");
        assert_eq!(
            value,
            json!({
                "code": "DELETION_FAILED",
                "message": "The person could not be deleted",
                "traceId": "abc",
                "details": { "status": 404 }
            })
        );
    }
}
