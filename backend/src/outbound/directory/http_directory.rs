//! Reqwest-backed person directory adapter.
//!
//! This adapter owns transport details only: URL construction, request
//! serialisation, timeout and HTTP status mapping, and JSON decoding into
//! domain persons. The active trace identifier is forwarded upstream in the
//! `trace-id` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use tracing::debug;

use super::dto::{NewPersonDto, PersonDto, PhonePatchDto};
use crate::domain::ports::{PersonDirectory, PersonDirectoryError};
use crate::domain::{Person, PersonId, TRACE_ID_HEADER, TraceId};

const RESOURCE_SEGMENT: &str = "persons";
const USER_AGENT: &str = concat!("person-gateway/", env!("CARGO_PKG_VERSION"));

/// Errors raised while constructing [`HttpPersonDirectory`].
#[derive(Debug, thiserror::Error)]
pub enum HttpDirectoryBuildError {
    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("upstream base url `{url}` cannot carry a path")]
    InvalidBaseUrl { url: String },
    /// The reqwest client could not be constructed.
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Person directory adapter speaking JSON over HTTP to `<base>/persons`.
pub struct HttpPersonDirectory {
    client: Client,
    base_url: Url,
}

struct DirectoryResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl HttpPersonDirectory {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let directory = HttpPersonDirectory::new(base_url, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the base URL cannot hold a path or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, HttpDirectoryBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(HttpDirectoryBuildError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> Url {
        endpoint(&self.base_url, None)
    }

    fn person_url(&self, id: &PersonId) -> Url {
        endpoint(&self.base_url, Some(id.as_str()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        match TraceId::current() {
            Some(trace_id) => builder.header(TRACE_ID_HEADER, trace_id.to_string()),
            None => builder,
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<DirectoryResponse, PersonDirectoryError> {
        debug!(%method, %url, "calling person directory");
        let response = configure(self.request(method.clone(), url.clone()))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(%method, %url, status = status.as_u16(), "person directory answered");
        Ok(DirectoryResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl PersonDirectory for HttpPersonDirectory {
    async fn list(&self) -> Result<Vec<Person>, PersonDirectoryError> {
        let response = self
            .execute(Method::GET, self.collection_url(), |builder| builder)
            .await?;
        ensure_success(&response)?;
        parse_persons(&response.body)
    }

    async fn create(&self, person: &Person) -> Result<Person, PersonDirectoryError> {
        let payload = NewPersonDto::from(person);
        let response = self
            .execute(Method::POST, self.collection_url(), |builder| {
                builder.json(&payload)
            })
            .await?;
        ensure_success(&response)?;
        parse_person(&response.body)
    }

    async fn update_phone(
        &self,
        id: &PersonId,
        phone: &str,
    ) -> Result<Person, PersonDirectoryError> {
        let payload = PhonePatchDto { phone };
        let response = self
            .execute(Method::PATCH, self.person_url(id), |builder| {
                builder.json(&payload)
            })
            .await?;
        ensure_success(&response)?;
        parse_person(&response.body)
    }

    async fn delete(&self, id: &PersonId) -> Result<u16, PersonDirectoryError> {
        let response = self
            .execute(Method::DELETE, self.person_url(id), |builder| builder)
            .await?;
        Ok(response.status.as_u16())
    }
}

fn endpoint(base_url: &Url, id: Option<&str>) -> Url {
    let mut url = base_url.clone();
    // `new` rejects cannot-be-a-base URLs, so segments are always available.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(RESOURCE_SEGMENT);
        if let Some(id) = id {
            segments.push(id);
        }
    }
    url
}

fn ensure_success(response: &DirectoryResponse) -> Result<(), PersonDirectoryError> {
    if response.status.is_success() {
        Ok(())
    } else {
        Err(map_status_error(response.status, &response.body))
    }
}

fn parse_persons(body: &[u8]) -> Result<Vec<Person>, PersonDirectoryError> {
    let decoded: Vec<PersonDto> = serde_json::from_slice(body).map_err(|error| {
        PersonDirectoryError::decode(format!("invalid person listing payload: {error}"))
    })?;
    decoded
        .into_iter()
        .map(PersonDto::into_domain)
        .collect::<Result<_, _>>()
        .map_err(PersonDirectoryError::decode)
}

fn parse_person(body: &[u8]) -> Result<Person, PersonDirectoryError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PersonDirectoryError::decode("empty response body"));
    }
    let decoded: PersonDto = serde_json::from_slice(body).map_err(|error| {
        PersonDirectoryError::decode(format!("invalid person payload: {error}"))
    })?;
    decoded
        .into_domain()
        .map_err(PersonDirectoryError::decode)
}

fn map_transport_error(error: reqwest::Error) -> PersonDirectoryError {
    if error.is_timeout() {
        PersonDirectoryError::timeout(error.to_string())
    } else {
        PersonDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PersonDirectoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => PersonDirectoryError::not_found(message),
        StatusCode::CONFLICT => PersonDirectoryError::conflict(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PersonDirectoryError::timeout(message)
        }
        _ => PersonDirectoryError::rejected(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[rstest]
    #[case("http://localhost:3000", "http://localhost:3000/persons")]
    #[case("http://localhost:3000/", "http://localhost:3000/persons")]
    #[case("http://example.test/api/v1", "http://example.test/api/v1/persons")]
    #[case("http://example.test/api/v1/", "http://example.test/api/v1/persons")]
    fn collection_url_appends_resource(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(endpoint(&url(base), None).as_str(), expected);
    }

    #[test]
    fn person_url_escapes_identifier() {
        let built = endpoint(&url("http://localhost:3000"), Some("a/b c"));
        assert_eq!(built.as_str(), "http://localhost:3000/persons/a%2Fb%20c");
    }

    #[test]
    fn rejects_base_urls_without_path() {
        let result = HttpPersonDirectory::new(url("mailto:ops@example.test"), Duration::from_secs(1));
        assert!(matches!(
            result,
            Err(HttpDirectoryBuildError::InvalidBaseUrl { .. })
        ));
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, "NotFound")]
    #[case::conflict(StatusCode::CONFLICT, "Conflict")]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "Timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "Rejected")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Rejected")]
    fn maps_http_statuses_to_port_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"{\"error\":\"nope\"}");
        let matched = match expected {
            "NotFound" => matches!(error, PersonDirectoryError::NotFound { .. }),
            "Conflict" => matches!(error, PersonDirectoryError::Conflict { .. }),
            "Timeout" => matches!(error, PersonDirectoryError::Timeout { .. }),
            "Rejected" => matches!(
                error,
                PersonDirectoryError::Rejected { status: code, .. } if code == status.as_u16()
            ),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} should map to {expected}, got {error:?}");
    }

    #[test]
    fn status_message_includes_compacted_body() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"upstream\n   exploded");
        assert_eq!(
            error,
            PersonDirectoryError::rejected(502_u16, "status 502: upstream exploded")
        );
    }

    #[test]
    fn parses_listing_with_mixed_id_types_and_missing_phone() {
        let body = r#"[
            {"id": "1", "name": "David", "phone": "034-123557", "street": "siempre viva", "city": "Barcelona"},
            {"id": 2, "name": "Maria", "street": "siempre viva", "city": "Helsinky"},
            {"id": "3", "name": "Edgar", "phone": null, "street": "siempre viva", "city": "Guadalajara"}
        ]"#;

        let persons = parse_persons(body.as_bytes()).expect("listing decodes");
        assert_eq!(persons.len(), 3);
        assert_eq!(persons[0].phone.as_deref(), Some("034-123557"));
        assert_eq!(persons[1].id.as_str(), "2");
        assert!(persons[1].phone.is_none());
        assert!(persons[2].phone.is_none());
    }

    #[rstest]
    #[case(r#"{"id": "2", "name": "Maria", "street": "s"}"#)]
    #[case(r#"{"id": "2", "name": "Maria", "street": "s", "city": null}"#)]
    fn missing_city_does_not_spoil_listing(#[case] city_less: &str) {
        let body = format!(
            r#"[{{"id": "1", "name": "David", "street": "siempre viva", "city": "Barcelona"}}, {city_less}]"#
        );

        let persons = parse_persons(body.as_bytes()).expect("listing decodes");
        assert_eq!(persons.len(), 2);
        assert_eq!(persons[0].city.as_deref(), Some("Barcelona"));
        assert_eq!(persons[1].name, "Maria");
        assert!(persons[1].city.is_none());
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"  \n".as_slice())]
    #[case(b"{}".as_slice())]
    #[case(b"{\"id\": \"\", \"name\": \"x\", \"street\": \"s\", \"city\": \"c\"}".as_slice())]
    fn unusable_person_bodies_are_decode_errors(#[case] body: &[u8]) {
        let error = parse_person(body).expect_err("decode should fail");
        assert!(matches!(error, PersonDirectoryError::Decode { .. }));
    }

    #[test]
    fn new_person_body_omits_absent_phone() {
        let person = Person {
            id: PersonId::new("abc").expect("valid id"),
            name: "Maria".into(),
            phone: None,
            street: "siempre viva".into(),
            city: Some("Helsinky".into()),
        };
        let value = serde_json::to_value(NewPersonDto::from(&person)).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc",
                "name": "Maria",
                "street": "siempre viva",
                "city": "Helsinky"
            })
        );
    }
}
