//! Integration tests for the reqwest person directory adapter.
//!
//! A wiremock server stands in for the REST collection so each test can
//! assert on the exact request the adapter emits and on how it decodes
//! representative upstream answers.

use std::time::Duration;

use person_gateway::TraceId;
use person_gateway::domain::ports::{PersonDirectory, PersonDirectoryError};
use person_gateway::domain::{Person, PersonId};
use person_gateway::outbound::directory::HttpPersonDirectory;
use reqwest::Url;
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directory(server: &MockServer, timeout: Duration) -> HttpPersonDirectory {
    let base = Url::parse(&server.uri()).expect("mock server uri");
    HttpPersonDirectory::new(base, timeout).expect("adapter builds")
}

fn david() -> Person {
    Person {
        id: PersonId::new("3d594650-3436-11e9-bc57-8b80ba54c431").expect("valid id"),
        name: "David".into(),
        phone: Some("034-123557".into()),
        street: "siempre viva".into(),
        city: Some("Barcelona".into()),
    }
}

#[tokio::test]
async fn list_decodes_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/persons"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "3d594650-3436-11e9-bc57-8b80ba54c431",
                "name": "David",
                "phone": "034-123557",
                "street": "siempre viva",
                "city": "Barcelona"
            },
            { "id": 2, "name": "Ana", "street": "Gran Via", "city": "Madrid" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let persons = directory(&server, Duration::from_secs(2))
        .list()
        .await
        .expect("listing succeeds");

    assert_eq!(persons.len(), 2);
    assert_eq!(persons[0], david());
    assert_eq!(persons[1].id.as_str(), "2");
    assert_eq!(persons[1].phone, None);
}

#[tokio::test]
async fn create_posts_full_record_and_returns_upstream_copy() {
    let server = MockServer::start().await;
    let person = david();
    Mock::given(method("POST"))
        .and(path("/persons"))
        .and(body_json(json!({
            "id": person.id.as_str(),
            "name": "David",
            "phone": "034-123557",
            "street": "siempre viva",
            "city": "Barcelona"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": person.id.as_str(),
            "name": "David",
            "phone": "034-123557",
            "street": "siempre viva",
            "city": "Barcelona"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = directory(&server, Duration::from_secs(2))
        .create(&person)
        .await
        .expect("create succeeds");

    assert_eq!(created, person);
}

#[tokio::test]
async fn update_phone_patches_single_resource() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/persons/7"))
        .and(body_json(json!({ "phone": "999" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7",
            "name": "Ana",
            "phone": "999",
            "street": "Gran Via",
            "city": "Madrid"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = directory(&server, Duration::from_secs(2))
        .update_phone(&PersonId::new("7").expect("valid id"), "999")
        .await
        .expect("update succeeds");

    assert_eq!(updated.phone.as_deref(), Some("999"));
}

#[rstest]
#[case(404, PersonDirectoryError::not_found("status 404"))]
#[case(409, PersonDirectoryError::conflict("status 409"))]
#[case(500, PersonDirectoryError::rejected(500_u16, "status 500"))]
#[tokio::test]
async fn update_phone_maps_failure_statuses(
    #[case] status: u16,
    #[case] expected: PersonDirectoryError,
) {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let error = directory(&server, Duration::from_secs(2))
        .update_phone(&PersonId::new("7").expect("valid id"), "999")
        .await
        .expect_err("update fails");

    assert_eq!(error, expected);
}

#[rstest]
#[case(200)]
#[case(404)]
#[case(500)]
#[tokio::test]
async fn delete_returns_raw_status(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/persons/7"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&server)
        .await;

    let observed = directory(&server, Duration::from_secs(2))
        .delete(&PersonId::new("7").expect("valid id"))
        .await
        .expect("delete reaches upstream");

    assert_eq!(observed, status);
}

#[tokio::test]
async fn forwards_active_trace_id() {
    let server = MockServer::start().await;
    let trace_id = TraceId::generate();
    Mock::given(method("GET"))
        .and(path("/persons"))
        .and(header("trace-id", trace_id.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = directory(&server, Duration::from_secs(2));
    let persons = TraceId::scope(trace_id, async { adapter.list().await })
        .await
        .expect("listing succeeds");

    assert!(persons.is_empty());
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let error = directory(&server, Duration::from_millis(50))
        .list()
        .await
        .expect_err("listing times out");

    assert!(
        matches!(error, PersonDirectoryError::Timeout { .. }),
        "unexpected error: {error:?}"
    );
    assert!(error.is_unreachable());
}

#[tokio::test]
async fn closed_port_is_a_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve a port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let base = Url::parse(&format!("http://{addr}")).expect("base url");
    let adapter = HttpPersonDirectory::new(base, Duration::from_secs(2)).expect("adapter builds");

    let error = adapter.list().await.expect_err("nothing listens");

    assert!(
        matches!(error, PersonDirectoryError::Transport { .. }),
        "unexpected error: {error:?}"
    );
}
