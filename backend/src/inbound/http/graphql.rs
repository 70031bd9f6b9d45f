//! GraphQL over HTTP.
//!
//! `POST /graphql` executes a document against the [`PersonSchema`] held in
//! app data. `GET /graphql` serves the GraphiQL explorer and is only mounted
//! when the playground is enabled.

use actix_web::{HttpResponse, get, http::header, post, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use tracing::debug;

use crate::inbound::graphql::PersonSchema;

/// Path the schema is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Execute a GraphQL request.
///
/// Resolver failures are reported in the response `errors` array with a
/// `200 OK` status; only malformed HTTP payloads are rejected by the
/// extractor.
#[post("/graphql")]
pub async fn graphql(schema: web::Data<PersonSchema>, request: GraphQLRequest) -> GraphQLResponse {
    let request = request.into_inner();
    debug!(
        operation = request.operation_name.as_deref().unwrap_or("<anonymous>"),
        "executing graphql request"
    );
    schema.execute(request).await.into()
}

/// Serve the GraphiQL explorer pointed at [`GRAPHQL_PATH`].
#[get("/graphql")]
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
