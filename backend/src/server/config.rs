//! HTTP server configuration object.

use std::net::SocketAddr;

use person_gateway::inbound::graphql::PersonSchema;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) schema: PersonSchema,
    pub(crate) playground: bool,
}

impl ServerConfig {
    /// Serve `schema` on `bind_addr` with the GraphiQL explorer disabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, schema: PersonSchema) -> Self {
        Self {
            bind_addr,
            schema,
            playground: false,
        }
    }

    /// Toggle the GraphiQL explorer on `GET /graphql`.
    #[must_use]
    pub fn with_playground(mut self, playground: bool) -> Self {
        self.playground = playground;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "read by bootstrap tests only")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
