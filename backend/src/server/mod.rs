//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio::signal;
use tracing::{info, warn};

use person_gateway::Trace;
use person_gateway::inbound::graphql::PersonSchema;
use person_gateway::inbound::http::graphql::{graphiql, graphql};
use person_gateway::inbound::http::health::{HealthState, live, ready};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    schema: web::Data<PersonSchema>,
    playground: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        schema,
        playground,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(schema)
        .wrap(Trace)
        .service(graphql)
        .service(ready)
        .service(live);

    app.configure(|cfg| {
        if playground {
            cfg.service(graphiql);
        }
    })
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Actix signal handling is disabled; pair the server with
/// [`drain_on_shutdown_signal`] so liveness fails before the listener stops.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        schema,
        playground,
    } = config;
    let schema = web::Data::new(schema);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            schema: schema.clone(),
            playground,
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness, then stop the server and let in-flight requests finish.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining: liveness now reports unavailable");
    handle.stop(true).await;
}

/// Wait for Ctrl+C or SIGTERM, then [`drain`] the server.
pub async fn drain_on_shutdown_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    drain(health_state, handle).await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use person_gateway::domain::ports::FixturePersonDirectory;
    use person_gateway::inbound::graphql::{GraphQlState, build_schema};
    use rstest::rstest;

    use super::*;

    fn deps(playground: bool) -> AppDependencies {
        let state = GraphQlState::from_directory(Arc::new(FixturePersonDirectory::default()));
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            schema: web::Data::new(build_schema(state)),
            playground,
        }
    }

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::NOT_FOUND)]
    #[actix_rt::test]
    async fn graphiql_is_mounted_only_when_enabled(
        #[case] playground: bool,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(build_app(deps(playground))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/graphql").to_request())
            .await;
        assert_eq!(res.status(), expected);
    }

    #[actix_rt::test]
    async fn responses_carry_trace_id() {
        let app = test::init_service(build_app(deps(false))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
    }
}
