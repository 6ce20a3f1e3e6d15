//! Server construction and route wiring.

mod config;
mod state_builders;

pub use config::{DEFAULT_WORKERS, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use rentomatic::inbound::http::rooms::list_rooms;
use rentomatic::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use rentomatic::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new().app_data(http_state).service(list_rooms);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Construct the Actix HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        workers,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .workers(workers)
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, workers, "rooms service listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use std::net::{Ipv4Addr, SocketAddr};

    #[rstest]
    #[actix_web::test]
    async fn app_serves_rooms_from_the_sample_repository() {
        let config = ServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)));
        let app = actix_test::init_service(build_app(build_http_state(&config))).await;

        let request = actix_test::TestRequest::get()
            .uri("/rooms?filter_price_min=60")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_paths_are_not_found() {
        let config = ServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)));
        let app = actix_test::init_service(build_app(build_http_state(&config))).await;

        let request = actix_test::TestRequest::get().uri("/users").to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_binds_an_ephemeral_port() {
        let config =
            ServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).with_workers(1);

        let server = create_server(config).expect("server binds");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        handle.stop(true).await;
        let outcome = running.await.expect("server task joins");
        assert!(outcome.is_ok());
    }
}
