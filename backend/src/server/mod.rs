//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use quest_backend::Trace;
#[cfg(debug_assertions)]
use quest_backend::doc::ApiDoc;
use quest_backend::inbound::http::configure_api;
use quest_backend::inbound::http::health::{HealthState, live, ready};
use quest_backend::inbound::http::session_config::SessionSettings;
use quest_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(ready)
        .service(live)
        .configure(configure_api)
        .wrap(session.middleware())
        .wrap(Trace);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when the uploads directory or the socket
/// cannot be opened.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig {
        session,
        bind_addr,
        ..
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            session.clone(),
        )
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "quest backend listening");
    Ok(server)
}
