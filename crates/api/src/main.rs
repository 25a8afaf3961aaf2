mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod evaluate;
    pub mod health;
    pub mod timetables;
    pub mod validate;
}

use anyhow::Context;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::health::health,
            routes::validate::validate_handler,
            routes::timetables::create,
            routes::timetables::get,
            routes::timetables::set_slot,
            routes::timetables::remove_slot,
            routes::timetables::evaluation,
            routes::evaluate::evaluate,
        ),
        components(schemas(
            types::ScheduleRequest, types::GridSpec, types::Course, types::Teacher, types::Room,
            types::Constraint, types::Priority, types::SessionKind, types::Slot, types::SlotKey,
            types::Conflict, types::ConflictKind, types::CourseId, types::TeacherId, types::RoomId,
            registry::SlotEdit,
            routes::health::Health,
            routes::validate::ValidationReport,
            routes::timetables::TimetableCreated,
            routes::timetables::Report
        )),
        tags(
            (name = "timetable", description = "Timetable scheduling API")
        )
    )]
struct ApiDoc;

const PORT_VAR: &str = "TIMETABLE__SERVER__PORT";
const DEFAULT_PORT: u16 = 8080;

/// An unset variable means the default port; a set but unparseable one is
/// a startup error.
fn listen_port(raw: Option<String>) -> anyhow::Result<u16> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(p) => p
            .trim()
            .parse()
            .with_context(|| format!("invalid {PORT_VAR}: {p:?}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let app_state = state::AppState::new_default();

    let routes = Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/validate", post(routes::validate::validate_handler))
        .route("/v1/evaluate", post(routes::evaluate::evaluate))
        .route("/v1/timetables", post(routes::timetables::create))
        .route("/v1/timetables/:id", get(routes::timetables::get))
        .route("/v1/timetables/:id/slots", put(routes::timetables::set_slot))
        .route(
            "/v1/timetables/:id/slots/:day/:time",
            delete(routes::timetables::remove_slot),
        )
        .route(
            "/v1/timetables/:id/evaluation",
            get(routes::timetables::evaluation),
        )
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));
    let app = telemetry::instrument(routes).with_state(app_state);

    let port = listen_port(std::env::var(PORT_VAR).ok())?;
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
