use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{info_span, Instrument, Span};

use crate::agent::MoveSelector;
use crate::error::ServerError;

pub struct AppState {
    pub selector: Option<Arc<dyn MoveSelector>>,
}

impl AppState {
    pub fn new(selector: Option<Arc<dyn MoveSelector>>) -> Self {
        Self { selector }
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Board in, move out. The body is read raw so clients that forget the
/// JSON content type still get an answer.
#[tracing::instrument(skip_all, fields(bytes = body.len()))]
pub async fn make_move(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ServerError> {
    let board: Value = serde_json::from_slice(&body).map_err(ServerError::MalformedBody)?;
    let selector = state.selector.clone().ok_or(ServerError::NoAgent)?;

    let action = tokio::task::spawn_blocking(move || selector.select(board))
        .instrument(info_span!("make_move_sync"))
        .await??;

    tracing::debug!(%action, "agent chose a move");
    Ok(Json(action))
}

pub fn app(selector: Option<Arc<dyn MoveSelector>>, cors: bool) -> Router {
    let state = Arc::new(AppState::new(selector));

    let mut app = Router::new()
        .route("/", post(make_move))
        .route("/health", get(health))
        .with_state(state);

    if cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(
        tower_http::trace::TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                if request.uri().path() == "/health" {
                    return tracing::debug_span!("health-check");
                }
                let description = format!("{} {}", request.method(), request.uri().path());

                tracing::info_span!("http-request",
                    status = tracing::field::Empty,
                    description = %description,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),)
            })
            .on_response(
                |response: &Response<Body>, _latency: Duration, span: &Span| {
                    span.record(
                        "status",
                        &tracing::field::display(response.status().as_u16()),
                    );
                },
            ),
    )
}
