//! HTTP shell around the pipeline.
//!
//! A single `POST /` route accepts the JSON operation request and maps the
//! pipeline outcome to a plain-text response: 400 for validation errors,
//! 500 for any failed step, 200/201 for a successful move/delete. Runs are
//! serialized behind one async mutex so two concurrent requests cannot race
//! on an environment's content database.

use crate::config::Config;
use crate::error::Error;
use crate::pipeline;
use crate::request::OperationRequest;
use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

struct AppState {
    config: Config,
    pipeline_lock: Mutex<()>,
}

/// Bind and serve the operation endpoint until the process is stopped.
pub async fn serve(config: Config, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let app = router(config);

    info!("Starting ghostops server on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the operation router. Exposed separately so tests can bind it to
/// an ephemeral port.
pub fn router(config: Config) -> Router {
    let state = Arc::new(AppState {
        config,
        pipeline_lock: Mutex::new(()),
    });
    Router::new()
        .route("/", post(handle_operation))
        .with_state(state)
}

async fn handle_operation(
    State(state): State<Arc<AppState>>,
    body: String,
) -> (StatusCode, String) {
    let operation = match OperationRequest::parse_body(&body).and_then(|r| r.validate()) {
        Ok(operation) => operation,
        Err(e) => return error_response(e),
    };

    let _guard = state.pipeline_lock.lock().await;
    match pipeline::run(&state.config, operation).await {
        Ok(outcome) => (
            StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::OK),
            outcome.body,
        ),
        Err(e) => error_response(e),
    }
}

fn error_response(e: Error) -> (StatusCode, String) {
    let body = e.response_body();
    error!("{body}");
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    )
}
