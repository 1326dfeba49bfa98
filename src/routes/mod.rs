use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::SharedState};

pub mod docs;
pub mod health;
pub mod saves;
pub mod scores;

/// Header carrying the shared API key on write endpoints.
const API_KEY_HEADER: &str = "x-api-key";

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = scores::router(state.clone()).merge(saves::router(state.clone()));

    let root_router = health::router().merge(docs::router(state.clone()));

    Router::new()
        .nest("/api", api_router)
        .merge(root_router)
        .with_state(state)
}

/// Middleware rejecting write requests without the configured API key.
pub(crate) async fn require_api_key(
    axum::extract::State(state): axum::extract::State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing API key header `X-API-Key`".into()))?;

    if provided != state.config().api_key() {
        return Err(AppError::Unauthorized("invalid API key".into()));
    }

    Ok(next.run(req).await)
}
