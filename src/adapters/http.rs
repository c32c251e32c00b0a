//! HTTP 介面：`POST /review`、`POST /optimize` 與 `GET /health`

use crate::core::service::{OptimizationService, ReviewService};
use crate::domain::model::{OptimizationRequest, OptimizationResult, ReviewRequest, ReviewResult};
use crate::domain::ports::Gateway;
use crate::utils::error::Result;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn review_routes<G: Gateway + 'static>(service: Arc<ReviewService<G>>) -> Router {
    Router::new()
        .route("/review", post(review_plan::<G>))
        .route("/health", get(health))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

pub fn optimization_routes<G: Gateway + 'static>(service: Arc<OptimizationService<G>>) -> Router {
    Router::new()
        .route("/optimize", post(optimize_plan::<G>))
        .route("/health", get(health))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn review_plan<G: Gateway + 'static>(
    State(service): State<Arc<ReviewService<G>>>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResult>> {
    service.review(&request).await.map(Json)
}

async fn optimize_plan<G: Gateway + 'static>(
    State(service): State<Arc<OptimizationService<G>>>,
    Json(request): Json<OptimizationRequest>,
) -> Result<Json<OptimizationResult>> {
    service.optimize(&request).await.map(Json)
}

async fn health() -> &'static str {
    "ok"
}

pub async fn bind(addr: &str) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    axum::serve(listener, router).await?;
    Ok(())
}
