use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Local;
use forecast_core::{ForecastResolver, is_valid_postal_code};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::pages;

#[derive(Clone)]
struct AppState {
    resolver: Arc<ForecastResolver>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    zip: String,
}

pub fn router(resolver: Arc<ForecastResolver>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search))
        .route("/weather/{zip}", get(forecast))
        .fallback(page_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { resolver })
}

pub async fn run(resolver: Arc<ForecastResolver>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local_addr = listener.local_addr().context("Failed to read listener address")?;
    tracing::info!("Web server running at http://{}", local_addr);

    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server terminated with an error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn home() -> Html<String> {
    Html(pages::home_page(None, ""))
}

async fn search(Query(params): Query<SearchParams>) -> Response {
    let zip = params.zip.trim();
    if is_valid_postal_code(zip) {
        Redirect::to(&format!("/weather/{zip}")).into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::home_page(Some(pages::INVALID_ZIP_MESSAGE), zip)),
        )
            .into_response()
    }
}

async fn forecast(State(state): State<AppState>, Path(zip): Path<String>) -> Response {
    match state.resolver.resolve(&zip).await {
        Ok(result) => Html(pages::forecast_page(&result, &Local)).into_response(),
        Err(err) if err.is_not_found() => {
            tracing::info!(%zip, "{}", err);
            (StatusCode::NOT_FOUND, Html(pages::zip_not_found_page(&zip))).into_response()
        }
        Err(err) => {
            tracing::error!(%zip, error = ?err, "forecast resolution failed");
            let retry = format!("/weather/{zip}");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error_page(&retry))).into_response()
        }
    }
}

async fn page_not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::page_not_found()))
}
