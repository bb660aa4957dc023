//! Probes: liveness, readiness against the catalog database, and build version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
    /// Seeded country codes; zero means migrations have not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    countries: Option<i64>,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// Empty 200 for load balancers that only look at the status line.
async fn status() -> StatusCode {
    StatusCode::OK
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let seeded: Result<(i64,), sqlx::Error> = sqlx::query_as("SELECT COUNT(*) FROM country")
        .fetch_one(&state.pool)
        .await;
    match seeded {
        Ok((countries,)) if countries > 0 => (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                database: "ok",
                countries: Some(countries),
            }),
        ),
        Ok((countries,)) => {
            tracing::warn!("country table is empty");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    database: "unseeded",
                    countries: Some(countries),
                }),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    database: "unavailable",
                    countries: None,
                }),
            )
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
