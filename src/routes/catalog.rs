//! Roastery and bean routes.

use crate::handlers::{bean, roastery};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/roasteries", get(roastery::list).post(roastery::create))
        .route(
            "/roasteries/:id",
            get(roastery::read).put(roastery::update).delete(roastery::delete),
        )
        .route(
            "/roasteries/:id/beans",
            get(roastery::list_beans).post(roastery::create_bean),
        )
        .route("/beans", get(bean::list).post(bean::create))
        .route("/beans/:id", get(bean::read).put(bean::update).delete(bean::delete))
        .with_state(state)
}
