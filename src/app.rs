use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list))
        .route("/gallery", get(handlers::gallery))
        .route("/plans", post(handlers::create))
        .route("/plans/new", get(handlers::new_form))
        .route("/plans/:id", get(handlers::detail).post(handlers::update))
        .route("/plans/:id/edit", get(handlers::edit_form))
        .route("/plans/:id/complete", post(handlers::toggle_complete))
        .route(
            "/plans/:id/archive",
            get(handlers::confirm_archive).post(handlers::archive),
        )
        .route(
            "/plans/:id/delete",
            get(handlers::confirm_delete).post(handlers::delete),
        )
        .route("/api/summary", get(handlers::get_summary))
        .route("/healthz", get(handlers::health))
        .with_state(state)
}
