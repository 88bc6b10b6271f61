//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Directories
        .route("/directories/load", post(handlers::load_directories))
        .route("/rooms", get(handlers::list_rooms))
        .route("/doctors", get(handlers::list_doctors))
        .route("/departments", put(handlers::set_departments))
        // Slot queries
        .route("/slots/{slot_id}/used-rooms", get(handlers::get_used_rooms))
        .route("/slots/{slot_id}/used-doctors", get(handlers::get_used_doctors))
        .route(
            "/slots/{slot_id}/doctors/{code}/conflict",
            get(handlers::get_doctor_conflict),
        )
        // Cells and mutations
        .route("/cells/{department_id}/{slot_id}", get(handlers::get_cell))
        .route(
            "/cells/{department_id}/{slot_id}/{room_id}/validation",
            get(handlers::get_cell_validation),
        )
        .route("/grid/commands", post(handlers::dispatch_command))
        .route("/grid/pending", get(handlers::get_pending))
        // Persistence
        .route("/commit", post(handlers::commit_schedule));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(4 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShiftConfig;
    use crate::db::factory::RepositoryFactory;
    use crate::models::grid::ScheduleGrid;
    use crate::models::slot::week_slots;
    use chrono::NaiveDate;

    fn test_state() -> AppState {
        let shifts = ShiftConfig::default();
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let grid = ScheduleGrid::new(
            week_slots(monday, &shifts),
            shifts.default_duration_minutes(),
        );
        AppState::new(RepositoryFactory::create_local(), grid)
    }

    #[test]
    fn test_router_creation() {
        let _router = create_router(test_state());
        // If we got here, router was created successfully
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        use tower::ServiceExt;

        let app = create_router(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_slot_is_404() {
        use tower::ServiceExt;

        let app = create_router(test_state());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/v1/slots/999/used-rooms")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }
}
