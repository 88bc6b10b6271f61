//! CRS HTTP Server Binary
//!
//! This is the main entry point for the CRS REST API server.
//! It initializes the repository, builds the weekly schedule grid, sets up
//! the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with local (in-memory) repository (default)
//! cargo run --bin crs-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `SHIFTS_CONFIG`: Path to a shifts.toml overriding the session defaults
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crs_rust::config::{self, ShiftConfig};
use crs_rust::db;
use crs_rust::http::{create_router, AppState};
use crs_rust::models::grid::ScheduleGrid;
use crs_rust::models::slot::week_slots;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting CRS HTTP Server");

    // Shift defaults: explicit config file, default location, or built-ins.
    let shifts = match env::var("SHIFTS_CONFIG") {
        Ok(path) => ShiftConfig::from_file(&path)?,
        Err(_) => ShiftConfig::from_default_location().unwrap_or_else(|_| {
            warn!("no shifts.toml found; using built-in session defaults");
            ShiftConfig::default()
        }),
    };
    config::set_global_shifts(shifts.clone());

    // Initialize global repository once and reuse it across the app
    db::init_repository().map_err(|e| anyhow::anyhow!(e))?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    // Build the current week's grid (Monday through Sunday).
    let monday = monday_of_current_week();
    let grid = ScheduleGrid::new(
        week_slots(monday, &shifts),
        shifts.default_duration_minutes(),
    );
    info!("Schedule grid initialized for week starting {}", monday);

    // Create application state
    let state = AppState::new(repository, grid);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn monday_of_current_week() -> NaiveDate {
    let today = Local::now().date_naive();
    let offset = today.weekday().num_days_from_monday();
    today - chrono::Days::new(offset as u64)
}
