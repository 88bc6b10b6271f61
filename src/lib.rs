//! # CRS Rust Backend
//!
//! Weekly clinic-room scheduling and conflict-resolution engine.
//!
//! This crate provides the Rust backend for the Clinic Room Scheduling (CRS)
//! subsystem of the hospital admin portal: the in-memory model of the weekly
//! schedule grid (department × time-slot × room), the invariants that keep
//! room and doctor assignments unique per slot, and the swap/validate/commit
//! editing workflow. The backend can expose a REST API via Axum for the
//! admin frontend.
//!
//! ## Features
//!
//! - **Room catalog & doctor directory**: read-through caches over the
//!   external fetch collaborators, with a distinct "unavailable" state
//! - **Slot grid model**: the full (department × slot) matrix with derived
//!   used-room / used-doctor indexes per slot
//! - **Conflict detection**: pure queries for room availability and doctor
//!   double-booking across departments
//! - **Editing workflow**: per-assignment editor state machine with field
//!   validation, auto-selection, and room swapping
//! - **Persistence boundary**: batch commit of assignment records through
//!   the repository pattern
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) and identifier newtypes
//! - [`models`]: Domain model (rooms, doctors, slots, assignments, grid)
//! - [`services`]: Conflict detection, validation, and the editor workflow
//! - [`db`]: Repository pattern for directory fetch and schedule persistence
//! - [`config`]: Shift-defaults configuration
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod config;
pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
