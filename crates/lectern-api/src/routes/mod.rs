//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{appointments, availability, directory, health, messages, slots};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(directory_routes())
        .merge(availability_routes())
        .merge(appointment_routes())
        .merge(message_routes())
}

/// Directory and slot browsing routes
fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/faculties", get(directory::list_faculties))
        .route(
            "/faculties/:faculty_id/departments",
            get(directory::list_departments),
        )
        .route("/lecturers", get(directory::list_lecturers))
        .route("/lecturers/:lecturer_id/slots", get(slots::list_open_slots))
        .route(
            "/lecturers/:lecturer_id/restriction",
            get(slots::restriction_status),
        )
}

/// Availability routes (lecturer only)
fn availability_routes() -> Router<AppState> {
    Router::new()
        .route("/availability", get(availability::list_availability))
        .route("/availability", put(availability::set_availability))
        .route("/availability/:date", delete(availability::delete_availability))
}

/// Appointment routes
fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", post(appointments::book))
        .route("/appointments", get(appointments::list_appointments))
        .route("/appointments/stats", get(appointments::appointment_stats))
        .route("/appointments/follow-up", post(appointments::create_follow_up))
        .route(
            "/appointments/:appointment_id",
            get(appointments::get_appointment),
        )
        .route(
            "/appointments/:appointment_id/approve",
            post(appointments::approve),
        )
        .route(
            "/appointments/:appointment_id/cancel",
            post(appointments::cancel),
        )
        .route(
            "/appointments/:appointment_id/reschedule",
            post(appointments::propose_reschedule),
        )
        .route(
            "/appointments/:appointment_id/reschedule/respond",
            post(appointments::respond_reschedule),
        )
        .route(
            "/appointments/:appointment_id/outcome",
            post(appointments::record_outcome),
        )
}

/// Message routes (student only)
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::list_messages))
        .route("/messages/viewed", post(messages::mark_viewed))
}
