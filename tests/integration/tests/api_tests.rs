//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL (JWT_SECRET defaults to a test value)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use anyhow::Result;
use chrono::{Duration, NaiveTime, Utc};
use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use lectern_common::Role;
use reqwest::StatusCode;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A booking date far enough out to be in the future in any timezone
fn future_date(days: i64) -> chrono::NaiveDate {
    Utc::now().date_naive() + Duration::days(2 + days)
}

async fn connect_pool() -> Result<PgPool> {
    let url = std::env::var("DATABASE_URL")?;
    Ok(PgPoolOptions::new().max_connections(2).connect(&url).await?)
}

fn morning(date: chrono::NaiveDate) -> SetAvailabilityBody {
    SetAvailabilityBody {
        date,
        ranges: vec![TimeRangeBody {
            start: t(9, 0),
            end: t(11, 0),
        }],
        repeat_weekly_until: None,
    }
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/faculties").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_guard_on_availability() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = connect_pool().await.unwrap();
    let people = seed_people(&pool).await.unwrap();

    // A student cannot publish availability
    let student_token = server.issue_token(people.student_id, Role::Student);
    let response = server
        .put_auth(
            "/api/v1/availability",
            &student_token,
            &morning(future_date(0)),
        )
        .await
        .unwrap();

    let body: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "WRONG_ROLE");
}

// ============================================================================
// Booking Tests
// ============================================================================

#[tokio::test]
async fn test_booking_flow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = connect_pool().await.unwrap();
    let people = seed_people(&pool).await.unwrap();

    let lecturer_token = server.issue_token(people.lecturer_id, Role::Lecturer);
    let student_token = server.issue_token(people.student_id, Role::Student);
    let date = future_date(0);

    // Lecturer publishes a 9-11 window
    let response = server
        .put_auth("/api/v1/availability", &lecturer_token, &morning(date))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Student sees four half-hour slots
    let response = server
        .get_auth(
            &format!(
                "/api/v1/lecturers/{}/slots?date={}",
                people.lecturer_id, date
            ),
            &student_token,
        )
        .await
        .unwrap();
    let slots: DaySlotsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(slots.slots.len(), 4);

    // Student books 09:30
    let response = server
        .post_auth(
            "/api/v1/appointments",
            &student_token,
            &BookAppointmentBody {
                lecturer_id: people.lecturer_id,
                date,
                start_time: t(9, 30),
                subject: "Thesis review".to_string(),
                message: "First draft feedback".to_string(),
            },
        )
        .await
        .unwrap();
    let booked: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(booked.status, "pending");
    assert_eq!(booked.end_time, t(10, 0));

    // The same slot no longer derives for a second booking
    let response = server
        .post_auth(
            "/api/v1/appointments",
            &student_token,
            &BookAppointmentBody {
                lecturer_id: people.lecturer_id,
                date,
                start_time: t(9, 30),
                subject: "Second attempt".to_string(),
                message: String::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Lecturer approves; the student gets an in-app message
    let response = server
        .post_auth(
            &format!("/api/v1/appointments/{}/approve", booked.id),
            &lecturer_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    let approved: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(approved.status, "approved");

    let response = server
        .get_auth("/api/v1/messages", &student_token)
        .await
        .unwrap();
    let messages: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(messages.iter().any(|m| m.content.contains("approved")));

    // Stats reflect the one approved appointment
    let response = server
        .get_auth("/api/v1/appointments/stats", &lecturer_token)
        .await
        .unwrap();
    let stats: StatsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.total, 1);
}

#[tokio::test]
async fn test_cancel_frees_the_slot() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = connect_pool().await.unwrap();
    let people = seed_people(&pool).await.unwrap();

    let lecturer_token = server.issue_token(people.lecturer_id, Role::Lecturer);
    let student_token = server.issue_token(people.student_id, Role::Student);
    let date = future_date(0);

    server
        .put_auth("/api/v1/availability", &lecturer_token, &morning(date))
        .await
        .unwrap();
    let response = server
        .post_auth(
            "/api/v1/appointments",
            &student_token,
            &BookAppointmentBody {
                lecturer_id: people.lecturer_id,
                date,
                start_time: t(9, 0),
                subject: "To be cancelled".to_string(),
                message: String::new(),
            },
        )
        .await
        .unwrap();
    let booked: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/appointments/{}/cancel", booked.id),
            &student_token,
            &CancelBody {
                reason: "Schedule conflict".to_string(),
            },
        )
        .await
        .unwrap();
    let cancelled: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("Schedule conflict"));

    // The 09:00 slot is offered again
    let response = server
        .get_auth(
            &format!(
                "/api/v1/lecturers/{}/slots?date={}",
                people.lecturer_id, date
            ),
            &student_token,
        )
        .await
        .unwrap();
    let slots: DaySlotsBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(slots.slots.iter().any(|s| s.start_time == t(9, 0)));
}

// ============================================================================
// Reschedule Tests
// ============================================================================

#[tokio::test]
async fn test_reschedule_flow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = connect_pool().await.unwrap();
    let people = seed_people(&pool).await.unwrap();

    let lecturer_token = server.issue_token(people.lecturer_id, Role::Lecturer);
    let student_token = server.issue_token(people.student_id, Role::Student);
    let date = future_date(0);
    let new_date = future_date(7);

    server
        .put_auth("/api/v1/availability", &lecturer_token, &morning(date))
        .await
        .unwrap();
    let response = server
        .post_auth(
            "/api/v1/appointments",
            &student_token,
            &BookAppointmentBody {
                lecturer_id: people.lecturer_id,
                date,
                start_time: t(9, 0),
                subject: "Project kickoff".to_string(),
                message: String::new(),
            },
        )
        .await
        .unwrap();
    let booked: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_auth(
            &format!("/api/v1/appointments/{}/approve", booked.id),
            &lecturer_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();

    // Lecturer proposes a new time
    let response = server
        .post_auth(
            &format!("/api/v1/appointments/{}/reschedule", booked.id),
            &lecturer_token,
            &RescheduleBody {
                date: new_date,
                start_time: t(14, 0),
                end_time: t(14, 30),
                reason: "Department meeting moved".to_string(),
            },
        )
        .await
        .unwrap();
    let proposed: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(proposed.status, "awaiting_student_approval");

    // Student accepts; the appointment moves
    let response = server
        .post_auth(
            &format!("/api/v1/appointments/{}/reschedule/respond", booked.id),
            &student_token,
            &RespondRescheduleBody { accept: true },
        )
        .await
        .unwrap();
    let accepted: AppointmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "approved");
    assert_eq!(accepted.date, new_date);
    assert_eq!(accepted.start_time, t(14, 0));
}

// ============================================================================
// Outcome & Restriction Tests
// ============================================================================

#[tokio::test]
async fn test_missed_meeting_blocks_rebooking() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = connect_pool().await.unwrap();
    let people = seed_people(&pool).await.unwrap();

    let lecturer_token = server.issue_token(people.lecturer_id, Role::Lecturer);
    let student_token = server.issue_token(people.student_id, Role::Student);
    let date = future_date(0);

    server
        .put_auth("/api/v1/availability", &lecturer_token, &morning(date))
        .await
        .unwrap();
    let response = server
        .post_auth(
            "/api/v1/appointments",
            &student_token,
            &BookAppointmentBody {
                lecturer_id: people.lecturer_id,
                date,
                start_time: t(10, 0),
                subject: "Missed meeting".to_string(),
                message: String::new(),
            },
        )
        .await
        .unwrap();
    let booked: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_auth(
            &format!("/api/v1/appointments/{}/approve", booked.id),
            &lecturer_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();

    // Lecturer records a no-show
    let response = server
        .post_auth(
            &format!("/api/v1/appointments/{}/outcome", booked.id),
            &lecturer_token,
            &OutcomeBody {
                held: false,
                note: Some("No-show".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Restriction is visible to the student
    let response = server
        .get_auth(
            &format!("/api/v1/lecturers/{}/restriction", people.lecturer_id),
            &student_token,
        )
        .await
        .unwrap();
    let status: RestrictionStatusBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.restricted);
    assert!(status.until.is_some());

    // Booking the same lecturer again is a conflict
    let response = server
        .post_auth(
            "/api/v1/appointments",
            &student_token,
            &BookAppointmentBody {
                lecturer_id: people.lecturer_id,
                date,
                start_time: t(9, 0),
                subject: "Retry".to_string(),
                message: String::new(),
            },
        )
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "RESTRICTION_ACTIVE");
}

// ============================================================================
// Follow-up & Directory Tests
// ============================================================================

#[tokio::test]
async fn test_follow_up_creation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = connect_pool().await.unwrap();
    let people = seed_people(&pool).await.unwrap();

    let lecturer_token = server.issue_token(people.lecturer_id, Role::Lecturer);
    let date = future_date(0);

    let response = server
        .post_auth(
            "/api/v1/appointments/follow-up",
            &lecturer_token,
            &serde_json::json!({
                "student_id": people.student_id,
                "date": date,
                "start_time": "13:00:00",
                "end_time": "14:15:00",
                "subject": "Project follow-up",
                "message": ""
            }),
        )
        .await
        .unwrap();
    let created: AppointmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.status, "approved");
    assert!(created.follow_up);
    assert_eq!(created.end_time, t(14, 15));
}

#[tokio::test]
async fn test_directory_listing() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = connect_pool().await.unwrap();
    let people = seed_people(&pool).await.unwrap();

    let student_token = server.issue_token(people.student_id, Role::Student);

    let response = server
        .get_auth(
            &format!(
                "/api/v1/lecturers?faculty_id={}&department_id={}",
                people.faculty_id, people.department_id
            ),
            &student_token,
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let lecturers: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(lecturers.len(), 1);
}
