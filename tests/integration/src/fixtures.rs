//! Test fixtures and data seeding
//!
//! Wire-format structs mirroring the API's request/response bodies, plus
//! direct database seeding for the people the auth provider would normally
//! manage.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// People seeded directly into the database for one test
#[derive(Debug, Clone, Copy)]
pub struct SeededPeople {
    pub faculty_id: Uuid,
    pub department_id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
}

/// Insert a faculty, department, lecturer and student
pub async fn seed_people(pool: &PgPool) -> Result<SeededPeople> {
    let faculty_id = Uuid::new_v4();
    let department_id = Uuid::new_v4();
    let lecturer_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    sqlx::query("INSERT INTO faculties (id, name) VALUES ($1, $2)")
        .bind(faculty_id)
        .bind(format!("Faculty {faculty_id}"))
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO departments (id, faculty_id, name) VALUES ($1, $2, $3)")
        .bind(department_id)
        .bind(faculty_id)
        .bind(format!("Department {department_id}"))
        .execute(pool)
        .await?;

    sqlx::query(
        "INSERT INTO lecturers (id, name, email, faculty_id, department_id) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(lecturer_id)
    .bind("Dr. Test Lecturer")
    .bind(format!("{lecturer_id}@example.edu"))
    .bind(faculty_id)
    .bind(department_id)
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO students (id, name, email, faculty_id, department_id, year) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(student_id)
    .bind("Test Student")
    .bind(format!("{student_id}@student.example.edu"))
    .bind(faculty_id)
    .bind(department_id)
    .bind("2")
    .execute(pool)
    .await?;

    Ok(SeededPeople {
        faculty_id,
        department_id,
        lecturer_id,
        student_id,
    })
}

// ============================================================================
// Wire-format request bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TimeRangeBody {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Serialize)]
pub struct SetAvailabilityBody {
    pub date: NaiveDate,
    pub ranges: Vec<TimeRangeBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_weekly_until: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct BookAppointmentBody {
    pub lecturer_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CancelBody {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct RescheduleBody {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct RespondRescheduleBody {
    pub accept: bool,
}

#[derive(Debug, Serialize)]
pub struct OutcomeBody {
    pub held: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Wire-format response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AppointmentBody {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub cancel_reason: Option<String>,
    pub follow_up: bool,
}

#[derive(Debug, Deserialize)]
pub struct SlotBody {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize)]
pub struct DaySlotsBody {
    pub lecturer_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<SlotBody>,
}

#[derive(Debug, Deserialize)]
pub struct RestrictionStatusBody {
    pub restricted: bool,
    pub until: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub id: Uuid,
    pub content: String,
    pub viewed_by_student: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatsBody {
    pub pending: i64,
    pub approved: i64,
    pub awaiting_student_approval: i64,
    pub cancelled: i64,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
