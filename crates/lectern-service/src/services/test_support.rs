//! In-memory repository fakes and a prebuilt context for service unit tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use lectern_common::BookingConfig;
use lectern_core::entities::{
    Appointment, AppointmentAction, Availability, Department, Faculty, Lecturer, Message,
    Restriction, Student,
};
use lectern_core::error::DomainError;
use lectern_core::traits::{
    AppointmentRepository, AvailabilityRepository, DirectoryRepository, LecturerRepository,
    MessageRepository, NewAppointment, RepoResult, RestrictionRepository, StudentRepository,
};
use lectern_core::value_objects::TimeRange;

use super::context::{ServiceContext, ServiceContextBuilder};
use super::notify::NoopNotifier;

pub mod fixtures {
    use uuid::Uuid;

    pub const FACULTY_ID: Uuid = Uuid::from_u128(1);
    pub const DEPARTMENT_ID: Uuid = Uuid::from_u128(2);
    pub const LECTURER_ID: Uuid = Uuid::from_u128(10);
    pub const OTHER_LECTURER_ID: Uuid = Uuid::from_u128(11);
    pub const STUDENT_ID: Uuid = Uuid::from_u128(20);
    pub const OTHER_STUDENT_ID: Uuid = Uuid::from_u128(21);
}

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryStudentRepo {
    rows: Mutex<Vec<Student>>,
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepo {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Student>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryLecturerRepo {
    rows: Mutex<Vec<Lecturer>>,
}

#[async_trait]
impl LecturerRepository for InMemoryLecturerRepo {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Lecturer>> {
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn list(
        &self,
        faculty_id: Option<Uuid>,
        department_id: Option<Uuid>,
    ) -> RepoResult<Vec<Lecturer>> {
        let mut result: Vec<Lecturer> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| faculty_id.map_or(true, |f| l.faculty_id == f))
            .filter(|l| department_id.map_or(true, |d| l.department_id == d))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}

#[derive(Default)]
pub struct InMemoryDirectoryRepo {
    pub faculties: Mutex<Vec<Faculty>>,
    pub departments: Mutex<Vec<Department>>,
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepo {
    async fn list_faculties(&self) -> RepoResult<Vec<Faculty>> {
        let mut result = self.faculties.lock().unwrap().clone();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn list_departments(&self, faculty_id: Uuid) -> RepoResult<Vec<Department>> {
        let mut result: Vec<Department> = self
            .departments
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.faculty_id == faculty_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}

#[derive(Default)]
pub struct InMemoryAvailabilityRepo {
    rows: Mutex<Vec<Availability>>,
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepo {
    async fn find_by_lecturer_date(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Option<Availability>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.lecturer_id == lecturer_id && a.date == date)
            .cloned())
    }

    async fn list_by_lecturer(
        &self,
        lecturer_id: Uuid,
        from: NaiveDate,
    ) -> RepoResult<Vec<Availability>> {
        let mut result: Vec<Availability> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.lecturer_id == lecturer_id && a.date >= from)
            .cloned()
            .collect();
        result.sort_by_key(|a| a.date);
        Ok(result)
    }

    async fn upsert(&self, availability: &Availability) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|a| {
            !(a.lecturer_id == availability.lecturer_id && a.date == availability.date)
        });
        rows.push(availability.clone());
        Ok(())
    }

    async fn delete(&self, lecturer_id: Uuid, date: NaiveDate) -> RepoResult<()> {
        self.rows
            .lock()
            .unwrap()
            .retain(|a| !(a.lecturer_id == lecturer_id && a.date == date));
        Ok(())
    }
}

/// Emulates the partial unique index over live (lecturer, date, start_time)
#[derive(Default)]
pub struct InMemoryAppointmentRepo {
    rows: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    fn slot_taken(rows: &[Appointment], candidate: &Appointment) -> bool {
        rows.iter().any(|a| {
            a.id != candidate.id
                && a.occupies_slot()
                && a.lecturer_id == candidate.lecturer_id
                && a.date == candidate.date
                && a.start_time == candidate.start_time
        })
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepo {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn find_active_by_lecturer_date(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Vec<Appointment>> {
        let mut result: Vec<Appointment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.lecturer_id == lecturer_id && a.date == date && a.occupies_slot())
            .cloned()
            .collect();
        result.sort_by_key(|a| a.start_time);
        Ok(result)
    }

    async fn find_by_lecturer_status(
        &self,
        lecturer_id: Uuid,
        status: &str,
    ) -> RepoResult<Vec<Appointment>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.lecturer_id == lecturer_id && a.state.name() == status)
            .cloned()
            .collect())
    }

    async fn find_by_student_status(
        &self,
        student_id: Uuid,
        status: &str,
    ) -> RepoResult<Vec<Appointment>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.student_id == student_id && a.state.name() == status)
            .cloned()
            .collect())
    }

    async fn count_by_lecturer(&self, lecturer_id: Uuid) -> RepoResult<Vec<(String, i64)>> {
        let rows = self.rows.lock().unwrap();
        let mut counts: std::collections::BTreeMap<String, i64> = std::collections::BTreeMap::new();
        for a in rows.iter().filter(|a| a.lecturer_id == lecturer_id) {
            *counts.entry(a.state.name().to_string()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_student(&self, student_id: Uuid) -> RepoResult<Vec<(String, i64)>> {
        let rows = self.rows.lock().unwrap();
        let mut counts: std::collections::BTreeMap<String, i64> = std::collections::BTreeMap::new();
        for a in rows.iter().filter(|a| a.student_id == student_id) {
            *counts.entry(a.state.name().to_string()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn insert(&self, new: &NewAppointment) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if Self::slot_taken(&rows, &new.appointment) {
            return Err(DomainError::SlotAlreadyTaken {
                date: new.appointment.date,
                start: new.appointment.start_time,
            });
        }
        rows.push(new.appointment.clone());
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if appointment.occupies_slot() && Self::slot_taken(&rows, appointment) {
            return Err(DomainError::SlotAlreadyTaken {
                date: appointment.date,
                start: appointment.start_time,
            });
        }
        let Some(existing) = rows.iter_mut().find(|a| a.id == appointment.id) else {
            return Err(DomainError::AppointmentNotFound(appointment.id));
        };
        *existing = appointment.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRestrictionRepo {
    rows: Mutex<Vec<Restriction>>,
}

#[async_trait]
impl RestrictionRepository for InMemoryRestrictionRepo {
    async fn find_active(
        &self,
        student_id: Uuid,
        lecturer_id: Uuid,
        today: NaiveDate,
    ) -> RepoResult<Vec<Restriction>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.student_id == student_id && r.lecturer_id == lecturer_id && r.end_date >= today
            })
            .cloned()
            .collect())
    }

    async fn find_active_for_student(
        &self,
        student_id: Uuid,
        today: NaiveDate,
    ) -> RepoResult<Vec<Restriction>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.student_id == student_id && r.end_date >= today)
            .cloned()
            .collect())
    }

    async fn insert(&self, restriction: &Restriction) -> RepoResult<()> {
        self.rows.lock().unwrap().push(restriction.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepo {
    rows: Mutex<Vec<Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepo {
    async fn insert(&self, message: &Message) -> RepoResult<()> {
        self.rows.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_student(&self, student_id: Uuid) -> RepoResult<Vec<Message>> {
        let mut result: Vec<Message> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.student_id == student_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn mark_viewed(&self, student_id: Uuid) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut updated = 0;
        for m in rows
            .iter_mut()
            .filter(|m| m.student_id == student_id && !m.viewed_by_student)
        {
            m.viewed_by_student = true;
            updated += 1;
        }
        Ok(updated)
    }
}

// ============================================================================
// Prebuilt context
// ============================================================================

/// A ServiceContext backed by in-memory fakes, pre-seeded with one faculty,
/// one department, two lecturers and two students
pub struct TestContext {
    ctx: ServiceContext,
    availability: Arc<InMemoryAvailabilityRepo>,
    appointments: Arc<InMemoryAppointmentRepo>,
    restrictions: Arc<InMemoryRestrictionRepo>,
    messages: Arc<InMemoryMessageRepo>,
}

impl TestContext {
    pub async fn new() -> Self {
        let students = Arc::new(InMemoryStudentRepo::default());
        let lecturers = Arc::new(InMemoryLecturerRepo::default());
        let directory = Arc::new(InMemoryDirectoryRepo::default());
        let availability = Arc::new(InMemoryAvailabilityRepo::default());
        let appointments = Arc::new(InMemoryAppointmentRepo::default());
        let restrictions = Arc::new(InMemoryRestrictionRepo::default());
        let messages = Arc::new(InMemoryMessageRepo::default());

        directory.faculties.lock().unwrap().push(Faculty {
            id: fixtures::FACULTY_ID,
            name: "Engineering".to_string(),
        });
        directory.departments.lock().unwrap().push(Department {
            id: fixtures::DEPARTMENT_ID,
            faculty_id: fixtures::FACULTY_ID,
            name: "Computer Engineering".to_string(),
        });

        for (id, name) in [
            (fixtures::LECTURER_ID, "Dr. Ada Aksoy"),
            (fixtures::OTHER_LECTURER_ID, "Dr. Bora Bilgin"),
        ] {
            lecturers.rows.lock().unwrap().push(Lecturer {
                id,
                name: name.to_string(),
                email: format!("{id}@example.edu"),
                faculty_id: fixtures::FACULTY_ID,
                department_id: fixtures::DEPARTMENT_ID,
                created_at: Utc::now(),
            });
        }

        for (id, name) in [
            (fixtures::STUDENT_ID, "Cem Demir"),
            (fixtures::OTHER_STUDENT_ID, "Derya Erden"),
        ] {
            students.rows.lock().unwrap().push(Student {
                id,
                name: name.to_string(),
                email: format!("{id}@student.example.edu"),
                faculty_id: Some(fixtures::FACULTY_ID),
                department_id: Some(fixtures::DEPARTMENT_ID),
                year: Some("3".to_string()),
                created_at: Utc::now(),
            });
        }

        // Lazy pool: never actually connected by the in-memory fakes
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/unused")
            .expect("lazy pool");

        let ctx = ServiceContextBuilder::new()
            .pool(pool)
            .student_repo(students)
            .lecturer_repo(lecturers)
            .directory_repo(directory)
            .availability_repo(Arc::clone(&availability) as Arc<dyn AvailabilityRepository>)
            .appointment_repo(Arc::clone(&appointments) as Arc<dyn AppointmentRepository>)
            .restriction_repo(Arc::clone(&restrictions) as Arc<dyn RestrictionRepository>)
            .message_repo(Arc::clone(&messages) as Arc<dyn MessageRepository>)
            .notifier(Arc::new(NoopNotifier))
            .booking(BookingConfig::default())
            .build()
            .expect("test context");

        Self {
            ctx,
            availability,
            appointments,
            restrictions,
            messages,
        }
    }

    pub fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn today(&self) -> NaiveDate {
        self.ctx.today()
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today() + chrono::Duration::days(1)
    }

    /// Seed availability for the fixture lecturer
    pub fn publish_availability(&self, date: NaiveDate, windows: &[(NaiveTime, NaiveTime)]) {
        let ranges: Vec<TimeRange> = windows
            .iter()
            .map(|(start, end)| TimeRange::new(*start, *end).unwrap())
            .collect();
        let availability = Availability::new(fixtures::LECTURER_ID, date, ranges).unwrap();
        self.availability.rows.lock().unwrap().push(availability);
    }

    /// Seed an active restriction against the fixture lecturer
    pub fn restrict_student(&self, student_id: Uuid, days: u32) {
        let restriction =
            Restriction::starting(student_id, fixtures::LECTURER_ID, self.today(), days);
        self.restrictions.rows.lock().unwrap().push(restriction);
    }

    /// Cancel an appointment directly, bypassing the services
    pub fn cancel_appointment(&self, id: Uuid) {
        let mut rows = self.appointments.rows.lock().unwrap();
        let appointment = rows.iter_mut().find(|a| a.id == id).expect("appointment");
        appointment
            .apply(AppointmentAction::Cancel {
                by: appointment.student_id,
                reason: "test cleanup".to_string(),
            })
            .unwrap();
    }

    /// Fetch a stored appointment by id
    pub fn appointment(&self, id: Uuid) -> Appointment {
        self.appointments
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .expect("appointment")
    }

    /// Seed a stored appointment directly
    pub fn seed_appointment(&self, appointment: Appointment) {
        self.appointments.rows.lock().unwrap().push(appointment);
    }

    /// Seed a stored message directly
    pub fn seed_message(&self, message: Message) {
        self.messages.rows.lock().unwrap().push(message);
    }

    /// In-app messages written for a student, newest first
    pub fn messages_for(&self, student_id: Uuid) -> Vec<Message> {
        let mut result: Vec<Message> = self
            .messages
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.student_id == student_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    /// Restrictions stored for a (student, lecturer) pair
    pub fn restrictions_for(&self, student_id: Uuid, lecturer_id: Uuid) -> Vec<Restriction> {
        self.restrictions
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.student_id == student_id && r.lecturer_id == lecturer_id)
            .cloned()
            .collect()
    }
}
