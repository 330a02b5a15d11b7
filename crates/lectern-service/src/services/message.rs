//! In-app message service
//!
//! Students read the messages other services write when lecturers act on
//! their appointments.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::MessageResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// In-app message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A student's messages, newest first
    #[instrument(skip(self))]
    pub async fn list_for_student(&self, student_id: Uuid) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().find_by_student(student_id).await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Mark all of a student's messages as viewed, returning how many changed
    #[instrument(skip(self))]
    pub async fn mark_viewed(&self, student_id: Uuid) -> ServiceResult<u64> {
        let updated = self.ctx.message_repo().mark_viewed(student_id).await?;
        if updated > 0 {
            info!(student_id = %student_id, updated, "Messages marked viewed");
        }
        Ok(updated)
    }
}
