//! Message entity <-> model mapper

use lectern_core::entities::Message;

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            lecturer_id: model.lecturer_id,
            student_id: model.student_id,
            content: model.content,
            viewed_by_student: model.viewed_by_student,
            created_at: model.created_at,
        }
    }
}
