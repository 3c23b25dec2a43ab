use serde::{Deserialize, Serialize};

/// Transfer body as submitted by API clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub from_course_id: Option<i64>,
    #[serde(default)]
    pub to_course_id: Option<i64>,
}

/// A well-formed request to move a student between courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub student_id: i64,
    pub from_course_id: i64,
    pub to_course_id: i64,
}

/// Where the transactional check-and-move stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDisposition {
    StudentMissing,
    NotEnrolled,
    CourseMissing,
    Transferred,
}

/// In-band result of a transfer. Business-rule failures are reported here,
/// never as errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferOutcome {
    pub success: bool,
    pub message: String,
}
