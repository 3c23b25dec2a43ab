use serde::{Deserialize, Serialize};

/// A course held at a school and taught by one teacher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub school_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseFields {
    pub name: String,
    pub location: String,
    pub school_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoursePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
}
