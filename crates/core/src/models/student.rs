use serde::{Deserialize, Serialize};

/// A student. `course_id` is the student's one current enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub school_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub name: String,
    pub school_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StudentPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
}
