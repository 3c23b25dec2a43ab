use serde::{Deserialize, Serialize};

/// A teacher employed by one school.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub school_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherFields {
    pub name: String,
    pub school_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeacherPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub school_id: Option<i64>,
}
