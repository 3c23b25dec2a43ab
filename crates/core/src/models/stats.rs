use serde::{Deserialize, Serialize};

/// Head counts of everything attached to one school.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolStats {
    pub id: i64,
    pub courses: i64,
    pub admins: i64,
    pub teachers: i64,
    pub students: i64,
}
