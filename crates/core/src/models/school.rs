use serde::{Deserialize, Serialize};

/// A school. Every other record belongs to exactly one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// Checked column values for inserting or replacing a school.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolFields {
    pub name: String,
    pub address: String,
}

/// School as submitted by API clients, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchoolPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}
