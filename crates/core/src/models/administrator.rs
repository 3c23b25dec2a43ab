use serde::{Deserialize, Serialize};

/// A school administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Administrator {
    pub id: i64,
    pub name: String,
    pub school_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdministratorFields {
    pub name: String,
    pub school_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdministratorPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub school_id: Option<i64>,
}
