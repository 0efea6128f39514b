use serde::{Deserialize, Serialize};

/// Profile returned by the auth endpoints. Extra server-side fields are
/// ignored; absent optional fields default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    pub fn new(id: i64, role: impl Into<String>) -> Self {
        Self { id, role: role.into(), email: None, name: None }
    }
}
