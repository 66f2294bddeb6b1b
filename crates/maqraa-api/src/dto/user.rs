//! Roster user DTOs (students, teachers, managers)

use serde::{Deserialize, Serialize};

/// Role of a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    Student,
    Teacher,
    Manager,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Manager => "manager",
        }
    }
}

/// One roster entry as returned by the lookup endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupUser {
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub nationality_id: Option<i64>,
    #[serde(default)]
    pub resident_group: Option<String>,
    /// Circle the student is enrolled in, when applicable.
    #[serde(default)]
    pub circle_id: Option<i64>,
    /// Teacher responsible for the student, when applicable.
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}
