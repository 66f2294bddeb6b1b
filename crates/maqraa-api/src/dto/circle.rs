//! Circle (class) DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One memorization circle: a teacher, a weekly schedule, and a roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    /// Comma-separated weekday codes, e.g. `"sun,tue,thu"`.
    #[serde(default)]
    pub days: Option<String>,
    /// `HH:MM` local time.
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub student_count: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A student enrolled in a circle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMember {
    pub student_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub joined_at: Option<NaiveDate>,
}

/// Payload for creating or updating a circle.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
