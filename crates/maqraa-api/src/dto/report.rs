//! Attendance / memorization report DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance outcome recorded for one student in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }
}

/// One session report row for a student in a circle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleReport {
    pub id: i64,
    #[serde(default)]
    pub circle_id: Option<i64>,
    #[serde(default)]
    pub circle_name: Option<String>,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub attendance: Option<AttendanceStatus>,
    #[serde(default)]
    pub from_surah: Option<u16>,
    #[serde(default)]
    pub from_verse: Option<u16>,
    #[serde(default)]
    pub to_surah: Option<u16>,
    #[serde(default)]
    pub to_verse: Option<u16>,
    /// 1..=5 evaluation given by the teacher.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for recording one session report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub circle_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub attendance: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_surah: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_verse: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_surah: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_verse: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for the POST-based complex report filter endpoint.
///
/// This endpoint takes its filters in a JSON body instead of query
/// parameters; paging fields travel in the same body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilterBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<Vec<AttendanceStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}
