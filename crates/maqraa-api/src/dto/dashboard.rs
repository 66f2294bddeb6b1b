//! Dashboard analytics DTOs

use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the back-office landing page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub student_count: Option<u64>,
    #[serde(default)]
    pub teacher_count: Option<u64>,
    #[serde(default)]
    pub manager_count: Option<u64>,
    #[serde(default)]
    pub circle_count: Option<u64>,
    #[serde(default)]
    pub active_subscriptions: Option<u64>,
    /// Share of `present` among recorded attendance, 0.0..=1.0.
    #[serde(default)]
    pub attendance_ratio: Option<f64>,
    #[serde(default)]
    pub monthly: Vec<MonthlyPoint>,
}

/// One month of attendance totals for the dashboard chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// `YYYY-MM`.
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub present: Option<u64>,
    #[serde(default)]
    pub absent: Option<u64>,
}
