//! Subscription and billing DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A billing plan students can subscribe to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A student's subscription to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubscription {
    pub id: i64,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub plan_id: Option<i64>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_paid: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Payload for enrolling a student into a plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInput {
    pub student_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDate,
}
