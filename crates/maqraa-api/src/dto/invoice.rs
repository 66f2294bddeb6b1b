//! Teacher salary invoice DTOs

use serde::{Deserialize, Serialize};

/// One line of a teacher salary invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub circle_id: Option<i64>,
    #[serde(default)]
    pub circle_name: Option<String>,
    /// Sessions held during the invoice month.
    #[serde(default)]
    pub sessions: Option<u32>,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// A monthly salary invoice for one teacher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInvoice {
    pub id: i64,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    /// `YYYY-MM`.
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub is_paid: Option<bool>,
}

/// Request body for generating a teacher's invoice for one month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInvoiceRequest {
    pub teacher_id: i64,
    /// `YYYY-MM`.
    pub month: String,
}
