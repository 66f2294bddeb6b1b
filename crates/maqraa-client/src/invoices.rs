//! Teacher salary invoice endpoints

use maqraa_api::dto::invoice::{GenerateInvoiceRequest, TeacherInvoice};
use maqraa_api::page::PagedResult;
use maqraa_api::{ListRequest, ParamCasing};

use crate::error::Result;
use crate::http::HttpClient;

impl HttpClient {
    /// List teacher invoices with optional filtering and pagination.
    #[must_use]
    pub fn list_invoices(&self) -> ListInvoicesBuilder {
        ListInvoicesBuilder::new(self.clone())
    }

    /// Compute and store a teacher's salary invoice for one month.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn generate_invoice(&self, teacher_id: i64, month: &str) -> Result<TeacherInvoice> {
        let request = GenerateInvoiceRequest {
            teacher_id,
            month: month.to_string(),
        };
        self.post("/api/teacher-invoices/generate", &request).await
    }

    /// Mark an invoice as paid
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn mark_invoice_paid(&self, id: i64) -> Result<TeacherInvoice> {
        self.post(&format!("/api/teacher-invoices/{id}/pay"), serde_json::json!({}))
            .await
    }
}

/// Builder for the invoice list endpoint (PascalCase query keys).
#[derive(Debug, Clone)]
pub struct ListInvoicesBuilder {
    client: HttpClient,
    request: ListRequest,
    teacher_id: Option<i64>,
    month: Option<String>,
}

impl ListInvoicesBuilder {
    fn new(client: HttpClient) -> Self {
        Self {
            client,
            request: ListRequest::default(),
            teacher_id: None,
            month: None,
        }
    }

    /// Replace the whole filter
    #[must_use]
    pub fn request(mut self, request: ListRequest) -> Self {
        self.request = request;
        self
    }

    /// Position at `page_index * page_size`
    #[must_use]
    pub fn page(mut self, page_index: u64, page_size: u64) -> Self {
        self.request = self.request.page(page_index, page_size);
        self
    }

    /// Only invoices of this teacher
    #[must_use]
    pub fn teacher(mut self, teacher_id: i64) -> Self {
        self.teacher_id = Some(teacher_id);
        self
    }

    /// Only invoices for this `YYYY-MM` month
    #[must_use]
    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    /// Execute the request
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn send(self) -> Result<PagedResult<TeacherInvoice>> {
        let mut extra = Vec::new();
        if let Some(teacher_id) = self.teacher_id {
            extra.push(("TeacherId", teacher_id.to_string()));
        }
        if let Some(month) = self.month.filter(|s| !s.is_empty()) {
            extra.push(("Month", month));
        }
        let url = self.client.list_url(
            "/api/teacher-invoices",
            &self.request,
            ParamCasing::Pascal,
            &extra,
        )?;
        let skip = self.request.skip_count.map(|s| s as i64);
        self.client.get_paged(url, skip).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_invoices_url_building() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let builder = client.list_invoices().teacher(7).month("2026-08").page(0, 10);

        let url = builder
            .client
            .list_url(
                "/api/teacher-invoices",
                &builder.request,
                ParamCasing::Pascal,
                &[
                    ("TeacherId", "7".to_string()),
                    ("Month", "2026-08".to_string()),
                ],
            )
            .unwrap();

        assert!(url.as_str().contains("TeacherId=7"));
        assert!(url.as_str().contains("Month=2026-08"));
    }
}
