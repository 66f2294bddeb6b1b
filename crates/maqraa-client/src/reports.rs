//! Attendance report endpoints

use chrono::NaiveDate;

use maqraa_api::dto::report::{CircleReport, ReportFilterBody, ReportInput};
use maqraa_api::page::PagedResult;
use maqraa_api::{ListRequest, ParamCasing};

use crate::error::Result;
use crate::http::HttpClient;

impl HttpClient {
    /// List session reports with optional filtering and pagination.
    #[must_use]
    pub fn list_reports(&self) -> ListReportsBuilder {
        ListReportsBuilder::new(self.clone())
    }

    /// Record one session report
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn create_report(&self, input: &ReportInput) -> Result<CircleReport> {
        self.post("/api/circle-reports", input).await
    }

    /// The complex report query; filters travel in a JSON body instead of
    /// query parameters.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn reports_by_filter(
        &self,
        body: &ReportFilterBody,
    ) -> Result<PagedResult<CircleReport>> {
        let url = self.url("/api/circle-reports/type-results")?;
        let skip = body.skip_count.map(|s| s as i64);
        self.post_paged(url, body, skip).await
    }
}

/// Builder for the report list endpoint (PascalCase query keys).
#[derive(Debug, Clone)]
pub struct ListReportsBuilder {
    client: HttpClient,
    request: ListRequest,
    circle_id: Option<i64>,
    student_id: Option<i64>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
}

impl ListReportsBuilder {
    fn new(client: HttpClient) -> Self {
        Self {
            client,
            request: ListRequest::default(),
            circle_id: None,
            student_id: None,
            from_date: None,
            to_date: None,
        }
    }

    /// Replace the whole filter
    #[must_use]
    pub fn request(mut self, request: ListRequest) -> Self {
        self.request = request;
        self
    }

    /// Free-text search
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.request.search_term = Some(term.into());
        self
    }

    /// Position at `page_index * page_size`
    #[must_use]
    pub fn page(mut self, page_index: u64, page_size: u64) -> Self {
        self.request = self.request.page(page_index, page_size);
        self
    }

    /// Only reports for this circle
    #[must_use]
    pub fn circle(mut self, circle_id: i64) -> Self {
        self.circle_id = Some(circle_id);
        self
    }

    /// Only reports for this student
    #[must_use]
    pub fn student(mut self, student_id: i64) -> Self {
        self.student_id = Some(student_id);
        self
    }

    /// Only reports on or after this date
    #[must_use]
    pub fn from(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    /// Only reports on or before this date
    #[must_use]
    pub fn to(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    /// Execute the request
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn send(self) -> Result<PagedResult<CircleReport>> {
        let mut extra = Vec::new();
        if let Some(circle_id) = self.circle_id {
            extra.push(("CircleId", circle_id.to_string()));
        }
        if let Some(student_id) = self.student_id {
            extra.push(("StudentId", student_id.to_string()));
        }
        if let Some(from) = self.from_date {
            extra.push(("FromDate", from.to_string()));
        }
        if let Some(to) = self.to_date {
            extra.push(("ToDate", to.to_string()));
        }
        let url = self.client.list_url(
            "/api/circle-reports",
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
    fn list_reports_url_building() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let builder = client
            .list_reports()
            .circle(3)
            .student(11)
            .from(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap())
            .to(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap())
            .page(0, 50);

        let mut extra = Vec::new();
        extra.push(("CircleId", "3".to_string()));
        extra.push(("StudentId", "11".to_string()));
        extra.push(("FromDate", "2026-08-01".to_string()));
        extra.push(("ToDate", "2026-08-31".to_string()));
        let url = builder
            .client
            .list_url(
                "/api/circle-reports",
                &builder.request,
                ParamCasing::Pascal,
                &extra,
            )
            .unwrap();

        let rendered = url.as_str();
        assert!(rendered.contains("SkipCount=0"));
        assert!(rendered.contains("CircleId=3"));
        assert!(rendered.contains("StudentId=11"));
        assert!(rendered.contains("FromDate=2026-08-01"));
        assert!(rendered.contains("ToDate=2026-08-31"));
    }

    #[test]
    fn filter_body_omits_undefined_fields() {
        let body = ReportFilterBody {
            circle_id: Some(3),
            skip_count: Some(0),
            max_result_count: Some(20),
            ..ReportFilterBody::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["circleId"], 3);
        assert!(json.get("studentIds").is_none());
        assert!(json.get("fromDate").is_none());
    }
}
