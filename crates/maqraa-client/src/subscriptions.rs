//! Subscription and billing endpoints

use maqraa_api::dto::subscription::{StudentSubscription, SubscriptionInput, SubscriptionPlan};
use maqraa_api::page::PagedResult;
use maqraa_api::{ListRequest, ParamCasing};

use crate::error::Result;
use crate::http::HttpClient;

impl HttpClient {
    /// List student subscriptions with optional filtering and pagination.
    #[must_use]
    pub fn list_subscriptions(&self) -> ListSubscriptionsBuilder {
        ListSubscriptionsBuilder::new(self.clone())
    }

    /// List the available billing plans
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>> {
        self.get("/api/subscriptions/plans").await
    }

    /// Enroll a student into a plan
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn subscribe(&self, input: &SubscriptionInput) -> Result<StudentSubscription> {
        self.post("/api/subscriptions", input).await
    }

    /// Cancel a subscription
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn cancel_subscription(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/subscriptions/{id}")).await
    }
}

/// Builder for the subscription list endpoint (PascalCase query keys).
#[derive(Debug, Clone)]
pub struct ListSubscriptionsBuilder {
    client: HttpClient,
    request: ListRequest,
    student_id: Option<i64>,
}

impl ListSubscriptionsBuilder {
    fn new(client: HttpClient) -> Self {
        Self {
            client,
            request: ListRequest::default(),
            student_id: None,
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

    /// Opaque narrowing filter, e.g. `unpaid=true`
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.request.filter = Some(filter.into());
        self
    }

    /// Only subscriptions of this student
    #[must_use]
    pub fn student(mut self, student_id: i64) -> Self {
        self.student_id = Some(student_id);
        self
    }

    /// Execute the request
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn send(self) -> Result<PagedResult<StudentSubscription>> {
        let mut extra = Vec::new();
        if let Some(student_id) = self.student_id {
            extra.push(("StudentId", student_id.to_string()));
        }
        let url = self.client.list_url(
            "/api/subscriptions",
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
    fn list_subscriptions_url_building() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let builder = client
            .list_subscriptions()
            .student(42)
            .filter("unpaid=true")
            .page(0, 10);

        let url = builder
            .client
            .list_url(
                "/api/subscriptions",
                &builder.request,
                ParamCasing::Pascal,
                &[("StudentId", "42".to_string())],
            )
            .unwrap();

        let rendered = url.as_str();
        assert!(rendered.contains("StudentId=42"));
        assert!(rendered.contains("Filter=unpaid%3Dtrue"));
        assert!(rendered.contains("SkipCount=0"));
    }
}
