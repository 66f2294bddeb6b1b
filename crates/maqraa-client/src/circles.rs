//! Circle roster and scheduling endpoints

use maqraa_api::dto::circle::{Circle, CircleInput, CircleMember};
use maqraa_api::page::PagedResult;
use maqraa_api::{ListRequest, ParamCasing};

use crate::error::Result;
use crate::http::HttpClient;

impl HttpClient {
    /// List circles with optional filtering and pagination.
    ///
    /// # Example
    /// ```no_run
    /// # use maqraa_client::HttpClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("http://localhost:5000")?;
    /// let page = client.list_circles()
    ///     .search("tajwid")
    ///     .teacher(7)
    ///     .page(0, 20)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn list_circles(&self) -> ListCirclesBuilder {
        ListCirclesBuilder::new(self.clone())
    }

    /// Get a single circle by id
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn get_circle(&self, id: i64) -> Result<Circle> {
        self.get(&format!("/api/circles/{id}")).await
    }

    /// Create a circle
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn create_circle(&self, input: &CircleInput) -> Result<Circle> {
        self.post("/api/circles", input).await
    }

    /// Update a circle
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn update_circle(&self, id: i64, input: &CircleInput) -> Result<Circle> {
        self.put(&format!("/api/circles/{id}"), input).await
    }

    /// Soft-delete a circle
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn delete_circle(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/circles/{id}")).await
    }

    /// List the students enrolled in a circle
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn list_circle_members(&self, circle_id: i64) -> Result<Vec<CircleMember>> {
        self.get(&format!("/api/circles/{circle_id}/members")).await
    }
}

/// Builder for the circle list endpoint (PascalCase query keys).
#[derive(Debug, Clone)]
pub struct ListCirclesBuilder {
    client: HttpClient,
    request: ListRequest,
    teacher_id: Option<i64>,
}

impl ListCirclesBuilder {
    fn new(client: HttpClient) -> Self {
        Self {
            client,
            request: ListRequest::default(),
            teacher_id: None,
        }
    }

    /// Replace the whole filter, e.g. with a pager's [`LoadPlan`] request.
    ///
    /// [`LoadPlan`]: crate::pager::LoadPlan
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

    /// Opaque narrowing filter, e.g. `inactive=true`
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.request.filter = Some(filter.into());
        self
    }

    /// Response language
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.request.lang = Some(lang.into());
        self
    }

    /// Only circles taught by this teacher
    #[must_use]
    pub fn teacher(mut self, teacher_id: i64) -> Self {
        self.teacher_id = Some(teacher_id);
        self
    }

    /// Execute the request
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn send(self) -> Result<PagedResult<Circle>> {
        let mut extra = Vec::new();
        if let Some(teacher_id) = self.teacher_id {
            extra.push(("TeacherId", teacher_id.to_string()));
        }
        let url = self
            .client
            .list_url("/api/circles", &self.request, ParamCasing::Pascal, &extra)?;
        let skip = self.request.skip_count.map(|s| s as i64);
        self.client.get_paged(url, skip).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_circles_url_building() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let builder = client
            .list_circles()
            .search("tajwid")
            .filter("inactive=true")
            .teacher(7)
            .page(1, 20);

        let url = builder
            .client
            .list_url(
                "/api/circles",
                &builder.request,
                ParamCasing::Pascal,
                &[("TeacherId", "7".to_string())],
            )
            .unwrap();

        let rendered = url.as_str();
        assert!(rendered.contains("SkipCount=20"));
        assert!(rendered.contains("MaxResultCount=20"));
        assert!(rendered.contains("SearchTerm=tajwid"));
        assert!(rendered.contains("Filter=inactive%3Dtrue"));
        assert!(rendered.contains("TeacherId=7"));
    }
}
