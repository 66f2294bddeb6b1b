//! Roster lookup endpoint (students, teachers, managers)

use maqraa_api::dto::user::{LookupUser, UserRole};
use maqraa_api::page::PagedResult;
use maqraa_api::{ListRequest, ParamCasing};

use crate::error::Result;
use crate::http::HttpClient;

impl HttpClient {
    /// List roster users with optional filtering and pagination.
    ///
    /// # Example
    /// ```no_run
    /// # use maqraa_client::HttpClient;
    /// # use maqraa_api::dto::user::UserRole;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("http://localhost:5000")?;
    /// let students = client.list_users()
    ///     .role(UserRole::Student)
    ///     .search("ahmad")
    ///     .page(0, 10)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn list_users(&self) -> ListUsersBuilder {
        ListUsersBuilder::new(self.clone())
    }

    /// Get a single roster user by id
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn get_user(&self, id: i64) -> Result<LookupUser> {
        self.get(&format!("/api/lookup/users/{id}")).await
    }
}

/// Builder for the lookup list endpoint.
///
/// This endpoint predates the others and takes camelCase keys, with the
/// search under `searchWord` instead of `searchTerm`.
#[derive(Debug, Clone)]
pub struct ListUsersBuilder {
    client: HttpClient,
    request: ListRequest,
    role: Option<UserRole>,
    nationality_id: Option<i64>,
    resident_group: Option<String>,
}

impl ListUsersBuilder {
    fn new(client: HttpClient) -> Self {
        Self {
            client,
            request: ListRequest::default(),
            role: None,
            nationality_id: None,
            resident_group: None,
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

    /// Response language
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.request.lang = Some(lang.into());
        self
    }

    /// Only users with this role
    #[must_use]
    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Only users of this nationality
    #[must_use]
    pub fn nationality(mut self, nationality_id: i64) -> Self {
        self.nationality_id = Some(nationality_id);
        self
    }

    /// Only users in this resident group
    #[must_use]
    pub fn resident_group(mut self, group: impl Into<String>) -> Self {
        self.resident_group = Some(group.into());
        self
    }

    /// Execute the request
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn send(self) -> Result<PagedResult<LookupUser>> {
        // searchWord, not searchTerm, on this endpoint
        let mut request = self.request.clone();
        let search = request.search_term.take();

        let mut extra = Vec::new();
        if let Some(word) = search.filter(|s| !s.is_empty()) {
            extra.push(("searchWord", word));
        }
        if let Some(role) = self.role {
            extra.push(("role", role.as_str().to_string()));
        }
        if let Some(nationality_id) = self.nationality_id {
            extra.push(("nationalityId", nationality_id.to_string()));
        }
        if let Some(group) = self.resident_group.filter(|s| !s.is_empty()) {
            extra.push(("residentGroup", group));
        }

        let url =
            self.client
                .list_url("/api/lookup/users", &request, ParamCasing::Camel, &extra)?;
        let skip = request.skip_count.map(|s| s as i64);
        self.client.get_paged(url, skip).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_camel_keys_and_search_word() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let builder = client
            .list_users()
            .search("ahmad")
            .role(UserRole::Student)
            .nationality(4)
            .resident_group("north")
            .page(2, 10);

        let mut request = builder.request.clone();
        let search = request.search_term.take();
        let mut extra = Vec::new();
        if let Some(word) = search {
            extra.push(("searchWord", word));
        }
        extra.push(("role", "student".to_string()));
        extra.push(("nationalityId", "4".to_string()));
        extra.push(("residentGroup", "north".to_string()));

        let url = builder
            .client
            .list_url("/api/lookup/users", &request, ParamCasing::Camel, &extra)
            .unwrap();

        let rendered = url.as_str();
        assert!(rendered.contains("skipCount=20"));
        assert!(rendered.contains("maxResultCount=10"));
        assert!(rendered.contains("searchWord=ahmad"));
        assert!(!rendered.contains("SearchTerm"));
        assert!(rendered.contains("role=student"));
        assert!(rendered.contains("nationalityId=4"));
        assert!(rendered.contains("residentGroup=north"));
    }
}
