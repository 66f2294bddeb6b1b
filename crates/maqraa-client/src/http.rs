//! HTTP client for the maqraa backend

use std::sync::{Arc, RwLock};

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use maqraa_api::page::{PagedResult, RawPage, normalize_response};
use maqraa_api::{ApiResponse, ListRequest, ParamCasing};

use crate::error::{ClientError, Result};
use crate::session::{MemorySessionStore, Session, SessionStore};

/// HTTP client for the maqraa back-office API.
///
/// Cheap to clone; all clones share the same session and store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    store: Arc<dyn SessionStore>,
    session: Arc<RwLock<Option<Session>>>,
}

impl HttpClient {
    /// Create a client with an in-memory session store.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    ///
    /// # Example
    /// ```no_run
    /// use maqraa_client::HttpClient;
    ///
    /// let client = HttpClient::new("http://localhost:5000")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_store(base_url, Arc::new(MemorySessionStore::default()))
    }

    /// Create a client backed by an explicit session store.
    ///
    /// A previously persisted session, if the store has a valid one, is
    /// picked up immediately.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_store(base_url: impl AsRef<str>, store: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        let session = Arc::new(RwLock::new(store.load()));
        Ok(Self {
            client: Client::new(),
            base_url,
            store,
            session,
        })
    }

    /// Build a full URL from a path
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// The currently installed session, if any.
    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Install a session and persist it to the store.
    pub(crate) fn install_session(&self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session);
        Ok(())
    }

    /// Drop the current session and clear the store.
    pub(crate) fn drop_session(&self) -> Result<()> {
        self.store.clear()?;
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }

    /// Attach the bearer token when a session is present.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session() {
            Some(session) => request.bearer_auth(session.tokens.access_token),
            None => request,
        }
    }

    /// Send a request and deserialize the response envelope.
    ///
    /// Non-2xx statuses become [`ClientError::Api`]; the envelope itself
    /// is not unwrapped here.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// Perform a GET request and unwrap the envelope
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let envelope: ApiResponse<T> = self.execute(self.client.get(url)).await?;
        envelope.into_result().map_err(Into::into)
    }

    /// Perform a POST request with JSON body and unwrap the envelope
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Serialize,
    ) -> Result<T> {
        let url = self.url(path)?;
        let envelope: ApiResponse<T> = self.execute(self.client.post(url).json(&body)).await?;
        envelope.into_result().map_err(Into::into)
    }

    /// Perform a PUT request with JSON body and unwrap the envelope
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Serialize,
    ) -> Result<T> {
        let url = self.url(path)?;
        let envelope: ApiResponse<T> = self.execute(self.client.put(url).json(&body)).await?;
        envelope.into_result().map_err(Into::into)
    }

    /// Perform a DELETE request; only the envelope status matters
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        let envelope: ApiResponse<Value> = self.execute(self.client.delete(url)).await?;
        if !envelope.is_success {
            return Err(ClientError::Backend(envelope.errors));
        }
        Ok(())
    }

    /// GET a paged list: envelope, then normalization, then the strict
    /// decode into typed rows.
    pub(crate) async fn get_paged<T: DeserializeOwned>(
        &self,
        url: Url,
        requested_skip: Option<i64>,
    ) -> Result<PagedResult<T>> {
        let envelope: ApiResponse<RawPage> = self.execute(self.client.get(url)).await?;
        Self::finish_paged(envelope, requested_skip)
    }

    /// POST a filter body and treat the response as a paged list.
    pub(crate) async fn post_paged<T: DeserializeOwned>(
        &self,
        url: Url,
        body: impl Serialize,
        requested_skip: Option<i64>,
    ) -> Result<PagedResult<T>> {
        let envelope: ApiResponse<RawPage> = self.execute(self.client.post(url).json(&body)).await?;
        Self::finish_paged(envelope, requested_skip)
    }

    fn finish_paged<T: DeserializeOwned>(
        envelope: ApiResponse<RawPage>,
        requested_skip: Option<i64>,
    ) -> Result<PagedResult<T>> {
        if !envelope.is_success {
            return Err(ClientError::Backend(envelope.errors));
        }
        let page = normalize_response(envelope, requested_skip)
            .data
            .unwrap_or_default();
        page.decode().map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Append filter pairs to a list URL under the endpoint's casing.
    pub(crate) fn list_url(
        &self,
        path: &str,
        request: &ListRequest,
        casing: ParamCasing,
        extra: &[(&str, String)],
    ) -> Result<Url> {
        let mut url = self.url(path)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in request.query_pairs(casing) {
                query.append_pair(key, &value);
            }
            for (key, value) in extra {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maqraa_api::SortDirection;

    #[test]
    fn client_creation() {
        assert!(HttpClient::new("http://localhost:5000").is_ok());
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(HttpClient::new("not a url").is_err());
    }

    #[test]
    fn url_building() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let url = client.url("/api/circles").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/circles");
    }

    #[test]
    fn list_url_appends_filter_and_extra_pairs() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let request = ListRequest {
            search_term: Some("nur".to_string()),
            sort_direction: Some(SortDirection::Asc),
            ..ListRequest::default()
        }
        .page(1, 20);

        let url = client
            .list_url(
                "/api/circles",
                &request,
                ParamCasing::Pascal,
                &[("TeacherId", "7".to_string())],
            )
            .unwrap();

        let rendered = url.as_str();
        assert!(rendered.contains("SkipCount=20"));
        assert!(rendered.contains("MaxResultCount=20"));
        assert!(rendered.contains("SearchTerm=nur"));
        assert!(rendered.contains("SortingDirection=asc"));
        assert!(rendered.contains("TeacherId=7"));
    }

    #[test]
    fn no_session_means_no_session() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        assert!(client.session().is_none());
    }
}
