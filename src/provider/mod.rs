pub mod models;
pub mod query;
pub mod rate_limit;

use crate::config::Config;
use crate::error::{Error, RequestError, Result};

pub use models::{CurrentUser, Group, Page, ProviderId, Resource, User};
pub use query::{Active, GroupQuery, QueryParams, UserQuery};

/// Typed HTTP client for the TSheets REST API.
///
/// Cheap to clone; clones share the underlying connection pool. Holds no
/// credentials, the bearer token is passed per call.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("unable to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.api_base().to_string(),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch one page of a resource.
    ///
    /// Issues exactly one GET. Transport failures, non-2xx statuses and
    /// undecodable bodies all come back as a [`RequestError`]; only a 429 is
    /// flagged as rate limited.
    pub async fn fetch<R: Resource>(
        &self,
        query: &[(&str, String)],
        token: &str,
    ) -> std::result::Result<Page<R>, RequestError> {
        let url = self.url(R::PATH);
        log::debug!("GET {url} {query:?}");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RequestError::new(format!("error executing request: {e}")))?;

        if let Some(err) = rate_limit::classify_status(resp.status()) {
            return Err(err);
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| RequestError::new(format!("error reading response: {e}")))?;
        let page = models::decode_page::<R>(&body)
            .map_err(|e| RequestError::new(format!("unable to decode response: {e}")))?;

        log::debug!(
            "Fetched {} {} (more: {})",
            page.items.len(),
            R::PATH,
            page.more
        );
        Ok(page)
    }

    pub async fn users(
        &self,
        query: &UserQuery,
        token: &str,
    ) -> std::result::Result<Page<User>, RequestError> {
        self.fetch(&query.to_query(), token).await
    }

    pub async fn groups(
        &self,
        query: &GroupQuery,
        token: &str,
    ) -> std::result::Result<Page<Group>, RequestError> {
        self.fetch(&query.to_query(), token).await
    }

    /// Look up the user that owns `token`.
    pub async fn current_user(&self, token: &str) -> std::result::Result<User, RequestError> {
        let page: Page<CurrentUser> = self
            .fetch(&[("supplemental_data", "no".to_string())], token)
            .await?;
        page.items
            .into_iter()
            .next()
            .map(|current| current.0)
            .ok_or_else(|| RequestError::new("no users in response"))
    }
}
