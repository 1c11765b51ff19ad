//! HTTP client for the vendor's title search endpoint.

use std::time::Duration;

use nsearch_core::{AppConfig, ReleaseWindowScheme};
use reqwest::{Client, Url};

use crate::criteria::SearchCriteria;
use crate::error::SearchError;
use crate::session::SearchSession;
use crate::types::TitleRecord;

const DEFAULT_USER_AGENT: &str = "nsearch/0.1 (title-search)";

/// Client for the title search endpoint.
///
/// Owns the HTTP connection pool and the endpoint URL. Searches are run
/// through a [`SearchSession`] obtained from [`SearchClient::session`]; the
/// client itself keeps no per-search state and can back any number of
/// sessions.
///
/// Transport failures and non-2xx statuses are returned as
/// [`SearchError::Http`] without retrying.
#[derive(Debug)]
pub struct SearchClient {
    client: Client,
    base_url: Url,
    release_window_scheme: ReleaseWindowScheme,
}

impl SearchClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `config.base_url` is not a valid URL.
    pub fn new(config: &AppConfig) -> Result<Self, SearchError> {
        let client = Self::build(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(client.with_release_window_scheme(config.release_window_scheme))
    }

    /// Creates a client with a custom endpoint URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, SearchError> {
        Self::build(base_url, timeout_secs, DEFAULT_USER_AGENT)
    }

    fn build(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url.trim()).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            release_window_scheme: ReleaseWindowScheme::default(),
        })
    }

    /// Selects how year-month filters are turned into release-window indices.
    #[must_use]
    pub fn with_release_window_scheme(mut self, scheme: ReleaseWindowScheme) -> Self {
        self.release_window_scheme = scheme;
        self
    }

    #[must_use]
    pub fn release_window_scheme(&self) -> ReleaseWindowScheme {
        self.release_window_scheme
    }

    /// Starts a fresh paginated search for `criteria`.
    #[must_use]
    pub fn session(&self, criteria: SearchCriteria) -> SearchSession<'_> {
        SearchSession::new(self, criteria)
    }

    /// Runs a search to exhaustion and returns every title, in page order.
    ///
    /// All-or-nothing: if any page fails, titles from earlier pages are
    /// discarded and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`SearchSession::fetch_next_page`].
    /// Returns [`SearchError::PaginationLimit`] if more than `max_pages`
    /// pages would be needed. Every search needs at least one page, so a
    /// `max_pages` of 0 fails this way before any request is sent.
    pub async fn fetch_all(
        &self,
        criteria: SearchCriteria,
        max_pages: usize,
    ) -> Result<Vec<TitleRecord>, SearchError> {
        let mut session = self.session(criteria);
        let mut all_titles = Vec::new();
        let mut page_count = 0usize;

        while !session.is_exhausted() {
            page_count += 1;
            if page_count > max_pages {
                return Err(SearchError::PaginationLimit { max_pages });
            }
            all_titles.extend(session.fetch_next_page().await?);
        }

        Ok(all_titles)
    }

    /// Builds the request URL with properly percent-encoded query parameters.
    pub(crate) fn build_url(&self, params: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and returns the body
    /// decoded as UTF-8.
    ///
    /// The service's declared charset is unreliable, so the `Content-Type`
    /// header is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] on network failure or a non-2xx status,
    /// and [`SearchError::Decode`] if the body is not valid UTF-8.
    pub(crate) async fn request_text(&self, url: &Url) -> Result<String, SearchError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            SearchError::decode(
                url.to_string(),
                format!("response body is not valid UTF-8: {e}"),
            )
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
