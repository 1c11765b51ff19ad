//! Paginated search sessions.
//!
//! A session walks the result pages of one search in order. It starts
//! [`SessionState::Fresh`] on page 1, moves to [`SessionState::InProgress`]
//! after the first page, and ends [`SessionState::Exhausted`] once the last
//! title's row number reaches the server's total (or the total is zero).
//!
//! Sessions are forward-only: there is no way back to page 1 short of
//! starting a new session. A failed fetch leaves the cursor where it was, so
//! calling [`SearchSession::fetch_next_page`] again retries the same page.

use futures::stream::{self, Stream};

use crate::client::SearchClient;
use crate::criteria::SearchCriteria;
use crate::decode::decode_search_page;
use crate::encode::build_query_params;
use crate::error::SearchError;
use crate::types::TitleRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No page requested yet.
    Fresh,
    /// At least one page fetched; more remain.
    InProgress,
    /// Terminal; further fetches return no titles and issue no requests.
    Exhausted,
}

/// One search's pagination state over a borrowed [`SearchClient`].
#[derive(Debug)]
pub struct SearchSession<'a> {
    client: &'a SearchClient,
    criteria: SearchCriteria,
    page: u32,
    total_count: Option<u64>,
    state: SessionState,
}

impl<'a> SearchSession<'a> {
    pub(crate) fn new(client: &'a SearchClient, criteria: SearchCriteria) -> Self {
        Self {
            client,
            criteria,
            page: 1,
            total_count: None,
            state: SessionState::Fresh,
        }
    }

    #[must_use]
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state == SessionState::Exhausted
    }

    /// Page number the next fetch will request.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Server-reported total for these criteria; `None` until a page is decoded.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Fetches and decodes the next page of titles.
    ///
    /// Returns an empty `Vec` once the session is exhausted (without a
    /// request), or when the server reports zero matches. Any other
    /// successful call returns at least one title.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure or a non-2xx status.
    /// - [`SearchError::Xml`] / [`SearchError::Decode`] if the response cannot
    ///   be decoded, including a last title without a row number.
    ///
    /// On error the session state and cursor are unchanged.
    pub async fn fetch_next_page(&mut self) -> Result<Vec<TitleRecord>, SearchError> {
        if self.is_exhausted() {
            tracing::trace!(query = %self.criteria.query, "session exhausted; not fetching");
            return Ok(Vec::new());
        }

        let params = build_query_params(
            &self.criteria,
            self.client.release_window_scheme(),
            self.page,
        );
        let url = self.client.build_url(&params);
        tracing::debug!(
            query = %self.criteria.query,
            page = self.page,
            params = params.len(),
            "requesting search page"
        );

        let body = self.client.request_text(&url).await?;
        let page = decode_search_page(&body)?;

        if page.total_count == 0 {
            tracing::info!(query = %self.criteria.query, "search returned no titles");
            self.total_count = Some(0);
            self.state = SessionState::Exhausted;
            return Ok(Vec::new());
        }

        let Some(last) = page.titles.last() else {
            tracing::warn!(
                query = %self.criteria.query,
                page = self.page,
                total = page.total_count,
                "empty page before reaching the reported total; ending search"
            );
            self.total_count = Some(page.total_count);
            self.state = SessionState::Exhausted;
            return Ok(Vec::new());
        };

        let last_row = last.row_number().ok_or_else(|| {
            SearchError::decode(
                format!("page {}", self.page),
                "last title has no row number",
            )
        })?;

        if self.total_count.is_none() {
            tracing::info!(
                query = %self.criteria.query,
                total = page.total_count,
                "search matched titles"
            );
        }
        self.total_count = Some(page.total_count);

        if last_row >= page.total_count {
            self.state = SessionState::Exhausted;
        } else {
            self.page += 1;
            self.state = SessionState::InProgress;
        }

        tracing::debug!(
            titles = page.titles.len(),
            last_row,
            total = page.total_count,
            exhausted = self.is_exhausted(),
            "decoded search page"
        );

        Ok(page.titles)
    }

    /// Turns the session into a stream of pages.
    ///
    /// The stream ends when the session is exhausted, or right after yielding
    /// the first error. Pages are never empty.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<TitleRecord>, SearchError>> + 'a {
        stream::unfold(Some(self), |state| async move {
            let mut session = state?;
            if session.is_exhausted() {
                return None;
            }
            match session.fetch_next_page().await {
                Ok(titles) if titles.is_empty() => None,
                Ok(titles) => Some((Ok(titles), Some(session))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
