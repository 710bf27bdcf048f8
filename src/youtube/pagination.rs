//! Sequential fetch-all over `nextPageToken` continuation.

use crate::youtube::client::YouTube;
use crate::youtube::error::Error;
use crate::youtube::query::Query;
use serde_json::Value;

/// How many items a fetch-all call may accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    /// Follow continuation tokens until the API reports no further page.
    #[default]
    Unbounded,
    /// Stop once this many items are collected. The result is truncated to
    /// exactly this length; no further page is requested after that.
    AtMost(usize),
}

impl Limit {
    /// Whether `collected` items already satisfy this limit.
    pub fn is_reached(&self, collected: usize) -> bool {
        match self {
            Limit::Unbounded => false,
            Limit::AtMost(max) => collected >= *max,
        }
    }

    /// Append `page` to `items`, never growing past the limit.
    fn extend(&self, items: &mut Vec<Value>, page: Vec<Value>) {
        match self {
            Limit::Unbounded => items.extend(page),
            Limit::AtMost(max) => {
                let room = max.saturating_sub(items.len());
                items.extend(page.into_iter().take(room));
            }
        }
    }
}

impl From<Option<usize>> for Limit {
    fn from(max: Option<usize>) -> Self {
        max.map_or(Limit::Unbounded, Limit::AtMost)
    }
}

impl YouTube {
    /// Fetch every page of a list endpoint and return the concatenated items.
    ///
    /// # Arguments
    /// * `path` - Resource path (e.g. `commentThreads`)
    /// * `query` - Fully built query for the first page, key included
    /// * `page_token` - Optional continuation token to start from
    /// * `limit` - Bound on the number of accumulated items
    ///
    /// # Returns
    /// * `Result<Vec<Value>, Error>` - All collected items, in page order
    ///
    /// # Details
    /// Pages are requested strictly one after another. Each page reuses
    /// `query` with `pageToken` set to the previous page's continuation
    /// token. Stops when a page has no token or `limit` is reached. Any
    /// error aborts the chain and the items gathered so far are dropped.
    pub(crate) async fn collect_pages(
        &self,
        path: &str,
        query: Query,
        page_token: Option<&str>,
        limit: Limit,
    ) -> Result<Vec<Value>, Error> {
        let mut items = Vec::new();
        let mut token = page_token.map(str::to_owned);
        let mut pages = 0usize;

        // A bound that is already met (`AtMost(0)`) issues no request at all
        while !limit.is_reached(items.len()) {
            let mut page_query = query.clone();
            if let Some(token) = &token {
                page_query.add_param("pageToken", token);
            }

            let page = self.page(path, &page_query).await?;
            pages += 1;
            limit.extend(&mut items, page.items);

            tracing::trace!(
                path,
                pages,
                collected = items.len(),
                next_page_token = page.next_page_token.as_deref(),
                "fetched page"
            );

            // No token means the API has nothing further; the loop condition
            // covers the bounded case
            match page.next_page_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        tracing::debug!(path, pages, collected = items.len(), "pagination finished");
        Ok(items)
    }
}
