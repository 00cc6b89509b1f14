//! Cursor pagination over list endpoints
//!
//! List responses carry a `data` array and a `next_cursor` token; a
//! missing or null token ends iteration. The paginator passes the token
//! back as the `cursor` query parameter on the next page.

use serde_json::Value;

use crate::client::BracketClient;
use crate::error::Result;

/// Walks a cursor-paginated endpoint one page at a time.
pub struct Paginator<'a> {
    client: &'a BracketClient,
    path: String,
    page_size: Option<u32>,
    cursor: Option<String>,
    finished: bool,
}

impl<'a> Paginator<'a> {
    pub(crate) fn new(client: &'a BracketClient, path: String) -> Self {
        Self {
            client,
            path,
            page_size: None,
            cursor: None,
            finished: false,
        }
    }

    /// Request pages of the given size via the `limit` parameter.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Fetch the next page of items; `None` once the cursor is exhausted.
    ///
    /// A shapeless response (no `data` array) is treated as an empty page.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Value>>> {
        if self.finished {
            return Ok(None);
        }

        let mut query: Vec<(String, String)> = Vec::new();
        if let Some(cursor) = &self.cursor {
            query.push(("cursor".to_string(), cursor.clone()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("limit".to_string(), page_size.to_string()));
        }

        let body = self.client.get(&self.path, Some(query)).await?;
        let payload = body.into_json().unwrap_or(Value::Null);

        let items = payload
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        self.cursor = payload
            .get("next_cursor")
            .and_then(Value::as_str)
            .map(str::to_owned);
        self.finished = self.cursor.is_none();

        Ok(Some(items))
    }

    /// Drain every remaining page into one vector.
    pub async fn items(mut self) -> Result<Vec<Value>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}
