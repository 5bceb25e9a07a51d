//! Free-text document search against `GET <api>/<query>`.
//!
//! The server treats the unit separator as its tag delimiter, so the first
//! whitespace run of the query becomes U+001F before the query is escaped
//! into a single path segment.

use std::sync::LazyLock;

use log::{debug, info, warn};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use serde_json::Value;
use tags_states::{TaskHandle, TaskId, TaskSlot};

use crate::document::TAG_SEP;
use crate::http::Client;
use crate::render::{MarkupPolicy, render_document};
use crate::{BusinessConfig, Document, Error};

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_RESULTS_TEXT: &str = "No results.";
pub const FAILED_TEXT: &str = "Search failed.";

/// Bytes escaped in a path segment, on top of all non-ASCII bytes.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Replaces the first whitespace run with the tag separator. Later runs are
/// kept as they are.
pub fn collapse_first_whitespace(query: &str) -> String {
    WHITESPACE_RUN
        .replacen(query, 1, TAG_SEP.to_string())
        .into_owned()
}

/// The escaped path segment for `query`.
pub fn search_path(query: &str) -> String {
    utf8_percent_encode(&collapse_first_whitespace(query), PATH_SEGMENT).to_string()
}

pub fn search_url(config: &BusinessConfig, query: &str) -> String {
    format!("{}/{}", config.api_url(), search_path(query))
}

/// Decodes a search response, failing closed.
///
/// `null` and anything that is not an array mean no results; array entries
/// that are not documents are skipped.
pub fn decode_documents(body: &[u8]) -> Vec<Document> {
    let items = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Null) => return Vec::new(),
        Ok(other) => {
            warn!("search response is not a list: {other}");
            return Vec::new();
        }
        Err(e) => {
            warn!("search response is not JSON: {e}");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("skipping search result {index}: {e}");
                None
            }
        })
        .collect()
}

pub async fn fetch_documents(url: &str) -> Result<Vec<Document>, Error> {
    let response = Client::get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.is_success() {
        return Err(Error::Status {
            status: response.status,
            body: response.text().unwrap_or_default(),
        });
    }

    Ok(decode_documents(&response.body))
}

/// What the results mount shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    Loading,
    NoResults,
    Results(Vec<Document>),
    Failed(String),
}

impl SearchView {
    pub fn from_result(result: Result<Vec<Document>, Error>) -> Self {
        match result {
            Ok(docs) if docs.is_empty() => Self::NoResults,
            Ok(docs) => Self::Results(docs),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn render(&self, policy: MarkupPolicy) -> String {
        match self {
            Self::Loading => LOADING_TEXT.to_owned(),
            Self::NoResults => NO_RESULTS_TEXT.to_owned(),
            Self::Results(docs) => docs
                .iter()
                .map(|doc| render_document(doc, policy))
                .collect(),
            Self::Failed(_) => FAILED_TEXT.to_owned(),
        }
    }
}

/// A search that has been issued and not yet applied.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    handle: TaskHandle,
    url: String,
}

impl SearchRequest {
    pub fn id(&self) -> TaskId {
        self.handle.id()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs the request; `None` when a newer search cancelled it first.
    pub async fn execute(&self) -> Option<Result<Vec<Document>, Error>> {
        self.handle
            .run_until_cancelled(fetch_documents(&self.url))
            .await
    }
}

/// Issues searches and decides which completions may reach the page.
#[derive(Debug)]
pub struct SearchFlow {
    slot: TaskSlot,
}

impl Default for SearchFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchFlow {
    pub fn new() -> Self {
        Self {
            slot: TaskSlot::new("search"),
        }
    }

    /// Starts a search, superseding the one in flight.
    pub fn begin(&mut self, config: &BusinessConfig, query: &str) -> SearchRequest {
        let handle = self.slot.start();
        let url = search_url(config, query);
        info!("search {} -> {url}", handle.id());
        SearchRequest { handle, url }
    }

    /// The view for a finished request, or `None` if it is stale.
    pub fn complete(
        &mut self,
        id: TaskId,
        result: Result<Vec<Document>, Error>,
    ) -> Option<SearchView> {
        if let Err(e) = self.slot.accept(id) {
            debug!("dropping search result: {e}");
            return None;
        }
        if let Err(e) = &result {
            warn!("search {id} failed: {e}");
        }
        Some(SearchView::from_result(result))
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_running()
    }
}
