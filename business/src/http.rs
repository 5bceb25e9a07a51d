//! Platform-abstracted HTTP client.
//!
//! Native builds drive reqwest directly. On `wasm32`, reqwest's response types
//! wrap JS values and are not `Send`, so the request runs on the JS event loop
//! via `wasm_bindgen_futures::spawn_local` and the plain-data [`Response`] comes
//! back through a `flume` channel. Callers get the same future on both.

use std::collections::HashMap;

use thiserror::Error;

/// The verbs the tags API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A response reduced to Send-safe data.
///
/// The body is read completely before the response is handed back, so a
/// `Response` never borrows from the transport and can cross the wasm
/// channel as plain bytes.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code, e.g. `200`.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// Whether the status is in the `2xx` range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Decodes the body as JSON into `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure: the request never produced a response.
///
/// A response with a non-`2xx` status is not an `HttpError`; callers check
/// [`Response::is_success`] themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

/// A request under construction. Nothing is sent until [`RequestBuilder::send`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a request header; a later value for the same name wins.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serializes `value` as the body and sets the JSON content type.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    /// Sends the request and waits for the whole body.
    ///
    /// On `wasm32` the request runs as a local JS task; dropping the returned
    /// future abandons the result but does not abort the fetch.
    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.execute().await
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.send_wasm().await
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_wasm(self) -> HttpResult<Response> {
        let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);

        wasm_bindgen_futures::spawn_local(async move {
            let result = self.execute().await;
            // The receiver is gone when the caller dropped the future.
            let _ = tx.send_async(result).await;
        });

        rx.recv_async()
            .await
            .map_err(|_| HttpError::new("request dropped before completion"))?
    }

    async fn execute(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();
        let mut request = match self.method {
            Method::Get => client.get(&self.url),
            Method::Post => client.post(&self.url),
        };

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}

/// Entry point for building requests.
///
/// ```ignore
/// let response = Client::get("/api/rust").send().await?;
/// let docs: serde_json::Value = response.json()?;
/// ```
pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }
}
