//! HTTP client wrapper for the backend REST API

use std::sync::{Arc, PoisonError, RwLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Helper for building and executing a single HTTP request
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request. Values that are not valid header text are skipped.
    pub fn header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Authenticate with a session token (`Authorization: Token <token>`)
    pub fn token_auth(self, token: &str) -> Self {
        self.header(AUTHORIZATION, &format!("Token {}", token))
    }

    /// Authenticate with HTTP Basic credentials
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{}:{}", username, password));
        self.header(AUTHORIZATION, &format!("Basic {}", encoded))
    }

    /// Append query parameters, keeping their order
    pub fn query(mut self, params: &[(&str, String)]) -> Self {
        self.query_params
            .extend(params.iter().map(|(k, v)| (k.to_string(), v.clone())));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    fn build(&self) -> Result<RequestBuilder> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                pairs.append_pair(key, value);
            }
        }

        debug!(method = %self.method, url = %url, "sending request");

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and decode the response body as JSON.
    ///
    /// An empty body decodes as JSON `null`, so `()`, `Option<T>` and
    /// `serde_json::Value` can be used for endpoints that answer 201/204
    /// without content.
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.build()?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "request rejected");
            return Err(Error::api(status.as_u16(), text));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Thin client for the backend: every path is relative to the configured base
/// URL, and an armed session token is attached to every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client for `base_url` using an existing reqwest client
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Attach `token` to every following request
    pub fn set_token(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Stop sending an authorization header
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The currently armed token, if any
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn request(&self, method: Method, path: &str) -> FetchBuilder<'_> {
        let builder = FetchBuilder::new(&self.client, &self.url(path), method);
        match self.token() {
            Some(token) => builder.token_auth(&token),
            None => builder,
        }
    }

    /// GET `path` with the given query parameters
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.request(Method::GET, path).query(query).execute().await
    }

    /// POST a JSON body to `path`
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path).json(body)?.execute().await
    }

    /// DELETE `path`
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path).execute().await
    }

    /// POST an empty JSON object to `path` with Basic credentials instead of
    /// the session token
    pub async fn post_with_basic_auth<T: DeserializeOwned>(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> Result<T> {
        FetchBuilder::new(&self.client, &self.url(path), Method::POST)
            .basic_auth(username, password)
            .json(&serde_json::json!({}))?
            .execute()
            .await
    }
}
