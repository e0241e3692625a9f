//! HTTP transport for the REST API
//!
//! Request/response types and the client that executes them. Every request is
//! sent with headers from [`HeaderBuilder`] for an [`AuthSnapshot`] taken by
//! the caller. Every non-2xx response is decoded through [`ApiError`] and
//! returned as [`Error::Api`](crate::Error::Api).

use crate::headers::HeaderBuilder;
use crate::session::AuthSnapshot;
use crate::status::ApiError;
use crate::Result;
use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Default REST base url
pub const DEFAULT_API_URL: &str = "https://service.narvii.com/api/v1";

/// Milliseconds since the Unix epoch, as sent in every request body
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One API request
///
/// `path` is relative to the API base url and may already carry a query
/// string; extra `params` are appended.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base url (e.g. `/g/s/auth/login`)
    pub path: String,
    /// Query parameters
    pub params: Vec<(String, String)>,
    /// Request body
    pub body: Option<Vec<u8>>,
    /// Content type override for non-JSON bodies
    pub content_type: Option<String>,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
            content_type: None,
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Create a DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Set a JSON body
    pub fn json_body<T: Serialize>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        self.content_type = None;
        Ok(self)
    }

    /// Set a raw body with its content type
    pub fn raw_body(mut self, body: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.body = Some(body);
        self.content_type = Some(content_type.into());
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// A successful API response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Decoded body, `Null` when the body is empty
    pub data: Value,
}

impl ApiResponse {
    /// Get a header value
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base API url
    pub api_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// `Accept-Language` value
    pub language: String,
    /// Extra headers sent with every request
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            language: "en-US".to_string(),
            default_headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Create a config for a base url
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `Accept-Language` value
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

/// Executes API requests
#[derive(Debug, Clone)]
pub struct ApiHttpClient {
    client: ReqwestClient,
    config: HttpClientConfig,
    headers: HeaderBuilder,
}

impl ApiHttpClient {
    /// Create a client
    pub fn new(config: HttpClientConfig, headers: HeaderBuilder) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(config.timeout).build()?;
        let headers = headers.with_language(config.language.clone());
        Ok(Self {
            client,
            config,
            headers,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Full url for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Execute a request with the given credentials
    pub async fn execute(&self, request: ApiRequest, auth: &AuthSnapshot) -> Result<ApiResponse> {
        let url = self.url(&request.path);

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if !request.params.is_empty() {
            req = req.query(&request.params);
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        let headers = self.headers.build(
            auth,
            request.body.as_deref(),
            request.content_type.as_deref(),
        );
        for (key, value) in &headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        tracing::debug!(method = request.method.as_str(), path = %request.path, "API request");

        let response = req.send().await?;
        self.parse_response(request.method, &request.path, response)
            .await
    }

    async fn parse_response(
        &self,
        method: HttpMethod,
        path: &str,
        response: ReqwestResponse,
    ) -> Result<ApiResponse> {
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.to_string(), value_str.to_string());
            }
        }

        let success = response.status().is_success();
        let body = response.text().await?;

        if !success {
            let error = match serde_json::from_str::<Value>(&body) {
                Ok(payload) => ApiError::from_payload(status, payload),
                Err(_) => ApiError::from_text(status, &body),
            };
            tracing::warn!(
                method = method.as_str(),
                path,
                status,
                code = error.code,
                kind = ?error.kind,
                "API request failed"
            );
            return Err(error.into());
        }

        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        Ok(ApiResponse {
            status,
            headers,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_get() {
        let req = ApiRequest::get("/g/s/user-profile/u-1").param("start", 0).param("size", 25);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/g/s/user-profile/u-1");
        assert_eq!(
            req.params,
            vec![
                ("start".to_string(), "0".to_string()),
                ("size".to_string(), "25".to_string())
            ]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn test_request_json_body() {
        let req = ApiRequest::post("/g/s/auth/login")
            .json_body(&json!({"email": "a@b.c"}))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let body = String::from_utf8(req.body.unwrap()).unwrap();
        assert!(body.contains("a@b.c"));
        assert!(req.content_type.is_none());
    }

    #[test]
    fn test_request_raw_body() {
        let req = ApiRequest::post("/g/s/media/upload").raw_body(vec![1, 2, 3], "image/jpg");
        assert_eq!(req.body, Some(vec![1, 2, 3]));
        assert_eq!(req.content_type.as_deref(), Some("image/jpg"));
    }

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_config_default() {
        let config = HttpClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.language, "en-US");
    }

    #[test]
    fn test_config_builder() {
        let config = HttpClientConfig::new("http://localhost:1234/api/v1/")
            .with_timeout(Duration::from_secs(5))
            .with_language("pt-BR")
            .with_header("X-Test", "1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.default_headers.get("X-Test"), Some(&"1".to_string()));

        let client = ApiHttpClient::new(config, HeaderBuilder::new("agent")).unwrap();
        assert_eq!(
            client.url("/g/s/auth/login"),
            "http://localhost:1234/api/v1/g/s/auth/login"
        );
    }

    #[test]
    fn test_timestamp_is_milliseconds() {
        let ts = timestamp_ms();
        assert!(ts > 1_600_000_000_000);
    }
}
