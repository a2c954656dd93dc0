//! HTTP client for the Paseo backend.
//!
//! Endpoints are described as plain [`Request`] values (method, path, auth
//! requirement, payload) by the per-resource modules and executed by
//! [`ApiClient::call`]. The bearer token is read from a token source at call
//! time, so the client never caches a credential that logout has revoked.

use std::rc::Rc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{status_message, ApiError};
use crate::models::PhotoUpload;
use crate::timer::with_timeout;
use store::ApiConfig;

/// Where the bearer token comes from. Usually the session store.
pub type TokenSource = Rc<dyn Fn() -> Option<String>>;

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text { name: &'static str, value: String },
    File { name: &'static str, upload: PhotoUpload },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

/// One backend call, before it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub authenticated: bool,
    pub payload: Payload,
}

impl Request {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authenticated: true,
            payload: Payload::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// No `Authorization` header (login and registration).
    pub fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.payload = Payload::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.payload = Payload::Multipart(fields);
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    token: TokenSource,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
            token: Rc::new(|| None),
        }
    }

    pub fn with_token_source(mut self, source: impl Fn() -> Option<String> + 'static) -> Self {
        self.token = Rc::new(source);
        self
    }

    pub fn with_static_token(self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.with_token_source(move || Some(token.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Public URL of an uploaded file, e.g. `asset_url("pets", "rocky.jpg")`.
    /// Absolute URLs pass through untouched.
    pub fn asset_url(&self, folder: &str, file: &str) -> String {
        if file.starts_with("http://") || file.starts_with("https://") {
            return file.to_string();
        }
        format!(
            "{}/uploads/{}/{}",
            self.base_url,
            folder,
            file.trim_start_matches('/')
        )
    }

    /// Send a request and decode the JSON response body.
    pub async fn call<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose response body is irrelevant.
    pub async fn call_ack(&self, request: Request) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: Request) -> Result<String, ApiError> {
        let method = request.method.clone();
        let path = request.path.clone();
        let builder = self.prepare(request)?;

        let send = async {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, ApiError>((status, text))
        };

        let (status, text) = match with_timeout(self.timeout, send).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(%method, %path, "request timed out");
                return Err(ApiError::Timeout(self.timeout));
            }
        }
        .inspect_err(|e| tracing::warn!(%method, %path, "request failed: {e}"))?;

        if !status.is_success() {
            let message = status_message(status, &text);
            tracing::warn!(%method, %path, status = status.as_u16(), "{message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%method, %path, status = status.as_u16(), "ok");
        Ok(text)
    }

    fn prepare(&self, request: Request) -> Result<reqwest::RequestBuilder, ApiError> {
        let mut builder = self.http.request(request.method, self.url(&request.path));

        if request.authenticated {
            let token = (self.token)()
                .filter(|t| !t.is_empty())
                .ok_or(ApiError::Unauthenticated)?;
            builder = builder.bearer_auth(token);
        }

        builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder.json(&value),
            Payload::Multipart(fields) => builder.multipart(build_form(fields)?),
        };
        Ok(builder)
    }
}

fn build_form(fields: Vec<FormField>) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, upload } => {
                let mime = upload
                    .mime()
                    .ok_or_else(|| ApiError::Multipart(format!("{} is not an image", upload.file_name)))?;
                let part = reqwest::multipart::Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(mime)
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
