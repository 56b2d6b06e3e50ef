//! HTTP client for the forms API
//!
//! Talks JSON to the management endpoints of the forms backend. The base URL,
//! endpoint paths and CSRF token are passed in explicitly through
//! [`ApiConfig`]; the client never reads global state.

use super::error::{ApiError, FieldErrors};
use super::traits::FormsApi;
use crate::state::{CopiedForm, FormDefinition, FormPayload, FormStep};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Default API base address
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
/// Default path of the form management endpoint
pub const DEFAULT_FORMS_ENDPOINT: &str = "/_manage_forms";
/// Default path of the form definitions listing
pub const DEFAULT_FORM_DEFINITIONS_ENDPOINT: &str = "/api/v1/form-definitions";
/// Header carrying the CSRF token on mutating requests
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Resolved connection settings for the forms API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub forms_endpoint: String,
    pub form_definitions_endpoint: String,
    pub csrf_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            forms_endpoint: DEFAULT_FORMS_ENDPOINT.to_string(),
            form_definitions_endpoint: DEFAULT_FORM_DEFINITIONS_ENDPOINT.to_string(),
            csrf_token: None,
        }
    }
}

impl ApiConfig {
    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_matches('/')
        )
    }

    /// `{base}/{forms}/{uuid}`
    pub fn form_url(&self, form_uuid: Uuid) -> String {
        format!("{}/{form_uuid}", self.endpoint_url(&self.forms_endpoint))
    }

    /// `{base}/{forms}/{uuid}/copy_form`
    pub fn copy_form_url(&self, form_uuid: Uuid) -> String {
        format!("{}/copy_form", self.form_url(form_uuid))
    }

    /// `{base}/{form-definitions}`
    pub fn form_definitions_url(&self) -> String {
        self.endpoint_url(&self.form_definitions_endpoint)
    }
}

/// Client for the forms API
#[derive(Debug, Clone)]
pub struct FormsClient {
    http: Client,
    config: ApiConfig,
}

impl FormsClient {
    /// Create a new client for the given configuration
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("form-admin-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Attach the CSRF token, if configured, to a mutating request
    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.csrf_token {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let res = request
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "forms API request failed");
        Err(ApiError::Http {
            status: status.as_u16(),
            errors: FieldErrors::from_body(&body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Serde(e.to_string()))
    }
}

#[async_trait]
impl FormsApi for FormsClient {
    async fn fetch_form_steps(&self, form_uuid: Uuid) -> Result<Vec<FormStep>, ApiError> {
        let url = self.config.form_url(form_uuid);
        debug!(%url, "fetching form steps");
        let steps: Vec<FormStep> = self.send_json(self.http.get(&url)).await?;
        info!(%form_uuid, count = steps.len(), "loaded form steps");
        Ok(steps)
    }

    async fn fetch_form_definitions(&self) -> Result<Vec<FormDefinition>, ApiError> {
        let url = self.config.form_definitions_url();
        debug!(%url, "fetching form definitions");
        let definitions: Vec<FormDefinition> = self.send_json(self.http.get(&url)).await?;
        info!(count = definitions.len(), "loaded form definitions");
        Ok(definitions)
    }

    async fn save_form(&self, payload: &FormPayload, is_new: bool) -> Result<(), ApiError> {
        let url = self.config.form_url(payload.uuid);
        let request = if is_new {
            self.http.post(&url)
        } else {
            self.http.put(&url)
        };
        self.send(self.with_csrf(request).json(payload)).await?;
        info!(form_uuid = %payload.uuid, is_new, steps = payload.form_steps.len(), "saved form");
        Ok(())
    }

    async fn copy_form(&self, form_uuid: Uuid) -> Result<Uuid, ApiError> {
        let url = self.config.copy_form_url(form_uuid);
        let copied: CopiedForm = self
            .send_json(self.with_csrf(self.http.post(&url)))
            .await?;
        info!(%form_uuid, copy = %copied.uuid, "copied form");
        Ok(copied.uuid)
    }
}
