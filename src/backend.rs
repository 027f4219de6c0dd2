// src/backend.rs

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::Job;
use crate::ui::jobs_panel::JobSource;

/// Default prompt sent when a document is queued without one.
pub const DEFAULT_PROMPT: &str = "Extract OCR JSON";

/// Thin client for the external OCR backend.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(client: Client, config: &AppConfig) -> Self {
        Self::new(client, config.backend_url.clone(), config.backend_token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.query(&[("token", token)]),
            None => builder,
        }
    }

    /// Posts a ready-made multipart form to `/documents` and returns the JSON answer.
    pub async fn post_document(&self, form: reqwest::multipart::Form) -> Result<Value> {
        let url = self.url("documents");
        log::debug!("Forwarding upload to {}", url);
        let resp = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await?;
        json_or_error(resp).await
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        let resp = self.authorize(self.client.get(self.url("jobs"))).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json::<Vec<Job>>().await?)
    }

    pub async fn get_document(&self, id: i64) -> Result<Value> {
        let resp = self
            .authorize(self.client.get(self.url(&format!("documents/{}", id))))
            .send()
            .await?;
        json_or_error(resp).await
    }

    pub async fn enqueue(&self, id: i64, prompt: &str) -> Result<Value> {
        let resp = self
            .authorize(self.client.post(self.url(&format!("documents/{}/enqueue", id))))
            .multipart(reqwest::multipart::Form::new().text("prompt", prompt.to_string()))
            .send()
            .await?;
        json_or_error(resp).await
    }

    /// Opens the result download. The body is left unread so callers can stream it.
    pub async fn fetch_result(&self, id: i64) -> Result<Response> {
        let resp = self
            .authorize(self.client.get(self.url(&format!("result/{}", id))))
            .send()
            .await?;
        check_status(resp).await
    }
}

#[async_trait]
impl JobSource for BackendClient {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        self.list_jobs().await
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error body".to_string());
    Err(PortalError::Backend {
        status: status.as_u16(),
        body,
    })
}

async fn json_or_error(resp: Response) -> Result<Value> {
    let resp = check_status(resp).await?;
    Ok(resp.json::<Value>().await?)
}
