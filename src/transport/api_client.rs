use std::time::Instant;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::{config::ClientConfig, Error, Result};

/// Per-call options. A cancelled token resolves the call to `Error::Aborted`.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn cancellable(cancel: CancellationToken) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }
}

/// JSON client bound to one backend. Cookies set by the backend are kept and sent
/// back on every request, so a login carries over to later calls.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::GET, path, None, options).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(body), options).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, path, Some(body), options).await
    }

    pub async fn del(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Method::DELETE, path, None, options).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<Value> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );
        let cancel = options.cancel.unwrap_or_default();

        async move {
            if cancel.is_cancelled() {
                tracing::debug!("aborted before sending");
                return Err(Error::Aborted);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("aborted in flight");
                    Err(Error::Aborted)
                }
                outcome = self.send(method, path, body) => outcome,
            }
        }
        .instrument(span)
        .await
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();

        tracing::info!("{} {}", method, path);

        let mut builder = self.http.request(method, &url);
        if let Some(body) = &body {
            // Sets `Content-Type: application/json`.
            builder = builder.json(body);
        }

        let response = builder.send().await.inspect_err(|err| {
            tracing::error!("❌ network failure: {}", err);
        })?;
        let status = response.status();
        let text = response.text().await?;

        log_response(status, started.elapsed().as_millis());

        let data = parse_body(&text);
        if !status.is_success() {
            return Err(Error::HttpError {
                status: status.as_u16(),
                message: error_message(&data, status),
            });
        }

        Ok(data)
    }
}

fn log_response(status: StatusCode, latency_ms: u128) {
    match status.as_u16() {
        200..=299 => tracing::info!("{} ({}ms)", status, latency_ms),
        400..=499 => tracing::warn!("⚠️ {} ({}ms)", status, latency_ms),
        500..=599 => tracing::error!("❌ {} ({}ms)", status, latency_ms),
        _ => tracing::info!("{} ({}ms)", status, latency_ms),
    }
}

/// Empty or non-JSON bodies become `null`.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or(Value::Null)
}

fn error_message(data: &Value, status: StatusCode) -> String {
    data.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("API error: {}", status.as_u16()))
}
