use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

pub const SUCCESS_STATUS: &str = "SUCCESS";

/// Wire shape of every backend response, before validation.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// A response body checked against `{ message, status: "SUCCESS", data }`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success { message: Option<String>, data: Value },
    Failure { reason: String },
}

impl Envelope {
    pub fn validate(body: Value) -> Self {
        let raw: RawEnvelope = match serde_json::from_value(body) {
            Ok(raw) => raw,
            Err(err) => {
                return Self::Failure {
                    reason: format!("body is not an envelope: {err}"),
                }
            }
        };

        if raw.status.as_deref() != Some(SUCCESS_STATUS) {
            let status = raw.status.unwrap_or_else(|| "<missing>".to_string());
            let reason = match raw.message {
                Some(message) => format!("status {status}: {message}"),
                None => format!("status {status}"),
            };
            return Self::Failure { reason };
        }

        match raw.data {
            Some(data) if !data.is_null() => Self::Success {
                message: raw.message,
                data,
            },
            _ => Self::Failure {
                reason: "missing `data`".to_string(),
            },
        }
    }

    pub fn into_data(self) -> Result<Value> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { reason } => {
                tracing::warn!("rejected response envelope: {}", reason);
                Err(Error::ShapeError(reason))
            }
        }
    }
}
