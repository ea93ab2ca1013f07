pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, strum_macros::AsRefStr)]
pub enum Error {
    // -- Transport errors.
    NetworkFailure(String),
    Aborted,
    HttpError { status: u16, message: String },
    ShapeError(String),

    // -- Form errors.
    ValidationError {
        field: &'static str,
        reason: &'static str,
    },

    // -- Environment errors.
    EnvVarError(String),
    Io(String),
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

pub const INVALID_RESPONSE: &str = "Invalid API response";

impl Error {
    /// Text a view shows for this error. `None` for cancellations, which are never surfaced.
    pub fn view_message(&self) -> Option<String> {
        match self {
            Self::Aborted => None,
            Self::NetworkFailure(detail) => Some(format!("Network error: {detail}")),
            Self::HttpError { message, .. } => Some(message.clone()),
            Self::ShapeError(_) => Some(INVALID_RESPONSE.to_string()),
            Self::ValidationError { field, reason } => Some(format!("{field}: {reason}")),
            Self::EnvVarError(message) | Self::Io(message) => Some(message.clone()),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::NetworkFailure("request timed out".to_string())
        } else {
            Error::NetworkFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ShapeError(err.to_string())
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::EnvVarError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_message_hides_aborted() {
        assert_eq!(Error::Aborted.view_message(), None);
        assert!(Error::Aborted.is_aborted());
    }

    #[test]
    fn test_view_message_per_kind() {
        let http = Error::HttpError {
            status: 404,
            message: "Client not found".to_string(),
        };
        assert_eq!(http.view_message().as_deref(), Some("Client not found"));

        let shape = Error::ShapeError("missing `data`".to_string());
        assert_eq!(shape.view_message().as_deref(), Some(INVALID_RESPONSE));

        let validation = Error::ValidationError {
            field: "value",
            reason: "VALUE_MUST_BE_NON_NEGATIVE_NUMBER",
        };
        assert_eq!(
            validation.view_message().as_deref(),
            Some("value: VALUE_MUST_BE_NON_NEGATIVE_NUMBER")
        );

        let network = Error::NetworkFailure("connection refused".to_string());
        assert!(network.view_message().unwrap().starts_with("Network error"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Error::Aborted.as_ref(), "Aborted");
        assert_eq!(Error::ShapeError(String::new()).as_ref(), "ShapeError");
    }
}
