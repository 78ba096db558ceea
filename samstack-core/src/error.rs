//! Error codes and their JSON rendering

use crate::module::ModuleError;
use serde::Serialize;
use thiserror::Error;

/// Error codes reported by SamStack tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Module model
    InvalidModule,

    // Templates
    TemplateNotFound,
    InvalidTemplate,
    FunctionNotFound,
    MissingCodeUri,

    // Runtimes / builders
    UnsupportedRuntime,

    // Configuration
    InvalidConfiguration,

    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidModule => "InvalidModule",
            Self::TemplateNotFound => "TemplateNotFound",
            Self::InvalidTemplate => "InvalidTemplate",
            Self::FunctionNotFound => "FunctionNotFound",
            Self::MissingCodeUri => "MissingCodeUri",
            Self::UnsupportedRuntime => "UnsupportedRuntime",
            Self::InvalidConfiguration => "InvalidConfiguration",
            Self::InternalError => "InternalError",
        }
    }

    /// Process exit status used by the CLI for this code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfiguration | Self::InvalidModule => 2,
            Self::TemplateNotFound | Self::FunctionNotFound => 3,
            Self::InvalidTemplate | Self::MissingCodeUri | Self::UnsupportedRuntime => 4,
            Self::InternalError => 1,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error surfaced to users of the tools
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct SamError {
    pub code: ErrorCode,
    pub message: String,
    pub resource: Option<String>,
}

impl SamError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            resource: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Format as a JSON error object
    pub fn to_json(&self) -> String {
        #[derive(Serialize)]
        struct JsonError<'a> {
            code: &'static str,
            message: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            resource: Option<&'a str>,
        }

        let error = JsonError {
            code: self.code.as_str(),
            message: &self.message,
            resource: self.resource.as_deref(),
        };

        serde_json::to_string(&error).unwrap_or_else(|_| {
            format!(r#"{{"code":"{}","message":"{}"}}"#, self.code.as_str(), self.message)
        })
    }
}

impl From<ModuleError> for SamError {
    fn from(err: ModuleError) -> Self {
        Self::new(ErrorCode::InvalidModule, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_json_format() {
        let error = SamError::new(ErrorCode::FunctionNotFound, "No function named Foo")
            .with_resource("template.yaml");

        let json = error.to_json();
        assert!(json.contains(r#""code":"FunctionNotFound""#));
        assert!(json.contains("No function named Foo"));
        assert!(json.contains(r#""resource":"template.yaml""#));
    }

    #[test]
    fn test_error_json_omits_missing_resource() {
        let error = SamError::new(ErrorCode::InternalError, "boom");

        let json = error.to_json();
        assert!(!json.contains("resource"));
    }

    #[test]
    fn test_display() {
        let error = SamError::new(ErrorCode::UnsupportedRuntime, "provided.al2 has no builder");
        assert_eq!(error.to_string(), "UnsupportedRuntime: provided.al2 has no builder");
    }
}
