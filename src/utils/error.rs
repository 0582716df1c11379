use std::fmt;
use thiserror::Error;

/// The API call an error came from. Each one carries the prefix the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchProducts,
    FetchProduct,
    FetchProductsByCategory,
    FetchCategories,
    SearchProducts,
    GetRecommendations,
    FetchRecommendationHistory,
    HealthCheck,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Operation::FetchProducts => "Failed to fetch products",
            Operation::FetchProduct => "Failed to fetch product",
            Operation::FetchProductsByCategory => "Failed to fetch products by category",
            Operation::FetchCategories => "Failed to fetch categories",
            Operation::SearchProducts => "Failed to search products",
            Operation::GetRecommendations => "Failed to get recommendations",
            Operation::FetchRecommendationHistory => "Failed to fetch recommendation history",
            Operation::HealthCheck => "Health check failed",
        };
        f.write_str(prefix)
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unable to connect to server. Please make sure the backend is running.")]
    ConnectionRefused,

    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout { timeout_ms: u64 },

    #[error("Request failed with status code {status}")]
    HttpStatus { status: u16 },

    #[error("API returned {found} instead of product array. Check backend URL.")]
    UnexpectedPayload { found: &'static str },

    #[error("Products API endpoint not found. Check the API base URL ends with /api")]
    EndpointNotFound,

    #[error("Backend server error. Please try again later.")]
    ServerError,

    #[error("{operation}: {source}")]
    Request {
        operation: Operation,
        #[source]
        source: Box<ClientError>,
    },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    /// Wraps a low-level failure with the message prefix of `operation`.
    pub fn during(self, operation: Operation) -> Self {
        ClientError::Request {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any operation wrappers.
    pub fn root(&self) -> &ClientError {
        match self {
            ClientError::Request { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            ClientError::HttpStatus { status } => Some(*status),
            ClientError::EndpointNotFound => Some(404),
            _ => None,
        }
    }

    pub fn is_unexpected_payload(&self) -> bool {
        matches!(self.root(), ClientError::UnexpectedPayload { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.root() {
            ClientError::Validation { .. } => ErrorSeverity::Low,
            ClientError::ConnectionRefused
            | ClientError::Timeout { .. }
            | ClientError::ServerError
            | ClientError::Transport(_) => ErrorSeverity::Medium,
            ClientError::HttpStatus { status } if *status >= 500 => ErrorSeverity::Medium,
            ClientError::Config { .. } | ClientError::InvalidConfigValue { .. } => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root() {
            ClientError::ConnectionRefused => "Start the backend or point --api-url at a running one",
            ClientError::Timeout { .. } => "Raise --timeout-ms or check the backend load",
            ClientError::EndpointNotFound | ClientError::UnexpectedPayload { .. } => {
                "Check that the API base URL points at the backend and ends with /api"
            }
            ClientError::HttpStatus { status } if *status == 404 => {
                "Check the identifier or category name you asked for"
            }
            ClientError::ServerError | ClientError::HttpStatus { .. } => {
                "Try again later or inspect the backend logs"
            }
            ClientError::Config { .. } | ClientError::InvalidConfigValue { .. } => {
                "Fix the configuration value and run again"
            }
            ClientError::Validation { .. } => "Adjust the command arguments and run again",
            _ => "Run again with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
