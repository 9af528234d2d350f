//! Storage client error types

use thiserror::Error;

/// Errors returned by `StorageClient` and `ClientConfig`
#[derive(Debug, Error)]
pub enum HssError {
    /// Missing or malformed endpoint at construction
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// Unrecognizable locator or source URI
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// The storage service rejected a save/delete, or could not be reached
    #[error("Unable to connect HSS ({endpoint}): {message}")]
    Storage {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// An import source answered with something other than success or redirect
    #[error("Unable to import, URI {uri} {message}")]
    Import {
        uri: String,
        status: Option<u16>,
        message: String,
    },

    /// Redirect bound exhausted during import
    #[error("Max redirects reached ({max_redirects}) while importing {uri}")]
    RedirectLimit { uri: String, max_redirects: u32 },
}

impl HssError {
    /// True when an import gave up because of the redirect bound
    pub fn is_redirect_limit(&self) -> bool {
        matches!(self, HssError::RedirectLimit { .. })
    }

    /// HTTP status attached to the failure, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            HssError::Storage { status, .. } | HssError::Import { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type for storage client operations
pub type HssResult<T> = Result<T, HssError>;
