//! Response classification for import fetches

use reqwest::StatusCode;
use url::Url;

use crate::transport::TransportResponse;

/// What a fetched response means for the import loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// 2xx: store the body
    Success,
    /// 3xx with a usable Location
    Redirect { location: Url },
    /// Anything else, including 3xx with a missing or unparseable Location
    Failure { status: StatusCode },
}

impl ResponseOutcome {
    /// Classify a response fetched from `requested`.
    ///
    /// Relative `Location` values are resolved against the requested URL.
    pub fn classify(requested: &Url, response: &TransportResponse) -> Self {
        let status = response.status;

        if status.is_success() {
            return ResponseOutcome::Success;
        }

        if status.is_redirection() {
            if let Some(location) = response
                .location
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .and_then(|l| requested.join(l.trim()).ok())
            {
                return ResponseOutcome::Redirect { location };
            }
        }

        ResponseOutcome::Failure { status }
    }
}
