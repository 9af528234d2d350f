//! HSS storage client
//!
//! `StorageClient` is configured once with a `ClientConfig` (API endpoint,
//! read endpoint, application path) and exposes `save`, `delete` and `import`.
//!
//! ```text
//!   import(uri) ──GET──▶ source ──3xx──▶ GET Location ... (bounded)
//!        │                  │
//!        │                 2xx
//!        ▼                  ▼
//!   save(body) ──POST──▶ api_url + app_path ──▶ read_url + app_path + "/" + id
//!
//!   delete(locator) ──DELETE──▶ api_url + path(locator)
//! ```

mod client_config;
mod error;
mod locator;
mod outcome;
mod service;

pub use client_config::ClientConfig;
pub use error::{HssError, HssResult};
pub use locator::Locator;
pub use outcome::ResponseOutcome;
pub use service::{StorageClient, DEFAULT_MAX_REDIRECTS};
