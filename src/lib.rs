//! HSS Client
//!
//! Client for the HTTP Storage Service: uploads byte payloads, deletes stored
//! objects by path, and imports remote resources by following a bounded
//! number of redirects before storing the final body.

pub mod client;
pub mod config;
pub mod transport;

pub use client::{ClientConfig, HssError, HssResult, Locator, StorageClient, DEFAULT_MAX_REDIRECTS};
pub use config::Settings;
