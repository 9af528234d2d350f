//! Locator for previously stored objects

use std::fmt;
use std::str::FromStr;
use url::{ParseError, Url};

use super::error::HssError;

/// Base used only to check that a relative locator is well formed
const RELATIVE_BASE: &str = "http://localhost/";

/// A URL, or a bare path, identifying a stored object.
///
/// Only the path is used when deleting; the host is discarded and the request
/// always goes to the configured API endpoint. Relative references such as
/// `/some/random/path/abcdef123456` are accepted and used as-is.
///
/// Locators parsed from a string keep the path exactly as written. The
/// delete URL is still parsed by the HTTP transport, which resolves dot
/// segments and percent-encodes characters like spaces, so
/// `http://host/a/../b c` is sent as `/b%20c`. Locators built from a `Url`
/// carry the already-normalized `Url::path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    raw: String,
    path: String,
}

impl Locator {
    /// Path component of the locator, e.g. `/some/random/path/abcdef123456`
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for Locator {
    type Err = HssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognized =
            |e: ParseError| HssError::Argument(format!("Don't know how to extract the path from {:?}: {}", s, e));

        match Url::parse(s) {
            Ok(url) if url.cannot_be_a_base() => return Err(HssError::Argument(format!(
                "Don't know how to extract the path from {:?}: URL has no path",
                s
            ))),
            Ok(_) => {}
            Err(ParseError::RelativeUrlWithoutBase) => {
                Url::parse(RELATIVE_BASE)
                    .and_then(|base| base.join(s))
                    .map_err(unrecognized)?;
            }
            Err(e) => return Err(unrecognized(e)),
        }

        Ok(Locator {
            raw: s.to_string(),
            path: raw_path(s).to_string(),
        })
    }
}

impl TryFrom<&str> for Locator {
    type Error = HssError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Url> for Locator {
    fn from(url: Url) -> Self {
        Locator {
            path: url.path().to_string(),
            raw: url.into(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Path of an already validated reference, without query or fragment
fn raw_path(input: &str) -> &str {
    let end = input.find(|c| c == '?' || c == '#').unwrap_or(input.len());
    let reference = &input[..end];

    match reference.find("://") {
        Some(scheme_end) => {
            let rest = &reference[scheme_end + 3..];
            rest.find('/').map_or("", |start| &rest[start..])
        }
        None => reference,
    }
}
