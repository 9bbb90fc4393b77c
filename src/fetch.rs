use std::time::Duration;

use log::{debug, info};
use thiserror::Error;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("skimmer/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {url} timed out after {}s", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    /// Deadline for the whole request, body included
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Parse user input as a URL, assuming https when no scheme is given.
pub fn normalize_url(input: &str) -> Result<Url, FetchError> {
    let input = input.trim();
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    Url::parse(&candidate).map_err(|source| FetchError::InvalidUrl {
        url: input.to_string(),
        source,
    })
}

/// Fetch the raw bytes of a document with a blocking GET.
pub fn fetch_document(url: &Url, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let url_text = url.to_string();
    let classify = |source: reqwest::Error| {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url_text.clone(),
                timeout: options.timeout,
            }
        } else {
            FetchError::Request {
                url: url_text.clone(),
                source,
            }
        }
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(&classify)?;

    info!("Fetching {url_text}");
    let response = client
        .get(url.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .map_err(&classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url_text,
            status: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(|source| {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url_text.clone(),
                timeout: options.timeout,
            }
        } else {
            FetchError::Body {
                url: url_text.clone(),
                source,
            }
        }
    })?;

    debug!("Fetched {} bytes from {url_text}", body.len());
    Ok(body.to_vec())
}
