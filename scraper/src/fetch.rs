use log::{info, warn};
use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("{url} returned a not-found page")]
    NotFound { url: String },
}

/// Anything that can return the body of a page.
pub trait PageSource {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP page source.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        HttpSource {
            client: Client::new(),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for HttpSource {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        self.client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(transport)
    }
}

/// Try each alternative in order and stop at the first success.
/// Failures are handed to `on_error` and otherwise dropped.
pub fn first_success<I, T, E, F, L>(alternatives: I, mut attempt: F, mut on_error: L) -> Option<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<T, E>,
    L: FnMut(E),
{
    for alternative in alternatives {
        match attempt(alternative) {
            Ok(value) => return Some(value),
            Err(err) => on_error(err),
        }
    }
    None
}

/// Fetch the first candidate whose body is not a not-found page.
pub fn fetch_first<S: PageSource + ?Sized>(
    source: &S,
    candidates: &[String],
    not_found_marker: &str,
) -> Option<String> {
    first_success(
        candidates,
        |url| -> Result<String, FetchError> {
            info!("Reading page: {}", url);
            let body = source.get(url)?;
            if body.contains(not_found_marker) {
                return Err(FetchError::NotFound { url: url.clone() });
            }
            Ok(body)
        },
        |err| warn!("Failed reading the URL: {}", err),
    )
}
