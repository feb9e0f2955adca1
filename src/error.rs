use reqwest::Method;
use thiserror::Error;

/// A failed request against the hero collection.
///
/// Connection errors, timeouts, non-2xx statuses and undecodable bodies all
/// land here; callers treat them alike.
#[derive(Debug, Error)]
#[error("{method} {url}: {source}")]
pub struct HeroError {
    pub method: Method,
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

impl HeroError {
    pub fn new(method: Method, url: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            method,
            url: url.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HeroError>;
