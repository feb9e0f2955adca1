use crate::api::API_HEROES;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: API_HEROES.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ServiceConfig {
    pub fn build_client(&self) -> reqwest::Result<Client> {
        Client::builder().timeout(self.timeout).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_mock_api() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, API_HEROES);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.build_client().is_ok());
    }
}
