// ── Runtime source configuration ──
//
// Describes *where* to load records from and how to talk to it. Never
// touches disk: the TUI builds a `SourceConfig` from its config file and
// hands it in.

use std::path::PathBuf;
use std::time::Duration;

use crmdash_api::{DemoClient, Endpoints, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Where and how to fetch the two record lists.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub endpoints: Endpoints,
    /// Request timeout.
    pub timeout: Duration,
    /// Extra CA certificate (PEM) to trust, for self-hosted mirrors.
    pub ca_cert: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(30),
            ca_cert: None,
        }
    }
}

impl SourceConfig {
    /// Build an HTTP client for these endpoints.
    pub fn client(&self) -> Result<DemoClient, CoreError> {
        let tls = self
            .ca_cert
            .clone()
            .map_or(TlsMode::System, TlsMode::CustomCa);
        let transport = TransportConfig {
            tls,
            timeout: self.timeout,
        };

        DemoClient::new(self.endpoints.clone(), &transport).map_err(|e| CoreError::Config {
            message: format!("cannot build HTTP client: {e}"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_demo_apis() {
        let config = SourceConfig::default();
        assert_eq!(config.endpoints.leads.host_str(), Some("jsonplaceholder.typicode.com"));
        assert_eq!(config.endpoints.products.host_str(), Some("fakestoreapi.com"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_builds_with_system_roots() {
        let client = SourceConfig::default().client().unwrap();
        assert_eq!(client.endpoints().leads.path(), "/users");
    }

    #[test]
    fn missing_ca_file_is_a_config_error() {
        let config = SourceConfig {
            ca_cert: Some(PathBuf::from("/nonexistent/ca.pem")),
            ..SourceConfig::default()
        };
        assert!(matches!(config.client(), Err(CoreError::Config { .. })));
    }
}
