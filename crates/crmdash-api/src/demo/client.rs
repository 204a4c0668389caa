// Demo API HTTP client
//
// Wraps `reqwest::Client` with the configured endpoint URLs, status
// checking, and body decoding. Endpoint methods live in sibling files
// (users, products) as inherent impls to keep this module focused on
// transport mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default users endpoint, normalized into leads.
pub const DEFAULT_LEADS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Default product catalog endpoint.
pub const DEFAULT_PRODUCTS_URL: &str = "https://fakestoreapi.com/products";

/// The two fixed remote record sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub leads: Url,
    pub products: Url,
}

impl Endpoints {
    /// Build endpoints from URL strings.
    pub fn parse(leads: &str, products: &str) -> Result<Self, Error> {
        Ok(Self {
            leads: Url::parse(leads)?,
            products: Url::parse(products)?,
        })
    }

    /// Both endpoints rooted at one base URL (`{base}/users`, `{base}/products`).
    ///
    /// Used by tests pointing at a mock server.
    pub fn from_base(base: &str) -> Result<Self, Error> {
        let base = base.trim_end_matches('/');
        Self::parse(&format!("{base}/users"), &format!("{base}/products"))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::parse(DEFAULT_LEADS_URL, DEFAULT_PRODUCTS_URL).expect("default endpoints are valid")
    }
}

/// Raw HTTP client for the demo record endpoints.
///
/// Read-only: every method is a single `GET` returning a JSON array.
/// A non-2xx status is reported as [`Error::Status`] before the body is
/// looked at.
pub struct DemoClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl DemoClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(endpoints: Endpoints, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoints })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// The configured endpoints.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode a JSON array body.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_point_at_public_demo_apis() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.leads.as_str(), DEFAULT_LEADS_URL);
        assert_eq!(endpoints.products.as_str(), DEFAULT_PRODUCTS_URL);
    }

    #[test]
    fn from_base_appends_paths() {
        let endpoints = Endpoints::from_base("http://127.0.0.1:9000/").unwrap_or_default();
        assert_eq!(endpoints.leads.as_str(), "http://127.0.0.1:9000/users");
        assert_eq!(endpoints.products.as_str(), "http://127.0.0.1:9000/products");
    }

    #[test]
    fn parse_rejects_relative_urls() {
        let result = Endpoints::parse("users", "products");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
