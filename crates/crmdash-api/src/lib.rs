// crmdash-api: Async Rust client for the demo record endpoints (users + products)

pub mod demo;
pub mod error;
pub mod transport;

pub use demo::models::{
    AddressResponse, CompanyResponse, ProductResponse, RatingResponse, UserResponse,
};
pub use demo::{DEFAULT_LEADS_URL, DEFAULT_PRODUCTS_URL, DemoClient, Endpoints};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
