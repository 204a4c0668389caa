// Demo record endpoints
//
// Hand-written client for the two public demo APIs the dashboard reads
// from: a users listing (normalized into leads by `crmdash-core`) and a
// product catalog. Both return a bare JSON array with no envelope.

pub mod client;
pub mod models;
pub mod products;
pub mod users;

pub use client::{DEFAULT_LEADS_URL, DEFAULT_PRODUCTS_URL, DemoClient, Endpoints};
