//! HTTP facade for Skycast.
//!
//! Four stateless routes over a shared, read-only [`WeatherService`]:
//! `GET /`, `GET /forecast`, `GET /anomaly` and `POST /chat`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod service;

pub use error::ApiError;
pub use routes::{routes, serve};
pub use service::{AnomalyReport, ServiceError, WeatherService};
