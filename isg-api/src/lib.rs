//! REST front end for an ISG web interface.
//!
//! - `GET /stats`: every statistic the device pages expose, as one JSON object
//! - `GET /value/:name?new=<value>`: save one parameter
//! - `GET /value/:name`: read one parameter's current value
//! - `GET /`, `GET /health`: endpoint index and liveness
//!
//! Device failures surface as JSON errors (`502` when the device cannot be
//! reached, `500` when a page no longer matches) instead of partial data.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, serve};
pub use state::AppState;
