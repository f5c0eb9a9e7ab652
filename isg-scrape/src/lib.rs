//! Screen-scraping core for the ISG web interface.
//!
//! - [`extract`]: pattern extractors for table rows, `jsvalues[..]` and
//!   `jsobj[..]` script fragments, and single `<input>` values
//! - [`client`]: the [`Device`] seam and its HTTP implementation [`IsgClient`]
//! - [`aggregate`]: the fixed page sequence behind [`collect_statistics`]
//!
//! Every failure is returned as a [`ScrapeError`]; nothing here retries,
//! caches, or substitutes partial data.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod extract;

pub use aggregate::{Statistics, collect_statistics, read_setting};
pub use client::{Device, IsgClient, save_payload};
pub use error::{ExtractError, ScrapeError};

pub type Result<T> = std::result::Result<T, ScrapeError>;
