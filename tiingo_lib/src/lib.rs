//! Library layer for the Tiingo client: validated batch operations over the
//! raw `tiingo_api` crate, with per-ticker failure isolation and tabular results.

pub mod client;
pub mod config;
pub mod error;
pub mod table;
pub mod validation;

pub use tiingo_api;
pub use tiingo_api::types;

pub use client::TiingoClient;
pub use config::ClientConfig;
pub use error::TiingoError;
pub use table::{Cell, ResultTable, Row, WideTable};
