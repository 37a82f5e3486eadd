//! Core library for the `darksky` CLI.
//!
//! This crate defines:
//! - The Dark Sky v1 API client and its call methods
//! - Endpoint path construction and precipitation batch encoding
//! - Timestamp window validation
//! - Configuration & credentials handling
//!
//! It is used by `darksky-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod time;

pub use client::DarkSky;
pub use config::Config;
pub use endpoint::{BASE_URL, Route};
pub use error::{DecodeError, Error};
pub use model::PrecipitationQuery;
