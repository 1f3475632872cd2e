//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather client that talks to the local forwarding proxy
//! - Single-shot position acquisition
//! - Shared domain models (coordinates, weather documents)
//!
//! It is used by `weather-cli` and `weather-proxy`, but can also be reused by
//! other binaries or services.

pub mod client;
pub mod config;
pub mod location;
pub mod model;

pub use client::{ClientError, WeatherClient};
pub use config::{Config, ProxySettings};
pub use location::{FixedPositionSource, IpPositionSource, LocationError, PositionSource};
pub use model::{Coordinate, CurrentConditions, ForecastEntry, WeatherResponse, WeatherResult};
