//! Core library for the `weather` finder.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The query layer: provider abstraction and the OpenWeather client
//! - Shared domain models (readings, feedback)
//! - Presentation state: icon selection and the search state machine
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod state;

pub use config::{Config, ProviderConfig};
pub use error::QueryError;
pub use icon::{IconChoice, IconTone, WeatherIcon, select_icon};
pub use model::{Feedback, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use state::{SearchState, SearchStatus, SearchTicket};
