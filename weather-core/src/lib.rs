//! Core library for the `weather-widget` city weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the geocoding and current-weather services
//! - The condition icon map and the render-ready weather view
//! - Widget state (search text, suggestions, weather panel) and its async driver
//!
//! It is used by `weather-widget-cli`, but can also back other front ends.

pub mod config;
pub mod error;
pub mod icon;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod state;
pub mod widget;

pub use config::Config;
pub use error::FetchError;
pub use icon::ConditionIcon;
pub use lookup::{SUGGESTION_LIMIT, WeatherOutcome};
pub use model::{CityRecord, CurrentConditions, WeatherView};
pub use provider::{WeatherProvider, provider_from_config};
pub use state::{Notice, WidgetState};
pub use widget::{Update, WeatherWidget};
