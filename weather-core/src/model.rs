use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::icon::ConditionIcon;

/// A candidate place returned by the geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Current conditions as reported by a provider, before presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub icon_code: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Render-ready weather panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    /// Whole degrees Celsius, floored.
    pub temperature: i64,
    pub location: String,
    pub humidity_pct: u8,
    /// Shown with a km/h label; the provider value is passed through unchanged.
    pub wind_speed_kmh: f64,
    pub icon: ConditionIcon,
    pub observed_at: Option<DateTime<Utc>>,
}

impl From<CurrentConditions> for WeatherView {
    fn from(c: CurrentConditions) -> Self {
        Self {
            temperature: c.temperature_c.floor() as i64,
            location: c.location_name,
            humidity_pct: c.humidity_pct,
            wind_speed_kmh: c.wind_speed,
            icon: ConditionIcon::from_optional_code(c.icon_code.as_deref()),
            observed_at: c.observed_at,
        }
    }
}
