use crate::{
    Config,
    error::FetchError,
    model::{CityRecord, CurrentConditions},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod openweather;

/// Remote services the widget talks to.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Candidate places whose name matches `query`, at most `limit` of them,
    /// in the order the service ranks them.
    async fn lookup_cities(&self, query: &str, limit: usize)
    -> Result<Vec<CityRecord>, FetchError>;

    /// Current conditions for `city`, metric units.
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let provider = OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        config.api_base_url(),
        Duration::from_secs(config.timeout_secs()),
    )?;

    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
