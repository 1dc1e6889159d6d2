//! One-shot lookups that fold provider errors into widget outcomes.
//!
//! Suggestions are best effort: every failure becomes an empty list. The
//! weather lookup keeps rejections (shown to the user) apart from transport
//! and parse failures (which clear the panel).

use crate::{error::FetchError, model::WeatherView, provider::WeatherProvider};

/// Maximum number of suggestions requested and kept.
pub const SUGGESTION_LIMIT: usize = 5;

/// Queries shorter than this (after trimming) never reach the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// Result of a weather lookup as the widget sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Loaded(WeatherView),
    /// The service refused the request; carries its message verbatim.
    Rejected(String),
    /// Transport or parse failure.
    Failed,
}

/// The query to send for `text`, or `None` when it is too short.
pub fn suggestion_query(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (trimmed.chars().count() >= MIN_QUERY_CHARS).then_some(trimmed)
}

pub async fn fetch_suggestions(provider: &dyn WeatherProvider, query: &str) -> Vec<String> {
    match provider.lookup_cities(query, SUGGESTION_LIMIT).await {
        Ok(cities) => cities
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(|c| c.name)
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, query, "Error fetching suggestions");
            Vec::new()
        }
    }
}

pub async fn fetch_weather(provider: &dyn WeatherProvider, city: &str) -> WeatherOutcome {
    match provider.current_conditions(city).await {
        Ok(conditions) => WeatherOutcome::Loaded(WeatherView::from(conditions)),
        Err(FetchError::Rejected { status, message }) => {
            tracing::warn!(status, city, %message, "Weather request rejected");
            WeatherOutcome::Rejected(message)
        }
        Err(e) => {
            tracing::error!(error = %e, city, "Error fetching weather data");
            WeatherOutcome::Failed
        }
    }
}
