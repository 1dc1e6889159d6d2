use crate::{
    lookup::{WeatherOutcome, suggestion_query},
    model::WeatherView,
};

/// Message the front end shows to the user as a blocking prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Notice {
    #[error("Enter City Name")]
    EnterCityName,

    /// Server-provided explanation, shown verbatim.
    #[error("{0}")]
    Rejected(String),
}

/// A suggestion lookup the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub seq: u64,
    pub query: String,
}

/// Search text, suggestion list and weather panel of one widget.
///
/// Pure state: nothing here touches the network. Every text change bumps the
/// suggestion sequence number and only the response for the latest number is
/// accepted.
#[derive(Debug, Default, Clone)]
pub struct WidgetState {
    search_text: String,
    suggestions: Vec<String>,
    weather: Option<WeatherView>,
    suggestion_seq: u64,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestion(&self, index: usize) -> Option<&str> {
        self.suggestions.get(index).map(String::as_str)
    }

    pub fn weather(&self) -> Option<&WeatherView> {
        self.weather.as_ref()
    }

    /// Sequence number of the most recently issued suggestion request.
    pub fn latest_suggestion_seq(&self) -> u64 {
        self.suggestion_seq
    }

    /// Replace the search text. Returns the lookup to perform, or `None`
    /// when the text is too short, in which case suggestions are cleared.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> Option<SuggestionRequest> {
        self.search_text = text.into();
        let seq = self.invalidate_suggestions();

        match suggestion_query(&self.search_text) {
            Some(query) => Some(SuggestionRequest {
                seq,
                query: query.to_owned(),
            }),
            None => {
                self.suggestions.clear();
                None
            }
        }
    }

    /// Apply a suggestion response. Responses for superseded requests are
    /// dropped; returns whether the list was replaced.
    pub fn apply_suggestions(&mut self, seq: u64, names: Vec<String>) -> bool {
        if seq != self.suggestion_seq {
            tracing::debug!(seq, latest = self.suggestion_seq, "Discarding stale suggestions");
            return false;
        }

        self.suggestions = names;
        true
    }

    /// Validate a city name before any request is made.
    pub fn prepare_search(city: &str) -> Result<String, Notice> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Notice::EnterCityName);
        }
        Ok(city.to_owned())
    }

    /// Apply a weather outcome. The panel is replaced whole, kept, or cleared;
    /// never patched.
    pub fn apply_weather(&mut self, outcome: WeatherOutcome) -> Option<Notice> {
        match outcome {
            WeatherOutcome::Loaded(view) => {
                self.weather = Some(view);
                self.search_text.clear();
                self.suggestions.clear();
                self.invalidate_suggestions();
                None
            }
            WeatherOutcome::Rejected(message) => Some(Notice::Rejected(message)),
            WeatherOutcome::Failed => {
                self.weather = None;
                None
            }
        }
    }

    fn invalidate_suggestions(&mut self) -> u64 {
        self.suggestion_seq += 1;
        self.suggestion_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::ConditionIcon;

    fn paris() -> WeatherView {
        WeatherView {
            temperature: 15,
            location: "Paris".into(),
            humidity_pct: 60,
            wind_speed_kmh: 3.4,
            icon: ConditionIcon::Clear,
            observed_at: None,
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_text_clears_suggestions_without_request() {
        let mut state = WidgetState::new();
        let req = state.set_search_text("Par").expect("lookup expected");
        assert!(state.apply_suggestions(req.seq, names(&["Paris"])));

        assert!(state.set_search_text("P").is_none());
        assert!(state.suggestions().is_empty());
        assert_eq!(state.search_text(), "P");

        assert!(state.set_search_text(" x ").is_none());
        assert!(state.set_search_text("").is_none());
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn request_carries_trimmed_query() {
        let mut state = WidgetState::new();
        let req = state.set_search_text("  Lyon ").expect("lookup expected");

        assert_eq!(req.query, "Lyon");
        assert_eq!(state.search_text(), "  Lyon ");
    }

    #[test]
    fn suggestions_keep_response_order() {
        let mut state = WidgetState::new();
        let req = state.set_search_text("Lon").expect("lookup expected");

        let list = names(&["London", "Londonderry", "London Colney"]);
        assert!(state.apply_suggestions(req.seq, list.clone()));
        assert_eq!(state.suggestions(), list.as_slice());
        assert_eq!(state.suggestion(1), Some("Londonderry"));
        assert_eq!(state.suggestion(5), None);
    }

    #[test]
    fn stale_suggestions_are_discarded() {
        let mut state = WidgetState::new();
        let old = state.set_search_text("Pa").expect("lookup expected");
        let new = state.set_search_text("Par").expect("lookup expected");
        assert!(new.seq > old.seq);
        assert_eq!(state.latest_suggestion_seq(), new.seq);

        assert!(state.apply_suggestions(new.seq, names(&["Paris"])));
        assert!(!state.apply_suggestions(old.seq, names(&["Pamplona", "Palermo"])));

        assert_eq!(state.suggestions(), names(&["Paris"]).as_slice());
    }

    #[test]
    fn response_after_short_text_is_discarded() {
        let mut state = WidgetState::new();
        let req = state.set_search_text("Pa").expect("lookup expected");
        assert!(state.set_search_text("P").is_none());
        assert_eq!(state.latest_suggestion_seq(), req.seq + 1);

        assert!(!state.apply_suggestions(req.seq, names(&["Paris"])));
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn blank_city_is_rejected_with_prompt() {
        assert_eq!(WidgetState::prepare_search(""), Err(Notice::EnterCityName));
        assert_eq!(WidgetState::prepare_search("   "), Err(Notice::EnterCityName));
        assert_eq!(Notice::EnterCityName.to_string(), "Enter City Name");
        assert_eq!(WidgetState::prepare_search(" Paris "), Ok("Paris".to_string()));
    }

    #[test]
    fn loaded_weather_replaces_view_and_resets_search() {
        let mut state = WidgetState::new();
        let req = state.set_search_text("Par").expect("lookup expected");
        state.apply_suggestions(req.seq, names(&["Paris"]));

        let notice = state.apply_weather(WeatherOutcome::Loaded(paris()));

        assert!(notice.is_none());
        assert_eq!(state.weather(), Some(&paris()));
        assert_eq!(state.search_text(), "");
        assert!(state.suggestions().is_empty());
        // A lookup still in flight for "Par" must not repopulate the list.
        assert!(!state.apply_suggestions(req.seq, names(&["Paris"])));
    }

    #[test]
    fn rejection_keeps_previous_view() {
        let mut state = WidgetState::new();
        state.apply_weather(WeatherOutcome::Loaded(paris()));
        let req = state.set_search_text("Atlantis").expect("lookup expected");
        state.apply_suggestions(req.seq, names(&["Atlantis"]));

        let notice = state.apply_weather(WeatherOutcome::Rejected("city not found".into()));

        assert_eq!(notice, Some(Notice::Rejected("city not found".into())));
        assert_eq!(notice.map(|n| n.to_string()).as_deref(), Some("city not found"));
        assert_eq!(state.weather(), Some(&paris()));
        assert_eq!(state.search_text(), "Atlantis");
        assert_eq!(state.suggestions(), names(&["Atlantis"]).as_slice());
    }

    #[test]
    fn failure_clears_view() {
        let mut state = WidgetState::new();
        state.apply_weather(WeatherOutcome::Loaded(paris()));

        let notice = state.apply_weather(WeatherOutcome::Failed);

        assert!(notice.is_none());
        assert!(state.weather().is_none());
    }
}
