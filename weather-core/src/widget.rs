//! Async driver for [`WidgetState`].
//!
//! Lookups run as spawned tasks and report back over a channel; only the
//! owner of the widget mutates its state, in [`WeatherWidget::next_update`].
//! Must be used from within a tokio runtime.

use std::sync::Arc;

use tokio::{
    sync::mpsc,
    task::{AbortHandle, JoinSet},
};

use crate::{
    lookup::{self, WeatherOutcome},
    provider::WeatherProvider,
    state::{Notice, WidgetState},
};

#[derive(Debug)]
enum FetchEvent {
    Suggestions { seq: u64, names: Vec<String> },
    Weather { city: String, outcome: WeatherOutcome },
}

/// What changed after a lookup completed.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// The suggestion list was replaced.
    Suggestions,
    /// A response for superseded input arrived and was dropped.
    StaleSuggestions,
    /// The weather panel was replaced.
    Weather,
    /// The weather lookup failed and the panel was cleared.
    WeatherCleared,
    /// The service rejected the weather lookup; the panel is unchanged.
    Notice(Notice),
}

#[derive(Debug)]
pub struct WeatherWidget {
    provider: Arc<dyn WeatherProvider>,
    state: WidgetState,
    events_tx: mpsc::UnboundedSender<FetchEvent>,
    events_rx: mpsc::UnboundedReceiver<FetchEvent>,
    pending_suggestions: Option<AbortHandle>,
    weather_tasks: JoinSet<()>,
}

impl WeatherWidget {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            state: WidgetState::new(),
            events_tx,
            events_rx,
            pending_suggestions: None,
            weather_tasks: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Handle a text change. Aborts the previous suggestion lookup and starts
    /// a new one when the text is long enough; returns whether one started.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        self.cancel_pending_suggestions();

        let Some(request) = self.state.set_search_text(text) else {
            return false;
        };

        tracing::debug!(seq = request.seq, query = %request.query, "Requesting suggestions");

        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            let names = lookup::fetch_suggestions(provider.as_ref(), &request.query).await;
            let _ = tx.send(FetchEvent::Suggestions {
                seq: request.seq,
                names,
            });
        });

        self.pending_suggestions = Some(handle.abort_handle());
        true
    }

    /// Search for the current text.
    pub fn submit(&mut self) -> Result<(), Notice> {
        let text = self.state.search_text().to_owned();
        self.search(&text)
    }

    /// Search for the suggestion at `index`. Returns `Ok(false)` when there is
    /// no such suggestion.
    pub fn select_suggestion(&mut self, index: usize) -> Result<bool, Notice> {
        let Some(city) = self.state.suggestion(index).map(str::to_owned) else {
            return Ok(false);
        };
        self.search(&city)?;
        Ok(true)
    }

    /// Start a weather lookup for `city`. Blank names are refused before any
    /// request is made.
    pub fn search(&mut self, city: &str) -> Result<(), Notice> {
        let city = WidgetState::prepare_search(city)?;

        // Reap finished lookups so the set does not grow unbounded.
        while self.weather_tasks.try_join_next().is_some() {}

        tracing::debug!(%city, "Requesting weather");

        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        self.weather_tasks.spawn(async move {
            let outcome = lookup::fetch_weather(provider.as_ref(), &city).await;
            let _ = tx.send(FetchEvent::Weather { city, outcome });
        });

        Ok(())
    }

    /// Wait for the next lookup to finish and apply it.
    pub async fn next_update(&mut self) -> Option<Update> {
        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    fn apply(&mut self, event: FetchEvent) -> Update {
        match event {
            FetchEvent::Suggestions { seq, names } => {
                if self.state.apply_suggestions(seq, names) {
                    self.pending_suggestions = None;
                    Update::Suggestions
                } else {
                    Update::StaleSuggestions
                }
            }
            FetchEvent::Weather { city, outcome } => {
                let loaded = matches!(outcome, WeatherOutcome::Loaded(_));
                if let Some(notice) = self.state.apply_weather(outcome) {
                    return Update::Notice(notice);
                }

                if loaded {
                    // The search text was reset; its lookup is moot.
                    self.cancel_pending_suggestions();
                    tracing::info!(%city, "Weather rendered");
                    Update::Weather
                } else {
                    Update::WeatherCleared
                }
            }
        }
    }

    fn cancel_pending_suggestions(&mut self) {
        if let Some(handle) = self.pending_suggestions.take() {
            handle.abort();
        }
    }
}

impl Drop for WeatherWidget {
    fn drop(&mut self) {
        self.cancel_pending_suggestions();
        // JoinSet aborts the weather lookups on drop.
    }
}
