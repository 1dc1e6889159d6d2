use chrono::Local;
use colored::Colorize;
use weather_core::{Notice, Update, WeatherView, WidgetState};

const HUMIDITY_GLYPH: &str = "💧";
const WIND_GLYPH: &str = "🌬";

/// The weather panel: icon, temperature, location, then humidity and wind.
pub fn panel(view: &WeatherView) -> String {
    let mut lines = vec![
        format!(
            "{}  {}  {}",
            view.icon.glyph(),
            format!("{}°c", view.temperature).bold(),
            view.icon.label().dimmed()
        ),
        format!("   {}", view.location.bright_cyan()),
        format!(
            "   {HUMIDITY_GLYPH} {} Humidity    {WIND_GLYPH} {} Km/h Wind",
            view.humidity_pct, view.wind_speed_kmh
        ),
    ];

    if let Some(observed) = view.observed_at {
        let local = observed.with_timezone(&Local);
        lines.push(format!("   {}", format!("Updated {}", local.format("%H:%M")).dimmed()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Numbered suggestion list, one per line. Empty when there are none.
pub fn suggestions(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("  {} {}\n", format!("#{}", i + 1).yellow(), name))
        .collect()
}

pub fn notice(notice: &Notice) -> String {
    format!("{} {}", "!".yellow().bold(), notice)
}

pub fn no_data() -> String {
    "No weather data available.".dimmed().to_string()
}

/// Text to print after an update was applied to `state`.
pub fn update(update: &Update, state: &WidgetState) -> String {
    match update {
        Update::Suggestions => suggestions(state.suggestions()),
        Update::StaleSuggestions => String::new(),
        Update::Weather => state.weather().map(panel).unwrap_or_default(),
        Update::WeatherCleared => format!("{}\n", no_data()),
        Update::Notice(n) => format!("{}\n", notice(n)),
    }
}

pub fn help() -> String {
    [
        "Type a city name to get suggestions.",
        "  #N     show weather for suggestion N",
        "  Enter  show weather for the current text",
        "  :q     quit",
    ]
    .join("\n")
}
