use serde::{Deserialize, Serialize};

/// Pictogram shown for the current conditions.
///
/// Built from OpenWeather icon codes ("01d", "09n", ...). Codes outside the
/// known set fall back to [`ConditionIcon::Clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConditionIcon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl ConditionIcon {
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" | "01n" => Self::Clear,
            "02d" | "03d" | "03n" => Self::Cloud,
            "04d" | "04n" => Self::Drizzle,
            "09d" | "09n" | "10d" | "10n" => Self::Rain,
            "13d" | "13n" => Self::Snow,
            _ => Self::Clear,
        }
    }

    /// Resolve an optional code, defaulting when the provider sent none.
    pub fn from_optional_code(code: Option<&str>) -> Self {
        code.map(Self::from_code).unwrap_or_default()
    }

    /// Asset file name for front ends that ship image assets.
    pub fn asset(&self) -> &'static str {
        match self {
            Self::Clear => "clear.png",
            Self::Cloud => "cloud.png",
            Self::Drizzle => "drizzle.png",
            Self::Rain => "rain.png",
            Self::Snow => "snow.png",
        }
    }

    /// Glyph used by terminal front ends.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Cloud => "☁",
            Self::Drizzle => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "❄",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloud => "Cloudy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_codes() {
        assert_eq!(ConditionIcon::from_code("01d"), ConditionIcon::Clear);
        assert_eq!(ConditionIcon::from_code("01n"), ConditionIcon::Clear);
    }

    #[test]
    fn cloud_codes() {
        assert_eq!(ConditionIcon::from_code("02d"), ConditionIcon::Cloud);
        assert_eq!(ConditionIcon::from_code("03d"), ConditionIcon::Cloud);
        assert_eq!(ConditionIcon::from_code("03n"), ConditionIcon::Cloud);
    }

    #[test]
    fn drizzle_codes() {
        assert_eq!(ConditionIcon::from_code("04d"), ConditionIcon::Drizzle);
        assert_eq!(ConditionIcon::from_code("04n"), ConditionIcon::Drizzle);
    }

    #[test]
    fn rain_codes() {
        for code in ["09d", "09n", "10d", "10n"] {
            assert_eq!(ConditionIcon::from_code(code), ConditionIcon::Rain, "{code}");
        }
    }

    #[test]
    fn snow_codes() {
        assert_eq!(ConditionIcon::from_code("13d"), ConditionIcon::Snow);
        assert_eq!(ConditionIcon::from_code("13n"), ConditionIcon::Snow);
    }

    #[test]
    fn unknown_codes_fall_back_to_clear() {
        assert_eq!(ConditionIcon::from_code("50d"), ConditionIcon::Clear);
        assert_eq!(ConditionIcon::from_code("11n"), ConditionIcon::Clear);
        // 02n is not in the table either.
        assert_eq!(ConditionIcon::from_code("02n"), ConditionIcon::Clear);
        assert_eq!(ConditionIcon::from_code(""), ConditionIcon::Clear);
    }

    #[test]
    fn missing_code_falls_back_to_clear() {
        assert_eq!(ConditionIcon::from_optional_code(None), ConditionIcon::Clear);
        assert_eq!(ConditionIcon::from_optional_code(Some("13d")), ConditionIcon::Snow);
    }

    #[test]
    fn labels_name_the_condition() {
        assert_eq!(ConditionIcon::Cloud.label(), "Cloudy");
        assert_eq!(ConditionIcon::from_code("09n").label(), "Rain");
    }

    #[test]
    fn assets_are_png_files() {
        assert_eq!(ConditionIcon::Clear.asset(), "clear.png");
        assert_eq!(ConditionIcon::Rain.asset(), "rain.png");
    }
}
