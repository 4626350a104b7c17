//! Forecast model and the display strings derived from it

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Directory icon references point into. The files themselves are not shipped.
pub const ICON_DIR: &str = "images";

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// One day of the upstream series
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// 7Timer condition code, e.g. `pcloudy`
    pub condition: String,
    /// °C, as sent upstream
    pub max_temperature: f64,
    pub min_temperature: f64,
}

/// Days plus the label of the selection that requested them
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Forecast {
    pub label: String,
    pub days: Vec<ForecastDay>,
}

impl Forecast {
    pub fn heading(&self) -> String {
        heading(&self.label)
    }

    pub fn cards(&self) -> Vec<DayCard> {
        self.days.iter().map(DayCard::from).collect()
    }
}

pub fn heading(label: &str) -> String {
    format!("Weather Forecast: {}", label)
}

/// `images/<lowercased condition>.png`; no check that the file exists.
pub fn icon_path(condition: &str) -> String {
    format!("{}/{}.png", ICON_DIR, condition.to_lowercase())
}

/// Short weekday, short month, numeric day: `Mon, Jan 15`
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

pub fn format_temperature(celsius: f64) -> String {
    // -0.0 prints as "-0"
    let celsius = if celsius == 0.0 { 0.0 } else { celsius };
    format!("{}°C", celsius)
}

/// Everything a renderer needs for one day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCard {
    pub date: String,
    pub icon: String,
    pub glyph: &'static str,
    pub condition: String,
    pub high: String,
    pub low: String,
}

impl From<&ForecastDay> for DayCard {
    fn from(day: &ForecastDay) -> Self {
        Self {
            date: format_day(day.date),
            icon: icon_path(&day.condition),
            glyph: ConditionKind::from_code(&day.condition).emoji(),
            condition: day.condition.clone(),
            high: format_temperature(day.max_temperature),
            low: format_temperature(day.min_temperature),
        }
    }
}

/// Condition families of the civillight product
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionKind {
    Clear,
    PartlyCloudy,
    Cloudy,
    Humid,
    Showers,
    Rain,
    Snow,
    Sleet,
    Thunderstorm,
    Unknown,
}

impl ConditionKind {
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "clear" => ConditionKind::Clear,
            "pcloudy" | "mcloudy" | "partlycloudy" => ConditionKind::PartlyCloudy,
            "cloudy" => ConditionKind::Cloudy,
            "humid" => ConditionKind::Humid,
            "oshower" | "ishower" | "lightrain" => ConditionKind::Showers,
            "rain" => ConditionKind::Rain,
            "lightsnow" | "snow" => ConditionKind::Snow,
            "rainsnow" => ConditionKind::Sleet,
            "ts" | "tsrain" => ConditionKind::Thunderstorm,
            _ => ConditionKind::Unknown,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ConditionKind::Clear => "\u{2600}\u{fe0f}",
            ConditionKind::PartlyCloudy => "\u{26c5}",
            ConditionKind::Cloudy | ConditionKind::Unknown => "\u{2601}\u{fe0f}",
            ConditionKind::Humid => "\u{1f32b}\u{fe0f}",
            ConditionKind::Showers => "\u{1f326}\u{fe0f}",
            ConditionKind::Rain => "\u{1f327}\u{fe0f}",
            ConditionKind::Snow => "\u{2744}\u{fe0f}",
            ConditionKind::Sleet => "\u{1f328}\u{fe0f}",
            ConditionKind::Thunderstorm => "\u{26c8}\u{fe0f}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(condition: &str, max: f64, min: f64) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            condition: condition.into(),
            max_temperature: max,
            min_temperature: min,
        }
    }

    #[test]
    fn test_icon_path_lowercases() {
        assert_eq!(icon_path("PartlyCloudy"), "images/partlycloudy.png");
        assert_eq!(icon_path("tsrain"), "images/tsrain.png");
    }

    #[test]
    fn test_format_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_day(date), "Mon, Jan 15");

        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(format_day(date), "Sat, Mar 2");
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(12.0), "12°C");
        assert_eq!(format_temperature(-3.0), "-3°C");
        assert_eq!(format_temperature(7.5), "7.5°C");
        assert_eq!(format_temperature(-0.0), "0°C");
    }

    #[test]
    fn test_heading() {
        let forecast = Forecast {
            label: "Paris, France".into(),
            days: vec![],
        };
        assert_eq!(forecast.heading(), "Weather Forecast: Paris, France");
    }

    #[test]
    fn test_day_card() {
        let card = DayCard::from(&day("pcloudy", 9.0, 2.0));

        assert_eq!(card.date, "Mon, Jan 15");
        assert_eq!(card.icon, "images/pcloudy.png");
        assert_eq!(card.condition, "pcloudy");
        assert_eq!(card.high, "9°C");
        assert_eq!(card.low, "2°C");
        assert_eq!(card.glyph, ConditionKind::PartlyCloudy.emoji());
    }

    #[test]
    fn test_condition_kind() {
        assert_eq!(ConditionKind::from_code("clear"), ConditionKind::Clear);
        assert_eq!(ConditionKind::from_code("ISHOWER"), ConditionKind::Showers);
        assert_eq!(ConditionKind::from_code("tsrain"), ConditionKind::Thunderstorm);
        assert_eq!(ConditionKind::from_code("volcano"), ConditionKind::Unknown);
    }
}
