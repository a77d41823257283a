//! Terminal rendering of a forecast as a grid of cards.

use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone};
use forecast_core::{ForecastResult, ForecastSample};

const CARD_WIDTH: usize = 24;
const CARDS_PER_ROW: usize = 4;

pub const FALLBACK_NOTICE: &str = "Showing data from the free Open-Meteo service.";

/// "Fri, Jan 30"
pub fn format_day<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    local(timestamp, tz).map(|dt| dt.format("%a, %b %-d").to_string()).unwrap_or_default()
}

/// "3:00 PM"
pub fn format_time<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    local(timestamp, tz).map(|dt| dt.format("%-I:%M %p").to_string()).unwrap_or_default()
}

fn local<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz))
}

/// Whole degrees / mph, the way the cards show them.
pub fn rounded(value: f64) -> i64 {
    value.round() as i64
}

/// First letter upper-cased: "light rain" -> "Light rain".
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn card_lines<Tz: TimeZone>(sample: &ForecastSample, tz: &Tz) -> [String; 7]
where
    Tz::Offset: Display,
{
    [
        format_day(sample.timestamp, tz),
        format_time(sample.timestamp, tz),
        format!("{}°F", rounded(sample.temperature_f)),
        capitalize(&sample.condition_description),
        format!("Feels like: {}°F", rounded(sample.feels_like_f)),
        format!("Humidity: {}%", sample.humidity_pct),
        format!("Wind: {} mph", rounded(sample.wind_speed_mph)),
    ]
}

fn fit(text: &str) -> String {
    let clipped: String = text.chars().take(CARD_WIDTH).collect();
    format!("{clipped:<CARD_WIDTH$}")
}

pub fn render_forecast<Tz: TimeZone>(result: &ForecastResult, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut out = String::new();

    let _ = writeln!(out, "{}", result.city_label);
    let _ = writeln!(out, "ZIP Code: {}", result.postal_code);
    let _ = writeln!(out, "5-Day Forecast (3-hour intervals)");
    if result.data_source.is_fallback() {
        let _ = writeln!(out, "Note: {FALLBACK_NOTICE}");
    }

    let rule = "-".repeat(CARD_WIDTH);
    for row in result.samples.chunks(CARDS_PER_ROW) {
        let cards: Vec<[String; 7]> = row.iter().map(|s| card_lines(s, tz)).collect();

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", vec![rule.as_str(); cards.len()].join("   "));
        for line in 0..7 {
            let cells: Vec<String> = cards.iter().map(|c| fit(&c[line])).collect();
            let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
        }
    }

    out
}
