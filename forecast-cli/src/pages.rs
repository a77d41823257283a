//! HTML pages for the web front end.

use std::fmt::{Display, Write};

use chrono::TimeZone;
use forecast_core::ForecastResult;

use crate::display::{FALLBACK_NOTICE, capitalize, format_day, format_time, rounded};

/// Links offered on the search and not-found pages.
const EXAMPLE_LOCATIONS: [(&str, &str); 3] =
    [("San Francisco", "94102"), ("Beverly Hills", "90210"), ("New York", "10001")];

pub const INVALID_ZIP_MESSAGE: &str = "ZIP code must be 5 digits";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

fn example_links() -> String {
    EXAMPLE_LOCATIONS
        .iter()
        .map(|(name, zip)| format!("<a href=\"/weather/{zip}\">{name}</a>"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn home_page(error: Option<&str>, value: &str) -> String {
    let error_html = error
        .map(|msg| format!("<p class=\"error\">{}</p>", escape(msg)))
        .unwrap_or_default();

    let body = format!(
        "<main class=\"panel\">\n<h1>5-Day Weather Forecast</h1>\n\
         <p>Enter a US ZIP code to view the forecast</p>\n\
         <form action=\"/search\" method=\"get\">\n\
         <input type=\"text\" name=\"zip\" value=\"{}\" placeholder=\"Enter ZIP code (e.g., 94102)\" \
         maxlength=\"5\" pattern=\"[0-9]{{5}}\" inputmode=\"numeric\" required>\n\
         {error_html}\n<button type=\"submit\">Get Forecast</button>\n</form>\n\
         <p class=\"muted\">Try these locations:</p>\n<nav class=\"examples\">\n{}\n</nav>\n</main>",
        escape(value),
        example_links()
    );

    layout("5-Day Weather Forecast", &body)
}

pub fn forecast_page<Tz: TimeZone>(result: &ForecastResult, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut cards = String::new();
    for sample in &result.samples {
        let _ = write!(
            cards,
            "<article class=\"card\" data-ts=\"{ts}\">\n<p class=\"day\">{day}</p>\n<p class=\"time\">{time}</p>\n\
             <p class=\"temp\">{temp}°F</p>\n<p class=\"desc\">{desc}</p>\n<div class=\"details\">\n\
             <p>Feels like: {feels}°F</p>\n<p>Humidity: {humidity}%</p>\n<p>Wind: {wind} mph</p>\n</div>\n</article>\n",
            ts = sample.timestamp,
            day = format_day(sample.timestamp, tz),
            time = format_time(sample.timestamp, tz),
            temp = rounded(sample.temperature_f),
            desc = escape(&capitalize(&sample.condition_description)),
            feels = rounded(sample.feels_like_f),
            humidity = sample.humidity_pct,
            wind = rounded(sample.wind_speed_mph),
        );
    }

    let notice = if result.data_source.is_fallback() {
        format!("<p class=\"notice\">{FALLBACK_NOTICE}</p>\n")
    } else {
        String::new()
    };

    let body = format!(
        "<main class=\"wide\">\n<a href=\"/\">&larr; Back to search</a>\n<h1>{city}</h1>\n\
         <p>ZIP Code: {zip}</p>\n<p class=\"muted\">5-Day Forecast (3-hour intervals)</p>\n{notice}\
         <section class=\"grid\">\n{cards}</section>\n</main>",
        city = escape(&result.city_label),
        zip = result.postal_code,
    );

    layout(&format!("Forecast for {}", result.city_label), &body)
}

/// Shown for codes that are malformed or that no provider knows.
pub fn zip_not_found_page(zip: &str) -> String {
    let body = format!(
        "<main class=\"panel\">\n<h1>ZIP code not found</h1>\n\
         <p>We couldn’t find weather data for <span class=\"mono\">{}</span>.</p>\n\
         <p class=\"muted\">Please enter a valid 5-digit US ZIP code or try one of the examples below.</p>\n\
         <nav class=\"examples\">\n{}\n</nav>\n<a href=\"/\">&larr; Back to search</a>\n</main>",
        escape(zip),
        example_links()
    );

    layout("ZIP code not found", &body)
}

pub fn page_not_found() -> String {
    layout(
        "Page not found",
        "<main class=\"panel\">\n<h1>Page not found</h1>\n\
         <p>The page you’re looking for doesn’t exist or may have moved.</p>\n\
         <a href=\"/\">&larr; Back to home</a>\n</main>",
    )
}

/// Generic failure page. Never includes upstream error details.
pub fn error_page(retry_href: &str) -> String {
    let body = format!(
        "<main class=\"panel\">\n<h1>Something went wrong</h1>\n\
         <p>Please try again. If the problem continues, go back to the home page.</p>\n\
         <a class=\"button\" href=\"{}\">Try again</a>\n<a href=\"/\">Back to home</a>\n</main>",
        escape(retry_href)
    );

    layout("Something went wrong", &body)
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#f9fafb;color:#1f2937}\
main.panel{max-width:28rem;margin:4rem auto;padding:2rem;background:#fff;border-radius:.5rem;box-shadow:0 4px 12px rgba(0,0,0,.1);text-align:center}\
main.wide{max-width:80rem;margin:0 auto;padding:2rem 1rem}\
input{width:100%;box-sizing:border-box;padding:.75rem 1rem;border:1px solid #d1d5db;border-radius:.5rem}\
button,a.button{display:inline-block;margin-top:1rem;width:100%;padding:.75rem;border:0;border-radius:.5rem;background:#3b82f6;color:#fff;font-weight:600}\
a{color:#3b82f6}.muted{color:#6b7280;font-size:.875rem}.error{color:#ef4444;font-size:.875rem}\
.notice{background:#fef3c7;padding:.5rem 1rem;border-radius:.5rem}.mono{font-family:monospace}\
.examples{display:flex;gap:.5rem;justify-content:center;flex-wrap:wrap;margin-bottom:1rem}\
.grid{display:grid;gap:1rem;grid-template-columns:repeat(auto-fill,minmax(14rem,1fr))}\
.card{background:#fff;padding:1.5rem;border-radius:.5rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
.day{font-weight:600;font-size:1.125rem}.temp{font-size:2.25rem;font-weight:700;color:#2563eb}\
.details{border-top:1px solid #e5e7eb;margin-top:1rem;padding-top:1rem;font-size:.875rem;color:#4b5563}";
