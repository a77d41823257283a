//! Reshape an hourly series into 3-hour samples, the shape OpenWeather
//! returns natively.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::{conditions::describe_weather_code, model::ForecastSample};

/// Take every n-th hour.
pub const SAMPLE_STRIDE: usize = 3;
/// 5 days x 8 samples per day.
pub const MAX_SAMPLES: usize = 40;

const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parallel hourly arrays, indexed by hour. Times are UTC (`timezone=GMT`).
/// Open-Meteo sends `null` for hours it has no value for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
}

impl HourlySeries {
    fn is_well_formed(&self) -> bool {
        let len = self.time.len();
        len > 0
            && self.temperature_2m.len() == len
            && self.apparent_temperature.len() == len
            && self.relative_humidity_2m.len() == len
            && self.wind_speed_10m.len() == len
            && self.weather_code.len() == len
    }

    /// `None` when any value for hour `idx` is missing.
    fn hour(&self, idx: usize, timestamp: i64) -> Option<ForecastSample> {
        let condition = describe_weather_code(self.weather_code[idx]?);
        Some(ForecastSample {
            timestamp,
            temperature_f: self.temperature_2m[idx]?,
            feels_like_f: self.apparent_temperature[idx]?,
            humidity_pct: humidity_pct(self.relative_humidity_2m[idx]?),
            wind_speed_mph: self.wind_speed_10m[idx]?,
            condition_main: condition.main.to_owned(),
            condition_description: condition.description.to_owned(),
        })
    }
}

/// Down-sample `series` starting at the first hour at or after `now`.
///
/// Returns an empty vector for empty or malformed input. Selected hours with a
/// missing value are skipped. If every hour lies in the past the series is
/// read from index 0.
pub fn normalize_hourly(series: &HourlySeries, now: DateTime<Utc>) -> Vec<ForecastSample> {
    if !series.is_well_formed() {
        tracing::debug!(hours = series.time.len(), "hourly series empty or misaligned");
        return Vec::new();
    }

    let Some(timestamps) = parse_times(&series.time) else {
        tracing::debug!("hourly series contains an unparseable timestamp");
        return Vec::new();
    };

    let now_ts = now.timestamp();
    let start = timestamps.iter().position(|&ts| ts >= now_ts).unwrap_or(0);

    let mut samples: Vec<ForecastSample> = Vec::with_capacity(MAX_SAMPLES);
    for idx in (start..timestamps.len()).step_by(SAMPLE_STRIDE) {
        if samples.len() == MAX_SAMPLES {
            break;
        }

        let timestamp = timestamps[idx];
        if samples.last().is_some_and(|prev| prev.timestamp >= timestamp) {
            continue;
        }

        match series.hour(idx, timestamp) {
            Some(sample) => samples.push(sample),
            None => tracing::debug!(idx, "skipping hour with missing values"),
        }
    }

    samples
}

fn parse_times(times: &[String]) -> Option<Vec<i64>> {
    times
        .iter()
        .map(|t| {
            NaiveDateTime::parse_from_str(t, HOURLY_TIME_FORMAT)
                .ok()
                .map(|ndt| ndt.and_utc().timestamp())
        })
        .collect()
}

fn humidity_pct(raw: f64) -> u8 {
    if raw.is_finite() { raw.round().clamp(0.0, 100.0) as u8 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Timelike};

    fn series_from(start: DateTime<Utc>, hours: usize) -> HourlySeries {
        let mut s = HourlySeries::default();
        for h in 0..hours {
            let t = start + Duration::hours(h as i64);
            s.time.push(t.format(HOURLY_TIME_FORMAT).to_string());
            s.temperature_2m.push(Some(60.0 + h as f64));
            s.apparent_temperature.push(Some(58.0 + h as f64));
            s.relative_humidity_2m.push(Some(50.0));
            s.wind_speed_10m.push(Some(5.5));
            s.weather_code.push(Some(if h % 2 == 0 { 0 } else { 61 }));
        }
        s
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn empty_series_yields_nothing() {
        assert!(normalize_hourly(&HourlySeries::default(), Utc::now()).is_empty());
    }

    #[test]
    fn misaligned_series_yields_nothing() {
        let mut s = series_from(at(2026, 3, 1, 0), 24);
        s.weather_code.pop();
        assert!(normalize_hourly(&s, at(2026, 3, 1, 0)).is_empty());
    }

    #[test]
    fn unparseable_time_yields_nothing() {
        let mut s = series_from(at(2026, 3, 1, 0), 6);
        s.time[2] = "yesterday".into();
        assert!(normalize_hourly(&s, at(2026, 3, 1, 0)).is_empty());
    }

    #[test]
    fn starts_at_first_future_hour_and_strides_by_three() {
        let start = at(2026, 3, 1, 0);
        let s = series_from(start, 24);
        let now = start + Duration::minutes(4 * 60 + 30);

        let out = normalize_hourly(&s, now);

        let hours: Vec<u32> = out
            .iter()
            .map(|x| DateTime::from_timestamp(x.timestamp, 0).unwrap().hour())
            .collect();
        assert_eq!(hours, vec![5, 8, 11, 14, 17, 20, 23]);
        assert_eq!(out[0].temperature_f, 65.0);
        assert_eq!(out[0].feels_like_f, 63.0);
        assert_eq!(out[0].condition_main, "Rain");
        assert_eq!(out[0].condition_description, "slight rain");
    }

    #[test]
    fn caps_at_forty_samples() {
        let start = at(2026, 3, 1, 0);
        let s = series_from(start, 7 * 24);
        let out = normalize_hourly(&s, start);
        assert_eq!(out.len(), MAX_SAMPLES);
        assert_eq!(out[0].timestamp, start.timestamp());
        assert_eq!(out[39].timestamp, (start + Duration::hours(39 * 3)).timestamp());
    }

    #[test]
    fn timestamps_strictly_increase() {
        let start = at(2026, 3, 1, 0);
        let mut s = series_from(start, 24);
        // A duplicated hour in the source must not produce a repeat.
        s.time[3] = s.time[0].clone();
        let out = normalize_hourly(&s, start);
        assert!(out.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(out.len() <= MAX_SAMPLES);
    }

    #[test]
    fn all_past_series_reads_from_the_beginning() {
        let start = at(2020, 1, 1, 0);
        let s = series_from(start, 12);
        let out = normalize_hourly(&s, at(2026, 1, 1, 0));
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].timestamp, start.timestamp());
    }

    #[test]
    fn hours_with_missing_values_are_skipped() {
        let start = at(2026, 3, 1, 0);
        let mut s = series_from(start, 12);
        s.temperature_2m[3] = None;
        s.weather_code[9] = None;
        // Not a selected hour, so it changes nothing.
        s.wind_speed_10m[4] = None;

        let out = normalize_hourly(&s, start);

        let stamps: Vec<i64> = out.iter().map(|x| x.timestamp).collect();
        assert_eq!(
            stamps,
            vec![start.timestamp(), (start + Duration::hours(6)).timestamp()]
        );
    }

    #[test]
    fn null_entries_deserialize_as_missing() {
        let json = serde_json::json!({
            "time": ["2026-03-01T00:00", "2026-03-01T01:00"],
            "temperature_2m": [61.0, null],
            "apparent_temperature": [60.0, 59.0],
            "relative_humidity_2m": [40, 41],
            "wind_speed_10m": [3.1, 3.2],
            "weather_code": [0, null]
        });
        let s: HourlySeries = serde_json::from_value(json).unwrap();
        assert_eq!(s.temperature_2m, vec![Some(61.0), None]);
        assert_eq!(s.weather_code, vec![Some(0), None]);
    }

    #[test]
    fn humidity_is_rounded_and_clamped() {
        assert_eq!(humidity_pct(49.6), 50);
        assert_eq!(humidity_pct(-3.0), 0);
        assert_eq!(humidity_pct(104.0), 100);
        assert_eq!(humidity_pct(f64::NAN), 0);
    }
}
