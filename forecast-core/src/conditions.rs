//! WMO weather interpretation codes, as returned by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub main: &'static str,
    pub description: &'static str,
}

impl Condition {
    const fn new(main: &'static str, description: &'static str) -> Self {
        Self { main, description }
    }
}

pub const UNKNOWN_CONDITION: Condition = Condition::new("Unknown", "unknown conditions");

/// Map a WMO code to a condition label. Total: unknown codes map to
/// [`UNKNOWN_CONDITION`].
pub fn describe_weather_code(code: i32) -> Condition {
    match code {
        0 => Condition::new("Clear", "clear sky"),
        1 => Condition::new("Clouds", "mainly clear"),
        2 => Condition::new("Clouds", "partly cloudy"),
        3 => Condition::new("Clouds", "overcast"),
        45 => Condition::new("Fog", "fog"),
        48 => Condition::new("Fog", "depositing rime fog"),
        51 => Condition::new("Drizzle", "light drizzle"),
        53 => Condition::new("Drizzle", "moderate drizzle"),
        55 => Condition::new("Drizzle", "dense drizzle"),
        56 => Condition::new("Drizzle", "light freezing drizzle"),
        57 => Condition::new("Drizzle", "dense freezing drizzle"),
        61 => Condition::new("Rain", "slight rain"),
        63 => Condition::new("Rain", "moderate rain"),
        65 => Condition::new("Rain", "heavy rain"),
        66 => Condition::new("Rain", "light freezing rain"),
        67 => Condition::new("Rain", "heavy freezing rain"),
        71 => Condition::new("Snow", "slight snow fall"),
        73 => Condition::new("Snow", "moderate snow fall"),
        75 => Condition::new("Snow", "heavy snow fall"),
        77 => Condition::new("Snow", "snow grains"),
        80 => Condition::new("Rain", "slight rain showers"),
        81 => Condition::new("Rain", "moderate rain showers"),
        82 => Condition::new("Rain", "violent rain showers"),
        85 => Condition::new("Snow", "slight snow showers"),
        86 => Condition::new("Snow", "heavy snow showers"),
        95 => Condition::new("Thunderstorm", "thunderstorm"),
        96 => Condition::new("Thunderstorm", "thunderstorm with slight hail"),
        99 => Condition::new("Thunderstorm", "thunderstorm with heavy hail"),
        _ => UNKNOWN_CONDITION,
    }
}
