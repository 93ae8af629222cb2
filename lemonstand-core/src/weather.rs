//! Daily weather and forecasting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::RandomStream;

/// Weather category for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    Cold,
    Mild,
    Hot,
    Storm,
}

impl WeatherKind {
    /// Scalar applied to baseline traffic and to purchase probability.
    pub fn demand_multiplier(self) -> f64 {
        match self {
            WeatherKind::Hot => 1.4,
            WeatherKind::Mild => 1.0,
            WeatherKind::Cold => 0.6,
            WeatherKind::Storm => 0.25,
        }
    }

    pub fn forecast_text(self) -> &'static str {
        match self {
            WeatherKind::Hot => "Hot and sunny",
            WeatherKind::Mild => "Mild and pleasant",
            WeatherKind::Cold => "Chilly and overcast",
            WeatherKind::Storm => "Thunderstorms rolling in",
        }
    }

    /// Inclusive temperature range (°F) the forecast draws from.
    pub fn temperature_range(self) -> (i32, i32) {
        match self {
            WeatherKind::Storm => (65, 75),
            WeatherKind::Cold => (55, 65),
            WeatherKind::Mild => (70, 84),
            WeatherKind::Hot => (85, 100),
        }
    }

    /// Maps one uniform draw in [0, 1) onto a category.
    fn from_roll(roll: f64) -> Self {
        if roll < 0.10 {
            WeatherKind::Storm
        } else if roll < 0.35 {
            WeatherKind::Cold
        } else if roll < 0.75 {
            WeatherKind::Mild
        } else {
            WeatherKind::Hot
        }
    }
}

/// One day's weather. Immutable once forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub kind: WeatherKind,
    pub temperature: i32,
}

impl Weather {
    pub fn new(kind: WeatherKind, temperature: i32) -> Self {
        Self { kind, temperature }
    }

    /// Draws a forecast: one uniform for the category, one integer for the temperature.
    pub fn forecast(rng: &mut RandomStream) -> Self {
        let kind = WeatherKind::from_roll(rng.uniform(0.0, 1.0));
        let (low, high) = kind.temperature_range();
        let temperature = rng.integer(low, high);
        Self { kind, temperature }
    }

    #[inline]
    pub fn demand_multiplier(&self) -> f64 {
        self.kind.demand_multiplier()
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}°F)", self.kind.forecast_text(), self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(WeatherKind::from_roll(0.0), WeatherKind::Storm);
        assert_eq!(WeatherKind::from_roll(0.099), WeatherKind::Storm);
        assert_eq!(WeatherKind::from_roll(0.10), WeatherKind::Cold);
        assert_eq!(WeatherKind::from_roll(0.349), WeatherKind::Cold);
        assert_eq!(WeatherKind::from_roll(0.35), WeatherKind::Mild);
        assert_eq!(WeatherKind::from_roll(0.749), WeatherKind::Mild);
        assert_eq!(WeatherKind::from_roll(0.75), WeatherKind::Hot);
        assert_eq!(WeatherKind::from_roll(0.999), WeatherKind::Hot);
    }

    #[test]
    fn test_forecast_temperature_within_category_range() {
        let mut rng = RandomStream::new(11);
        for _ in 0..2_000 {
            let weather = Weather::forecast(&mut rng);
            let (low, high) = weather.kind.temperature_range();
            assert!((low..=high).contains(&weather.temperature));
        }
    }

    #[test]
    fn test_forecast_consumes_two_draws() {
        let mut a = RandomStream::new(3);
        let mut b = RandomStream::new(3);
        Weather::forecast(&mut a);
        b.next_u32();
        b.next_u32();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let weather = Weather::new(WeatherKind::Hot, 92);
        assert_eq!(weather.to_string(), "Hot and sunny (92°F)");
    }
}
