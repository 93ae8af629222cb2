//! ## lemonstand-core::demand
//! **Customer traffic and price elasticity**
//!
//! Traffic is baseline footfall scaled by the weather multiplier plus Gaussian
//! noise. Each customer then buys with a logistic probability centred on the
//! reference price, nudged up in good weather.

use serde::{Deserialize, Serialize};

use crate::rng::RandomStream;
use crate::weather::Weather;

/// Tunable demand parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandModel {
    /// Expected customers on a day with multiplier 1.0.
    pub base_traffic: f64,
    /// Standard deviation of the traffic noise.
    pub traffic_stdev: f64,
    /// Price at which the logistic curve crosses one half.
    pub reference_price: f64,
    /// Steepness of the logistic curve.
    pub elasticity: f64,
}

impl Default for DemandModel {
    fn default() -> Self {
        Self {
            base_traffic: 60.0,
            traffic_stdev: 8.0,
            reference_price: 0.25,
            elasticity: 3.0,
        }
    }
}

impl DemandModel {
    /// Number of passers-by today. Consumes two draws.
    pub fn customer_traffic(&self, weather: &Weather, rng: &mut RandomStream) -> u32 {
        let noise = rng.normal(0.0, self.traffic_stdev);
        let customers = (self.expected_traffic(weather) + noise).round();
        customers.max(0.0) as u32
    }

    /// Noise-free traffic, for planning.
    pub fn expected_traffic(&self, weather: &Weather) -> f64 {
        self.base_traffic * weather.demand_multiplier()
    }

    /// Probability that a single customer buys at `price`.
    pub fn buy_probability(&self, price: f64, weather: &Weather) -> f64 {
        let x = price / self.reference_price - 1.0;
        let logistic = 1.0 / (1.0 + (self.elasticity * x).exp());
        let weather_boost = 0.65 + 0.35 * weather.demand_multiplier();
        (logistic * weather_boost).min(1.0).clamp(0.0, 1.0)
    }
}
