//! Daily ingredient price lists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::round_to;
use crate::rng::RandomStream;

/// Baseline price and relative variance for one ingredient.
#[derive(Debug, Clone, Copy)]
struct Baseline {
    price: f64,
    variance: f64,
}

const LEMON: Baseline = Baseline {
    price: 0.05,
    variance: 0.25,
};
const SUGAR: Baseline = Baseline {
    price: 0.07,
    variance: 0.25,
};
const ICE: Baseline = Baseline {
    price: 0.01,
    variance: 0.30,
};
const CUP: Baseline = Baseline {
    price: 0.02,
    variance: 0.25,
};

impl Baseline {
    fn perturb(self, rng: &mut RandomStream) -> f64 {
        let factor = 1.0 + rng.uniform(-self.variance, self.variance);
        round_to(self.price * factor, 3)
    }
}

/// Per-unit ingredient costs for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceList {
    pub lemon: f64,
    pub sugar: f64,
    pub ice: f64,
    pub cup: f64,
}

impl PriceList {
    pub fn new(lemon: f64, sugar: f64, ice: f64, cup: f64) -> Self {
        Self {
            lemon,
            sugar,
            ice,
            cup,
        }
    }

    /// The unperturbed baseline prices.
    pub fn baseline() -> Self {
        Self::new(LEMON.price, SUGAR.price, ICE.price, CUP.price)
    }

    /// Draws today's prices: lemon, sugar, ice, cup, one uniform each, in that order.
    pub fn generate(rng: &mut RandomStream) -> Self {
        let lemon = LEMON.perturb(rng);
        let sugar = SUGAR.perturb(rng);
        let ice = ICE.perturb(rng);
        let cup = CUP.perturb(rng);
        Self {
            lemon,
            sugar,
            ice,
            cup,
        }
    }
}

impl fmt::Display for PriceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lemon ${:.3}, sugar ${:.3}, ice ${:.3}, cup ${:.3}",
            self.lemon, self.sugar, self.ice, self.cup
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(value: f64, base: Baseline) -> bool {
        // Rounding to 3 decimals can push a value half a mill past the bound.
        let low = base.price * (1.0 - base.variance) - 0.0005;
        let high = base.price * (1.0 + base.variance) + 0.0005;
        (low..=high).contains(&value)
    }

    #[test]
    fn test_generated_prices_are_bounded() {
        let mut rng = RandomStream::new(123);
        for _ in 0..5_000 {
            let prices = PriceList::generate(&mut rng);
            assert!(within(prices.lemon, LEMON));
            assert!(within(prices.sugar, SUGAR));
            assert!(within(prices.ice, ICE));
            assert!(within(prices.cup, CUP));
        }
    }

    #[test]
    fn test_prices_rounded_to_three_decimals() {
        let mut rng = RandomStream::new(77);
        for _ in 0..500 {
            let prices = PriceList::generate(&mut rng);
            for value in [prices.lemon, prices.sugar, prices.ice, prices.cup] {
                let scaled = value * 1000.0;
                assert!((scaled - scaled.round()).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_generate_consumes_four_draws() {
        let mut a = RandomStream::new(8);
        let mut b = RandomStream::new(8);
        PriceList::generate(&mut a);
        for _ in 0..4 {
            b.next_u32();
        }
        assert_eq!(a, b);
    }
}
