//! Rounding helpers for currency and price values.

/// Rounds to two decimals, the precision of every recorded currency amount.
#[inline]
pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}

/// Rounds to `decimals` places, half away from zero.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.235_000_1), 1.24);
        assert_eq!(round_cents(-0.004), -0.0);
    }

    #[test]
    fn rounds_prices_to_three_places() {
        assert_eq!(round_to(0.054_4, 3), 0.054);
        assert_eq!(round_to(0.054_6, 3), 0.055);
    }
}
