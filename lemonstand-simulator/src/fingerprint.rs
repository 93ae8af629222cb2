//! BLAKE3 fingerprint of a run's history.
//!
//! Two runs with the same seed and policy must hash identically. Floats are
//! hashed by bit pattern, so any drift in rounding shows up as a mismatch.

use blake3::Hasher;

use lemonstand_core::stand::DayResult;
use lemonstand_core::weather::WeatherKind;

fn kind_tag(kind: WeatherKind) -> u8 {
    match kind {
        WeatherKind::Cold => 0,
        WeatherKind::Mild => 1,
        WeatherKind::Hot => 2,
        WeatherKind::Storm => 3,
    }
}

/// Feeds one committed day into `hasher`.
pub fn hash_day(hasher: &mut Hasher, day: &DayResult) {
    hasher.update(&day.day.to_le_bytes());
    hasher.update(&[kind_tag(day.weather.kind)]);
    hasher.update(&day.weather.temperature.to_le_bytes());
    for price in [
        day.prices.lemon,
        day.prices.sugar,
        day.prices.ice,
        day.prices.cup,
        day.plan.price(),
    ] {
        hasher.update(&price.to_bits().to_le_bytes());
    }
    let order = day.plan.order();
    let recipe = day.plan.recipe();
    let leftovers = &day.leftovers;
    for count in [
        order.lemons,
        order.sugar,
        order.ice,
        order.cups,
        recipe.lemons_per_batch(),
        recipe.sugar_per_batch(),
        recipe.ice_per_unit(),
        recipe.units_per_batch(),
        day.customers,
        day.units_sold,
        leftovers.lemons,
        leftovers.sugar,
        leftovers.ice,
        leftovers.cups,
        leftovers.units_in_batch,
    ] {
        hasher.update(&count.to_le_bytes());
    }
    for amount in [day.gross_revenue, day.supply_cost, day.net_profit] {
        hasher.update(&amount.to_bits().to_le_bytes());
    }
    hasher.update(&[u8::from(day.stock_out.is_some())]);
}

/// Hex digest over a whole history.
pub fn history_fingerprint(history: &[DayResult]) -> String {
    let mut hasher = Hasher::new();
    for day in history {
        hash_day(&mut hasher, day);
    }
    hex::encode(hasher.finalize().as_bytes())
}
