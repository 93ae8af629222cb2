//! ## lemonstand-telemetry::metrics
//! **Prometheus counters and a traffic histogram**
//!
//! Each recorder owns its registry, so parallel runs and tests never collide.

use prometheus::{Counter, Encoder, Histogram, HistogramOpts, Registry, TextEncoder};

use lemonstand_core::stand::DayResult;

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub days_committed: Counter,
    pub units_sold: Counter,
    pub stock_outs: Counter,
    pub settlement_failures: Counter,
    pub daily_customers: Histogram,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let days_committed = Counter::new("lemonstand_days_total", "Committed simulation days")?;
        let units_sold = Counter::new("lemonstand_units_sold_total", "Units of lemonade sold")?;
        let stock_outs = Counter::new(
            "lemonstand_stock_outs_total",
            "Days on which sales stopped early for lack of stock",
        )?;
        let settlement_failures = Counter::new(
            "lemonstand_settlement_failures_total",
            "Purchase orders rejected for insufficient funds",
        )?;
        let daily_customers = Histogram::with_opts(
            HistogramOpts::new("lemonstand_daily_customers", "Customers walking past per day")
                .buckets(vec![0.0, 10.0, 25.0, 50.0, 75.0, 100.0, 150.0]),
        )?;

        registry.register(Box::new(days_committed.clone()))?;
        registry.register(Box::new(units_sold.clone()))?;
        registry.register(Box::new(stock_outs.clone()))?;
        registry.register(Box::new(settlement_failures.clone()))?;
        registry.register(Box::new(daily_customers.clone()))?;

        Ok(Self {
            registry,
            days_committed,
            units_sold,
            stock_outs,
            settlement_failures,
            daily_customers,
        })
    }

    pub fn record_day(&self, day: &DayResult) {
        self.days_committed.inc();
        self.units_sold.inc_by(f64::from(day.units_sold));
        if day.stock_out.is_some() {
            self.stock_outs.inc();
        }
        self.daily_customers.observe(f64::from(day.customers));
    }

    pub fn inc_settlement_failures(&self) {
        self.settlement_failures.inc();
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposition_lists_every_metric() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.inc_settlement_failures();
        let text = metrics.gather_metrics().unwrap();
        for name in [
            "lemonstand_days_total",
            "lemonstand_units_sold_total",
            "lemonstand_stock_outs_total",
            "lemonstand_settlement_failures_total 1",
            "lemonstand_daily_customers_bucket",
        ] {
            assert!(text.contains(name), "missing {name}");
        }
    }
}
