use crate::error::QuoteError;
use bps_domain::declarations::Declarations;
use bps_domain::order::Order;
use bps_domain::quote::{Quote, QuoteLine};
use tracing::debug;

/// Prices orders against the declared tables.
///
/// Bracket lists are walked in declared order:
/// * `distance`, `qualities`, `bonus`: the last matching bracket wins.
/// * `weights`: the first matching bracket wins.
#[derive(Debug, Clone)]
pub struct Pricing {
    declarations: Declarations,
    minimum_total: f64,
}

impl Pricing {
    #[must_use]
    pub const fn new(declarations: Declarations, minimum_total: f64) -> Self {
        Self { declarations, minimum_total }
    }

    #[must_use]
    pub const fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    #[must_use]
    pub const fn minimum_total(&self) -> f64 {
        self.minimum_total
    }

    /// Quotes what the service pays for the batteries in `order`.
    ///
    /// `total = (Σ base value × quality multiplier − shipping × weight multiplier)`,
    /// raised by the bonus percentage, floored at the minimum, rounded to cents.
    ///
    /// # Errors
    /// Returns [`QuoteError::UnknownBatteryType`] when a package's battery type
    /// has no declared base value.
    pub fn assess(&self, order: &Order) -> Result<Quote, QuoteError> {
        let shipping = order.distance * self.distance_multiplier(order.distance);

        let lines = order
            .packages
            .iter()
            .map(|package| {
                let base = self
                    .declarations
                    .battery_base_value
                    .get(&package.battery_type)
                    .copied()
                    .ok_or_else(|| QuoteError::UnknownBatteryType {
                        order_id: order.order_id,
                        battery_type: package.battery_type.clone(),
                        context: None,
                    })?;

                Ok(QuoteLine {
                    battery_type: package.battery_type.clone(),
                    battery_weight: package.battery_weight,
                    quality: package.quality,
                    assessed_value: base * self.quality_multiplier(package.quality),
                })
            })
            .collect::<Result<Vec<_>, QuoteError>>()?;

        let total_weight: f64 = lines.iter().map(|l| l.battery_weight).sum();
        let total_value: f64 = lines.iter().map(|l| l.assessed_value).sum();
        let bonus_percent = self.bonus_percent(lines.len());

        let net = total_value - shipping * self.weight_multiplier(total_weight);
        let with_bonus = net + net * (bonus_percent / 100.0);
        let total = round_cents(with_bonus.max(self.minimum_total));

        debug!(
            order_id = %order.order_id,
            packages = lines.len(),
            total_value,
            shipping,
            bonus_percent,
            total,
            "Order assessed"
        );

        Ok(Quote { lines, total_weight, total_value, bonus_percent, shipping, total })
    }

    fn distance_multiplier(&self, distance: f64) -> f64 {
        self.declarations
            .distance
            .iter()
            .rev()
            .find(|b| distance >= b.min_distance)
            .map_or(1.0, |b| b.multiplier)
    }

    fn quality_multiplier(&self, quality: u8) -> f64 {
        let quality = f64::from(quality);
        self.declarations
            .qualities
            .iter()
            .rev()
            .find(|b| quality <= b.max_percent)
            .map_or(0.0, |b| b.multiplier)
    }

    fn weight_multiplier(&self, total_weight: f64) -> f64 {
        self.declarations
            .weights
            .iter()
            .find(|b| total_weight <= b.max_weight)
            .map_or(1.0, |b| b.multiplier)
    }

    fn bonus_percent(&self, packages: usize) -> f64 {
        self.declarations
            .bonus
            .iter()
            .rev()
            .find(|b| packages >= b.min_packages)
            .map_or(0.0, |b| b.percent)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
