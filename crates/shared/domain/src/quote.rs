use serde::{Deserialize, Serialize};

/// Assessed value of one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub battery_type: String,
    pub battery_weight: f64,
    pub quality: u8,
    pub assessed_value: f64,
}

/// A priced order. `total` is already floored and rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    pub total_weight: f64,
    pub total_value: f64,
    pub bonus_percent: f64,
    pub shipping: f64,
    pub total: f64,
}
