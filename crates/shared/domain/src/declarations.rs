//! Pricing tables loaded from the declarations file.
//!
//! Bracket lists are applied in the order they are declared; see the quotes
//! crate for how each list is walked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every key is required; a missing one fails deserialization by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarations {
    pub qualities: Vec<QualityBracket>,
    /// Packaging materials, e.g. soft or hard cases.
    pub package_types: Vec<String>,
    /// Battery type to packaging material.
    pub battery_packaging: BTreeMap<String, String>,
    pub weights: Vec<WeightBracket>,
    /// Value of one package of each battery type at multiplier 1.
    pub battery_base_value: BTreeMap<String, f64>,
    pub distance: Vec<DistanceBracket>,
    pub bonus: Vec<BonusBracket>,
}

/// Applies to packages whose quality is at most `max_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityBracket {
    pub max_percent: f64,
    pub multiplier: f64,
}

/// Applies to orders whose total weight is at most `max_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBracket {
    pub max_weight: f64,
    pub multiplier: f64,
}

/// Applies to orders shipped at least `min_distance` miles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBracket {
    pub min_distance: f64,
    pub multiplier: f64,
}

/// Applies to orders with at least `min_packages` packages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusBracket {
    pub min_packages: usize,
    pub percent: f64,
}
