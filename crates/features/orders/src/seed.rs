use crate::error::{OrdersError, OrdersErrorExt};
use bps_domain::order::Simulation;
use std::fs;
use std::path::Path;

/// Reads a seed file of the form `{ "orders": [...] }`.
///
/// # Errors
/// Fails when the file is unreadable or not a valid order list.
pub fn load_simulation(path: &Path) -> Result<Simulation, OrdersError> {
    let raw = fs::read(path).context(format!("Reading {}", path.display()))?;
    serde_json::from_slice(&raw).context(format!("Parsing {}", path.display()))
}
