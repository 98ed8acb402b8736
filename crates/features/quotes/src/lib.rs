//! Quote feature slice.
//!
//! Loads the pricing declarations once at startup, prices orders, and renders
//! the priced result as an xlsx workbook.

mod error;
mod pricing;
mod sheet;

pub use crate::error::{QuoteError, QuoteErrorExt};
pub use crate::pricing::Pricing;
pub use crate::sheet::{Cell, QuoteSheet, ROW_LABELS};

use bps_kernel::domain::config::{DataConfig, QuoteConfig};
use bps_kernel::domain::declarations::Declarations;
use bps_kernel::domain::registry::InitializedSlice;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Quote feature state.
#[bps_derive::bps_slice]
pub struct Quotes {
    pub pricing: Pricing,
    pub sheet: QuoteSheet,
}

/// Reads the pricing declarations file.
///
/// Every top-level key is required. Packaging entries that name an undeclared
/// package type are kept but logged.
///
/// # Errors
/// Fails when the file is unreadable, malformed, or misses a key.
pub fn load_declarations(path: &Path) -> Result<Declarations, QuoteError> {
    let raw = fs::read(path).context(format!("Reading {}", path.display()))?;
    let declarations: Declarations =
        serde_json::from_slice(&raw).context(format!("Parsing {}", path.display()))?;

    for (battery_type, package_type) in &declarations.battery_packaging {
        if !declarations.package_types.contains(package_type) {
            warn!(%battery_type, %package_type, "Battery packaging names an undeclared package type");
        }
    }

    Ok(declarations)
}

/// Builds the quote slice from the declarations file and quote settings.
///
/// # Errors
/// Returns an error if the declarations cannot be loaded.
pub fn init(data: &DataConfig, quote: &QuoteConfig) -> Result<InitializedSlice, QuoteError> {
    let declarations = load_declarations(&data.declarations)?;

    info!(
        path = %data.declarations.display(),
        battery_types = declarations.battery_base_value.len(),
        minimum_total = quote.minimum_total,
        "Quotes slice initialized"
    );

    Ok(InitializedSlice::new(Quotes::new(QuotesInner {
        pricing: Pricing::new(declarations, quote.minimum_total),
        sheet: QuoteSheet::from_config(quote),
    })))
}
