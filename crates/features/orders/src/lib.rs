//! Order book feature slice.
//!
//! Holds every pickup order in memory and answers the lookups behind `/info`
//! and the accept/reject replies behind `/quote`.

mod book;
mod error;
mod query;
mod seed;

pub use crate::book::OrderBook;
pub use crate::error::{OrdersError, OrdersErrorExt};
pub use crate::query::OrderQuery;
pub use crate::seed::load_simulation;

use bps_kernel::domain::config::DataConfig;
use bps_kernel::domain::registry::InitializedSlice;

/// Order book feature state.
#[bps_derive::bps_slice]
pub struct Orders {
    pub book: OrderBook,
}

/// Builds the order book, seeding it from `data.simulation` when configured.
///
/// # Errors
/// Returns an error if the seed file cannot be read or parsed.
pub fn init(data: &DataConfig) -> Result<InitializedSlice, OrdersError> {
    let book = OrderBook::new();

    if let Some(path) = &data.simulation {
        let added = book.seed(load_simulation(path)?);
        tracing::info!(path = %path.display(), added, "Order book seeded");
    }

    tracing::info!(orders = book.len(), "Orders slice initialized");
    Ok(InitializedSlice::new(Orders::new(OrdersInner { book })))
}
