use bps_domain::order::OrderId;
use std::borrow::Cow;

/// A specialized [`QuoteError`] enum of this crate.
#[bps_derive::bps_error]
pub enum QuoteError {
    /// A package names a battery type without a declared base value.
    #[error("Order {order_id} has no base value for battery type '{battery_type}'{}", format_context(.context))]
    UnknownBatteryType {
        order_id: OrderId,
        battery_type: String,
        context: Option<Cow<'static, str>>,
    },
    /// The declarations file could not be read.
    #[error("Declarations I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
    /// The declarations file is malformed or misses a required key.
    #[error("Declarations format error{}: {source}", format_context(.context))]
    Declarations { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// The quote workbook could not be written.
    #[error("Quote sheet error{}: {source}", format_context(.context))]
    Sheet { source: rust_xlsxwriter::XlsxError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal quote error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
