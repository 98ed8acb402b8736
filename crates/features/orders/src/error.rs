use std::borrow::Cow;

/// A specialized [`OrdersError`] enum of this crate.
#[bps_derive::bps_error]
pub enum OrdersError {
    /// The seed file could not be read.
    #[error("Order seed I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
    /// The seed file is not a valid order list.
    #[error("Order seed format error{}: {source}", format_context(.context))]
    Format { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal orders error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
