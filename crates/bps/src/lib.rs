//! Facade crate for the battery pickup service.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates and holds no business logic.
//!
//! ## Usage
//! - Add `bps` with the `server` feature.
//! - Call `bps::init` to build every feature slice, then register them on the
//!   API state.

pub use bps_domain as domain;
use bps_domain::config::ApiConfig;
pub use bps_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use bps_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use bps_orders as orders;
    pub use bps_quotes as quotes;

    /// Feature slices compiled into this build.
    pub const ENABLED: &[&str] = &[
        "orders",
        "quotes",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize every feature slice from `config`.
///
/// Quotes come first so a broken declarations file fails fast before the
/// seed orders are loaded.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Quotes
    slices.push(features::quotes::init(&config.data, &config.quote)?);

    // Orders
    slices.push(features::orders::init(&config.data)?);

    Ok(slices)
}
