//! Plumbing shared by the service crates.
//! Keep this crate thin: configuration loading, the API state with its slice
//! registry, and system routes such as `/health`.
//!
//! ## Config loading
//! ```rust,ignore
//! use bps_kernel::config::load_config;
//! use bps_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server"))?;
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use bps_domain as domain;
pub use crate::config::{ConfigError, load_config};
pub use bps_domain::config::ApiConfig;
pub use bps_domain::registry::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateError};
