pub use crate::config::{ConfigError, load_config};
pub use bps_domain::config::ApiConfig;
pub use bps_domain::registry::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateError};
