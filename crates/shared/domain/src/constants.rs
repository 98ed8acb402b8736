//! Names shared between the HTTP layer and its `OpenAPI` document.

pub const SYSTEM_TAG: &str = "System";
pub const ORDERS_TAG: &str = "Orders";
pub const QUOTES_TAG: &str = "Quotes";

/// Content type of generated quote workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Environment prefix for configuration overrides (`BPS__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "BPS";
