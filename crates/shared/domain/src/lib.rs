//! # Domain Models
//!
//! Plain data shared by every crate of the pickup service: orders and their
//! pickup details, the pricing declarations, computed quotes, and configuration.
//! Keep it lean: `serde` and `chrono` only, no I/O or locking.

pub mod config;
pub mod constants;
pub mod declarations;
pub mod order;
pub mod quote;
pub mod registry;
