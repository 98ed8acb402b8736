//! Pickup orders and the pieces they are built from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a pickup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Where a pickup happens. Two locations match only when every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Location {
    pub state: String,
    pub city: String,
    pub street_address: String,
    pub zip_code: String,
}

/// Calendar day of a pickup.
///
/// Equality is field-wise; ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PickupDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl PickupDate {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { day, month, year }
    }

    /// The matching calendar date, if this one exists (no February 30th).
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.to_naive().is_some()
    }
}

impl Ord for PickupDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for PickupDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PickupDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// One package of batteries handed over at pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatteryPackage {
    pub battery_type: String,
    pub battery_weight: f64,
    /// Remaining capacity, 0-100 %.
    pub quality: u8,
    #[serde(default)]
    pub return_reason: String,
}

/// A pickup order as held by the order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Order {
    pub order_id: OrderId,
    pub date: PickupDate,
    pub location: Location,
    #[serde(default)]
    pub packages: Vec<BatteryPackage>,
    /// Shipping distance in miles.
    #[serde(default)]
    pub distance: f64,
    /// Whether the customer accepted the quote.
    #[serde(default)]
    pub accepted: bool,
}

impl Order {
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            order_id: self.order_id,
            date: self.date,
            location: self.location.clone(),
            accepted: self.accepted,
        }
    }
}

/// The short form of an order returned by lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub date: PickupDate,
    pub location: Location,
    pub accepted: bool,
}

/// An order as it appears in a seed file, where the id may be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub order_id: Option<OrderId>,
    pub date: PickupDate,
    pub location: Location,
    #[serde(default)]
    pub packages: Vec<BatteryPackage>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub accepted: bool,
}

impl OrderRecord {
    /// Converts into an [`Order`]; `None` when the record has no id.
    #[must_use]
    pub fn into_order(self) -> Option<Order> {
        Some(Order {
            order_id: self.order_id?,
            date: self.date,
            location: self.location,
            packages: self.packages,
            distance: self.distance,
            accepted: self.accepted,
        })
    }
}

/// Contents of a seed file: `{ "orders": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Simulation {
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}
