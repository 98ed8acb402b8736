use bps_domain::order::{Location, Order, OrderId, PickupDate};

/// How `/info` looks orders up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderQuery {
    /// A single order. The id wins: location and date are never consulted.
    ById(OrderId),
    /// Every pickup at `location`, narrowed to `date` when one is given.
    ByLocation { location: Location, date: Option<PickupDate> },
}

impl OrderQuery {
    #[must_use]
    pub const fn by_location(location: Location, date: Option<PickupDate>) -> Self {
        Self::ByLocation { location, date }
    }

    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::ById(id) => order.order_id == *id,
            Self::ByLocation { location, date } => {
                order.location == *location && date.is_none_or(|d| order.date == d)
            }
        }
    }
}
