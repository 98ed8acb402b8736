use crate::query::OrderQuery;
use bps_domain::order::{Order, OrderId, Simulation};
use bps_domain::quote::Quote;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug)]
struct Entry {
    order: Order,
    /// At most one quote per order; computed on first request.
    quote: Option<Arc<Quote>>,
}

/// In-memory order book, safe to share between request handlers.
///
/// Orders are keyed by id and iterated in ascending id order.
#[derive(Debug, Default)]
pub struct OrderBook {
    entries: RwLock<BTreeMap<OrderId, Entry>>,
}

impl OrderBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `order` unless its id is taken. Returns whether it was inserted.
    pub fn add_order(&self, order: Order) -> bool {
        let id = order.order_id;
        let mut entries = self.entries.write();
        if entries.contains_key(&id) {
            warn!(order_id = %id, "Order already exists, skipping");
            return false;
        }

        debug!(order_id = %id, "Adding order");
        entries.insert(id, Entry { order, quote: None });
        true
    }

    /// Fills the book from seed data. Returns how many orders were added.
    pub fn seed(&self, simulation: Simulation) -> usize {
        warn!(records = simulation.orders.len(), "Loading simulated order data");

        let mut added = 0;
        for record in simulation.orders {
            match record.into_order() {
                Some(order) => added += usize::from(self.add_order(order)),
                None => warn!("Seed order without an id, skipping"),
            }
        }
        added
    }

    /// Orders matching `query`, in ascending id order.
    #[must_use]
    pub fn find(&self, query: &OrderQuery) -> Vec<Order> {
        let entries = self.entries.read();
        match query {
            OrderQuery::ById(id) => entries.get(id).map(|e| e.order.clone()).into_iter().collect(),
            OrderQuery::ByLocation { .. } => entries
                .values()
                .filter(|e| query.matches(&e.order))
                .map(|e| e.order.clone())
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<Order> {
        self.entries.read().get(&id).map(|e| e.order.clone())
    }

    /// Records the customer's answer to a quote. Unknown ids are ignored and yield `false`.
    pub fn reply(&self, id: OrderId, accepted: bool) -> bool {
        let mut entries = self.entries.write();
        let Some(entry) = entries.get_mut(&id) else {
            debug!(order_id = %id, "Quote reply for unknown order ignored");
            return false;
        };

        entry.order.accepted = accepted;
        debug!(order_id = %id, accepted, "Quote reply recorded");
        true
    }

    /// The quote for order `id`, pricing it with `price` on first use.
    ///
    /// Returns `Ok(None)` for unknown ids. A failed pricing attempt is not cached.
    ///
    /// # Errors
    /// Propagates the error returned by `price`.
    pub fn quote<F, E>(&self, id: OrderId, price: F) -> Result<Option<Arc<Quote>>, E>
    where
        F: FnOnce(&Order) -> Result<Quote, E>,
    {
        if let Some(entry) = self.entries.read().get(&id) {
            if let Some(quote) = &entry.quote {
                return Ok(Some(Arc::clone(quote)));
            }
        } else {
            return Ok(None);
        }

        let mut entries = self.entries.write();
        let Some(entry) = entries.get_mut(&id) else {
            return Ok(None);
        };
        // Another request may have priced it between the two locks.
        if let Some(quote) = &entry.quote {
            return Ok(Some(Arc::clone(quote)));
        }

        let quote = Arc::new(price(&entry.order)?);
        entry.quote = Some(Arc::clone(&quote));
        debug!(order_id = %id, total = quote.total, "Quote cached");
        Ok(Some(quote))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bps_domain::order::{Location, PickupDate};

    fn order(id: u64) -> Order {
        Order {
            order_id: OrderId(id),
            date: PickupDate::new(2023, 9, 20),
            location: Location {
                state: "Virginia".to_owned(),
                city: "Virginia Beach".to_owned(),
                street_address: "123 Example Street".to_owned(),
                zip_code: "12345".to_owned(),
            },
            packages: Vec::new(),
            distance: 10.0,
            accepted: false,
        }
    }

    fn flat_quote(total: f64) -> Quote {
        Quote {
            lines: Vec::new(),
            total_weight: 0.0,
            total_value: 0.0,
            bonus_percent: 0.0,
            shipping: 0.0,
            total,
        }
    }

    #[test]
    fn duplicate_ids_keep_the_first_order() {
        let book = OrderBook::new();
        assert!(book.add_order(order(1)));

        let mut replacement = order(1);
        replacement.distance = 999.0;
        assert!(!book.add_order(replacement));

        assert_eq!(book.len(), 1);
        assert_eq!(book.get(OrderId(1)).map(|o| o.distance), Some(10.0));
    }

    #[test]
    fn quote_is_priced_once() {
        let book = OrderBook::new();
        book.add_order(order(7));

        let mut calls = 0;
        let first = book
            .quote(OrderId(7), |_| {
                calls += 1;
                Ok::<_, ()>(flat_quote(150.0))
            })
            .expect("pricing succeeds")
            .expect("order exists");
        let second = book
            .quote(OrderId(7), |_| Ok::<_, ()>(flat_quote(1.0)))
            .expect("pricing succeeds")
            .expect("order exists");

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_pricing_is_not_cached() {
        let book = OrderBook::new();
        book.add_order(order(3));

        assert_eq!(book.quote(OrderId(3), |_| Err("no base value")), Err("no base value"));
        let quote = book.quote(OrderId(3), |_| Ok::<_, &str>(flat_quote(120.0)));
        assert_eq!(quote.ok().flatten().map(|q| q.total), Some(120.0));
    }

    #[test]
    fn unknown_orders_have_no_quote() {
        let book = OrderBook::new();
        let quote = book.quote(OrderId(5), |_| -> Result<Quote, ()> {
            unreachable!("unknown orders are never priced")
        });
        assert_eq!(quote, Ok(None));
    }
}
