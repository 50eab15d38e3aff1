//! Book events and the sinks that receive them.
//!
//! The [`crate::Engine`] emits one [`BookEvent`] per trade, per order that comes to
//! rest, per confirmed cancel and per rejected submission. Sinks decide where they
//! go: the log (one JSON line each), an in-memory buffer, or nowhere.

use std::sync::{Arc, Mutex, PoisonError};

use log::info;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::execution::Trade;
use crate::types::{OrderId, Quantity, Side};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BookEvent {
    Trade(Trade),
    /// Remaining quantity of an incoming order was added to the book.
    Rested {
        order_id: OrderId,
        side: Side,
        price: Decimal,
        quantity: Quantity,
    },
    /// A resting order was removed by cancel.
    Canceled {
        order_id: OrderId,
        side: Side,
        price: Decimal,
        remaining_quantity: Quantity,
    },
    Rejected {
        order_id: OrderId,
        reason: String,
    },
}

/// Receiver for book events. Implementations must not call back into the engine.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &BookEvent);
}

/// Writes one JSON line per event through the `log` facade at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: &BookEvent) {
        if let Ok(line) = serde_json::to_string(event) {
            info!(target: "aegis_lob::events", "{}", line);
        }
    }
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: &BookEvent) {}
}

/// Stores events in memory. Clone shares the same backing buffer.
#[derive(Clone, Debug, Default)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<Vec<BookEvent>>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BookEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns and clears the buffered events.
    pub fn take(&self) -> Vec<BookEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn trades(&self) -> Vec<Trade> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BookEvent::Trade(trade) => Some(trade),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn emit(&self, event: &BookEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::TradeId;

    #[test]
    fn in_memory_sink_shares_buffer_between_clones() {
        let sink = InMemoryEventSink::new();
        let other = sink.clone();
        other.emit(&BookEvent::Rejected {
            order_id: OrderId(1),
            reason: "bad".into(),
        });
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.take().len(), 1);
        assert!(other.events().is_empty());
    }

    #[test]
    fn events_serialize_with_tag() {
        let event = BookEvent::Canceled {
            order_id: OrderId(2),
            side: Side::Sell,
            price: Decimal::new(1010, 1),
            remaining_quantity: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "canceled");
        assert_eq!(json["order_id"], 2);
        assert_eq!(json["price"], "101.0");

        let trade = BookEvent::Trade(Trade {
            trade_id: TradeId(1),
            taker_order_id: OrderId(4),
            maker_order_id: OrderId(1),
            taker_side: Side::Buy,
            price: Decimal::new(1005, 1),
            quantity: 10,
            timestamp: 1003,
        });
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["event"], "trade");
        assert_eq!(json["maker_order_id"], 1);
        assert_eq!(json["taker_side"], "Buy");
    }

    #[test]
    fn trades_filters_other_events() {
        let sink = InMemoryEventSink::new();
        sink.emit(&BookEvent::Rested {
            order_id: OrderId(1),
            side: Side::Buy,
            price: Decimal::from(99),
            quantity: 5,
        });
        assert!(sink.trades().is_empty());
        NullEventSink.emit(&BookEvent::Rejected {
            order_id: OrderId(9),
            reason: String::new(),
        });
    }
}
