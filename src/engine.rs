//! Single-entry engine facade.
//!
//! [`Engine`] wraps an [`OrderBook`], logs every accepted order, trade and cancel,
//! and forwards [`BookEvent`]s to an [`EventSink`]. [`SharedEngine`] puts the whole
//! engine behind one mutex for callers on several threads.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::error::OrderError;
use crate::events::{BookEvent, EventSink, LogEventSink};
use crate::execution::Trade;
use crate::order_book::OrderBook;
use crate::types::{Order, OrderId};

/// Single-instrument matching engine.
///
/// Use [`Engine::add_order`] to submit orders and [`Engine::cancel_order`] to pull
/// resting ones. Every call runs to completion before returning.
pub struct Engine {
    book: OrderBook,
    sink: Box<dyn EventSink>,
}

impl Engine {
    /// Creates an engine that reports events to the log.
    pub fn new() -> Self {
        Self::with_sink(LogEventSink)
    }

    pub fn with_sink(sink: impl EventSink + 'static) -> Self {
        Self {
            book: OrderBook::new(),
            sink: Box::new(sink),
        }
    }

    /// Submits an order: validates, matches, rests any remainder. Returns the trades.
    ///
    /// Returns `Err` (and emits [`BookEvent::Rejected`]) if the order is invalid; the
    /// book is unchanged in that case.
    pub fn add_order(&mut self, order: Order) -> Result<Vec<Trade>, OrderError> {
        info!(
            "order submitted order_id={} side={:?} quantity={} price={} timestamp={}",
            order.id, order.side, order.quantity, order.price, order.timestamp
        );
        let (order_id, side, price) = (order.id, order.side, order.price);
        let trades = match self.book.add_order(order) {
            Ok(trades) => trades,
            Err(err) => {
                warn!("order rejected order_id={} reason={}", order_id, err);
                self.sink.emit(&BookEvent::Rejected {
                    order_id,
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };
        for trade in &trades {
            info!(
                "trade trade_id={} taker_order={} maker_order={} price={} quantity={}",
                trade.trade_id.0,
                trade.taker_order_id,
                trade.maker_order_id,
                trade.price,
                trade.quantity
            );
            self.sink.emit(&BookEvent::Trade(trade.clone()));
        }
        if let Some(resting) = self.book.order(order_id) {
            info!(
                "order rested order_id={} side={:?} price={} quantity={}",
                order_id, side, price, resting.quantity
            );
            self.sink.emit(&BookEvent::Rested {
                order_id,
                side,
                price,
                quantity: resting.quantity,
            });
        }
        Ok(trades)
    }

    /// Cancels a resting order. Unknown ids are ignored; returns the removed order if any.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Option<Order> {
        let Some(canceled) = self.book.cancel_order(order_id) else {
            debug!("cancel ignored order_id={} not resting", order_id);
            return None;
        };
        info!(
            "order canceled order_id={} remaining={}",
            order_id, canceled.quantity
        );
        self.sink.emit(&BookEvent::Canceled {
            order_id,
            side: canceled.side,
            price: canceled.price,
            remaining_quantity: canceled.quantity,
        });
        Some(canceled)
    }

    /// Best bid price, if any.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.book.best_bid()
    }

    /// Best ask price, if any.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.book.best_ask()
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        self.book.mid_price()
    }

    pub fn spread(&self) -> Option<Decimal> {
        self.book.spread()
    }

    /// Read access for depth and order lookups.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("book", &self.book)
            .finish_non_exhaustive()
    }
}

/// Cloneable handle to one engine behind a mutex. Each call holds the lock for its
/// whole duration, so book and index are never observed mid-update.
#[derive(Clone, Debug)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_order(&self, order: Order) -> Result<Vec<Trade>, OrderError> {
        self.lock().add_order(order)
    }

    pub fn cancel_order(&self, order_id: OrderId) -> Option<Order> {
        self.lock().cancel_order(order_id)
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.lock().best_bid()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.lock().best_ask()
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        self.lock().mid_price()
    }

    /// Runs `f` with the engine locked, for multi-step reads.
    pub fn with<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        f(&self.lock())
    }
}
