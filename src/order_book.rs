//! Single-instrument order book: bids and asks, price-time priority.
//!
//! Each side maps price to a [`PriceLevel`]; best bid is the highest key of `bids`,
//! best ask the lowest key of `asks`. An id index stores the side, price and
//! [`OrderHandle`] of every resting order so cancels and fill removals are O(1)
//! once the level is found.

use crate::error::OrderError;
use crate::execution::Trade;
use crate::matching::match_order;
use crate::price_level::{Fill, OrderHandle, PriceLevel};
use crate::types::{Order, OrderId, Side};
use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Where a resting order lives. Does not own the order.
#[derive(Clone, Copy, Debug)]
struct OrderLocator {
    side: Side,
    price: Decimal,
    handle: OrderHandle,
}

/// Aggregated view of one price level.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LevelSummary {
    pub price: Decimal,
    pub total_volume: u64,
    pub order_count: usize,
}

#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BTreeMap<Decimal, PriceLevel>,
    asks: BTreeMap<Decimal, PriceLevel>,
    index: HashMap<OrderId, OrderLocator>,
    next_trade_id: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            next_trade_id: 1,
            ..Default::default()
        }
    }

    /// Validates and matches `order`, resting any remainder on its own side.
    ///
    /// Returns the trades in execution order. A rejected order leaves the book untouched.
    pub fn add_order(&mut self, order: Order) -> Result<Vec<Trade>, OrderError> {
        self.validate(&order)?;
        let first_trade_id = self.next_trade_id.max(1);
        let trades = match_order(self, order, first_trade_id);
        self.next_trade_id = first_trade_id + trades.len() as u64;
        Ok(trades)
    }

    /// Removes a resting order. Returns it with its remaining quantity, or `None` if
    /// the id is not resting (never existed, already filled or already canceled).
    pub fn cancel_order(&mut self, order_id: OrderId) -> Option<Order> {
        let locator = self.index.remove(&order_id)?;
        let levels = self.side_mut(locator.side);
        let level = levels.get_mut(&locator.price)?;
        let order = level.remove_order(locator.handle)?;
        if level.is_empty() {
            levels.remove(&locator.price);
            debug!(
                "level removed side={:?} price={}",
                locator.side, locator.price
            );
        }
        Some(order)
    }

    fn validate(&self, order: &Order) -> Result<(), OrderError> {
        if order.price <= Decimal::ZERO {
            return Err(OrderError::InvalidPrice {
                order_id: order.id,
                price: order.price,
            });
        }
        if order.quantity == 0 {
            return Err(OrderError::InvalidQuantity { order_id: order.id });
        }
        if self.index.contains_key(&order.id) {
            return Err(OrderError::DuplicateOrderId { order_id: order.id });
        }
        Ok(())
    }

    /// Takes liquidity from the side opposite `incoming`, best level first, FIFO
    /// within a level, while the incoming limit crosses. Decrements `incoming.quantity`.
    pub(crate) fn take_liquidity(&mut self, incoming: &mut Order) -> Vec<Fill> {
        let mut fills = Vec::new();
        while incoming.quantity > 0 {
            let best = match incoming.side {
                Side::Buy => self.asks.first_entry(),
                Side::Sell => self.bids.last_entry(),
            };
            let Some(mut entry) = best else {
                break;
            };
            if !incoming.crosses(*entry.key()) {
                break;
            }
            let level = entry.get_mut();
            while let Some(fill) = level.fill_front(incoming.quantity) {
                incoming.quantity -= fill.quantity;
                if fill.resting_fully_filled {
                    self.index.remove(&fill.resting_order_id);
                }
                fills.push(fill);
            }
            if level.is_empty() {
                let price = *entry.key();
                entry.remove();
                debug!(
                    "level removed side={:?} price={}",
                    incoming.side.opposite(),
                    price
                );
            }
        }
        fills
    }

    /// Appends `order` to the tail of its price level and indexes it.
    pub(crate) fn rest(&mut self, order: Order) {
        let (order_id, side, price) = (order.id, order.side, order.price);
        let levels = self.side_mut(side);
        let level = levels.entry(price).or_insert_with(|| {
            debug!("level created side={:?} price={}", side, price);
            PriceLevel::new(price)
        });
        let handle = level.add_order(order);
        self.index.insert(
            order_id,
            OrderLocator {
                side,
                price,
                handle,
            },
        );
    }

    fn side_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    fn side_ref(&self, side: Side) -> &BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Best bid price (None if empty).
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    /// Best ask price (None if empty).
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Midpoint of best bid and best ask; None unless both sides have orders.
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        // bid < ask at rest, so half the spread added to the bid stays in range.
        Some(bid + (ask - bid) / Decimal::TWO)
    }

    /// Best ask minus best bid; None unless both sides have orders.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Resting order by id, with its current open quantity.
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        let locator = self.index.get(&order_id)?;
        self.side_ref(locator.side)
            .get(&locator.price)?
            .get(locator.handle)
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Number of resting orders on both sides.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn level_count(&self, side: Side) -> usize {
        self.side_ref(side).len()
    }

    pub fn level(&self, side: Side, price: Decimal) -> Option<&PriceLevel> {
        self.side_ref(side).get(&price)
    }

    /// Levels of one side, best price first.
    pub fn levels(&self, side: Side) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match side {
            Side::Buy => Box::new(self.bids.values().rev()),
            Side::Sell => Box::new(self.asks.values()),
        }
    }

    /// Up to `max_levels` aggregated levels of one side, best price first.
    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<LevelSummary> {
        self.levels(side)
            .take(max_levels)
            .map(|level| LevelSummary {
                price: level.price(),
                total_volume: level.total_volume(),
                order_count: level.len(),
            })
            .collect()
    }

    /// Every resting order: bids best-first, then asks best-first, FIFO within a level.
    pub fn resting_orders(&self) -> Vec<Order> {
        self.levels(Side::Buy)
            .chain(self.levels(Side::Sell))
            .flat_map(|level| level.iter().cloned())
            .collect()
    }
}
