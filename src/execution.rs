//! Trades produced by matching.
//!
//! One [`Trade`] is emitted per resting order touched by an incoming order. The
//! execution price is always the resting (maker) order's price.

use rust_decimal::Decimal;

use crate::types::{OrderId, Quantity, Side};

/// Trade sequence number, unique and increasing within one book.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct TradeId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    /// Incoming order that crossed the spread.
    pub taker_order_id: OrderId,
    /// Resting order that provided liquidity.
    pub maker_order_id: OrderId,
    pub taker_side: Side,
    pub price: Decimal,
    pub quantity: Quantity,
    /// Timestamp of the taker order.
    pub timestamp: u64,
}

impl Trade {
    pub fn buy_order_id(&self) -> OrderId {
        match self.taker_side {
            Side::Buy => self.taker_order_id,
            Side::Sell => self.maker_order_id,
        }
    }

    pub fn sell_order_id(&self) -> OrderId {
        match self.taker_side {
            Side::Buy => self.maker_order_id,
            Side::Sell => self.taker_order_id,
        }
    }

    /// Quantity times price, or `None` if the product does not fit in a `Decimal`.
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}
