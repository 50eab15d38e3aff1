//! Price-time priority matching.
//!
//! [`match_order`] runs one validated order against the book: it crosses into the
//! opposite side best level first, FIFO within a level, executing at the resting
//! price, and rests whatever quantity is left on the order's own side.

use crate::execution::{Trade, TradeId};
use crate::order_book::OrderBook;
use crate::types::Order;

/// Matches `order` and rests the remainder. Trades are numbered from `next_trade_id`.
///
/// The caller validates the order first (see [`OrderBook::add_order`]).
pub(crate) fn match_order(
    book: &mut OrderBook,
    mut order: Order,
    next_trade_id: u64,
) -> Vec<Trade> {
    let fills = book.take_liquidity(&mut order);

    let trades: Vec<Trade> = fills
        .into_iter()
        .zip(next_trade_id..)
        .map(|(fill, trade_id)| Trade {
            trade_id: TradeId(trade_id),
            taker_order_id: order.id,
            maker_order_id: fill.resting_order_id,
            taker_side: order.side,
            price: fill.price,
            quantity: fill.quantity,
            timestamp: order.timestamp,
        })
        .collect();

    if order.quantity > 0 {
        book.rest(order);
    }
    trades
}
