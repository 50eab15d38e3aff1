//! # Aegis LOB
//!
//! Deterministic single-instrument limit order book: price-time priority matching,
//! trades executed at the resting price, and O(1) cancel by order id.
//!
//! ## Entry point
//!
//! Use [`Engine`]: create with [`Engine::new`] (events go to the log) or
//! [`Engine::with_sink`], then [`Engine::add_order`] and [`Engine::cancel_order`].
//! Query with [`Engine::best_bid`], [`Engine::best_ask`] and [`Engine::mid_price`].
//!
//! ## Example
//!
//! ```rust
//! use aegis_lob::{Engine, NullEventSink, Order, OrderId, Side};
//! use rust_decimal::Decimal;
//!
//! let mut engine = Engine::with_sink(NullEventSink);
//! engine.add_order(Order::new(1, Decimal::new(1005, 1), 10, Side::Sell, 1000)).unwrap();
//! let trades = engine.add_order(Order::new(2, Decimal::from(101), 4, Side::Buy, 1001)).unwrap();
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].price, Decimal::new(1005, 1));
//! assert_eq!(engine.book().order(OrderId(1)).map(|o| o.quantity), Some(6));
//! assert!(engine.best_bid().is_none());
//! ```
//!
//! ## Lower-level API
//!
//! [`OrderBook`] offers the same operations without logging or event sinks.

pub mod engine;
pub mod error;
pub mod events;
pub mod execution;
pub mod market_data_gen;
mod matching;
pub mod order_book;
pub mod price_level;
pub mod types;

pub use engine::{Engine, SharedEngine};
pub use error::OrderError;
pub use events::{BookEvent, EventSink, InMemoryEventSink, LogEventSink, NullEventSink};
pub use execution::{Trade, TradeId};
pub use market_data_gen::{replay, Command, Generator, GeneratorConfig, ReplaySummary};
pub use order_book::{LevelSummary, OrderBook};
pub use price_level::{Fill, OrderHandle, PriceLevel};
pub use types::{Order, OrderId, Quantity, Side};
