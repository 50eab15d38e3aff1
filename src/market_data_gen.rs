//! Synthetic order flow generator.
//!
//! Deterministic, configurable stream of adds and cancels for replay tests, demos
//! and benchmarks. Same config (including seed) ⇒ same stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::engine::Engine;
use crate::error::OrderError;
use crate::types::{Order, OrderId, Quantity, Side};

/// One step of order flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add(Order),
    Cancel(OrderId),
}

/// Configuration for the synthetic generator. All ranges are inclusive; a range
/// given as (max, min) is read as (min, max).
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same stream.
    pub seed: u64,
    /// Number of commands produced by [`Generator::all_commands`].
    pub num_commands: usize,
    /// Probability of a cancel (0.0..=1.0) once at least one order was added.
    pub cancel_ratio: f64,
    /// Probability that an add is a buy (0.0..=1.0).
    pub buy_ratio: f64,
    /// Price range in ticks; the order price is `ticks * tick_size`.
    pub price_min_ticks: i64,
    pub price_max_ticks: i64,
    pub tick_size: Decimal,
    pub quantity_min: Quantity,
    pub quantity_max: Quantity,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_commands: 1000,
            cancel_ratio: 0.2,
            buy_ratio: 0.5,
            price_min_ticks: 990,
            price_max_ticks: 1010,
            tick_size: Decimal::new(1, 1),
            quantity_min: 1,
            quantity_max: 100,
        }
    }
}

/// Deterministic command stream. Cancels target ids that were added earlier; some
/// of them will already be filled by then, which exercises the no-op path.
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    next_order_id: u64,
    next_timestamp: u64,
    submitted: Vec<OrderId>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            rng,
            config,
            next_order_id: 1,
            next_timestamp: 1,
            submitted: Vec::new(),
        }
    }

    pub fn next_command(&mut self) -> Command {
        if !self.submitted.is_empty() && self.rng.gen::<f64>() < self.config.cancel_ratio {
            let i = self.rng.gen_range(0..self.submitted.len());
            return Command::Cancel(self.submitted.swap_remove(i));
        }
        Command::Add(self.next_order())
    }

    /// Generates the next limit order. Advances order id, timestamp and RNG.
    pub fn next_order(&mut self) -> Order {
        let id = self.next_order_id;
        self.next_order_id += 1;
        let timestamp = self.next_timestamp;
        self.next_timestamp += 1;
        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let (lo, hi) = ordered(self.config.price_min_ticks, self.config.price_max_ticks);
        let ticks = self.rng.gen_range(lo..=hi).max(1);
        let (lo, hi) = ordered(self.config.quantity_min.max(1), self.config.quantity_max.max(1));
        let quantity = self.rng.gen_range(lo..=hi);
        self.submitted.push(OrderId(id));
        Order::new(
            id,
            Decimal::from(ticks) * self.config.tick_size,
            quantity,
            side,
            timestamp,
        )
    }

    pub fn take_commands(&mut self, n: usize) -> Vec<Command> {
        (0..n).map(|_| self.next_command()).collect()
    }

    /// The full stream as defined by `config.num_commands`.
    pub fn all_commands(&mut self) -> Vec<Command> {
        self.take_commands(self.config.num_commands)
    }
}

/// Range bounds in ascending order, so a config with min and max swapped still works.
fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Totals from one [`replay`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub orders: usize,
    pub cancels: usize,
    /// Cancels that found a resting order.
    pub canceled: usize,
    pub trades: usize,
    pub traded_quantity: u64,
}

/// Feeds `commands` into `engine` in order. Stops at the first rejected order.
pub fn replay(
    engine: &mut Engine,
    commands: impl IntoIterator<Item = Command>,
) -> Result<ReplaySummary, OrderError> {
    let mut summary = ReplaySummary::default();
    for command in commands {
        match command {
            Command::Add(order) => {
                let trades = engine.add_order(order)?;
                summary.orders += 1;
                summary.trades += trades.len();
                summary.traded_quantity +=
                    trades.iter().map(|t| u64::from(t.quantity)).sum::<u64>();
            }
            Command::Cancel(order_id) => {
                summary.cancels += 1;
                if engine.cancel_order(order_id).is_some() {
                    summary.canceled += 1;
                }
            }
        }
    }
    Ok(summary)
}
