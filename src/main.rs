//! Demo driver: replays the scripted five-step session, then optionally a synthetic
//! order flow.
//!
//! Env: `RUST_LOG` (default `info`), `AEGIS_SEED` (default 42), `AEGIS_ORDERS`
//! (synthetic commands to replay; default 0 = scripted session only).

use aegis_lob::{replay, Engine, Generator, GeneratorConfig, NullEventSink, Order, OrderId, Side};
use log::info;
use rust_decimal::Decimal;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let seed: u64 = env_or("AEGIS_SEED", 42);
    let num_commands: usize = env_or("AEGIS_ORDERS", 0);

    let mut engine = Engine::new();
    info!("scripted session started");

    engine.add_order(Order::new(1, Decimal::new(1005, 1), 10, Side::Sell, 1000))?;
    engine.add_order(Order::new(2, Decimal::new(1010, 1), 5, Side::Sell, 1001))?;
    info!("liquidity added: 10 @ 100.5, 5 @ 101.0");

    info!("passive buy 5 @ 99.0");
    engine.add_order(Order::new(3, Decimal::new(990, 1), 5, Side::Buy, 1002))?;

    info!("aggressive buy 12 @ 102.0");
    let trades = engine.add_order(Order::new(
        4,
        Decimal::new(1020, 1),
        12,
        Side::Buy,
        1003,
    ))?;
    info!("aggressive buy produced {} trades", trades.len());

    info!("cancel order 2");
    engine.cancel_order(OrderId(2));

    info!(
        "scripted session finished best_bid={:?} best_ask={:?} mid={:?}",
        engine.best_bid(),
        engine.best_ask(),
        engine.mid_price()
    );

    if num_commands > 0 {
        let mut engine = Engine::with_sink(NullEventSink);
        let commands = Generator::new(GeneratorConfig {
            seed,
            num_commands,
            ..Default::default()
        })
        .all_commands();
        let summary = replay(&mut engine, commands)?;
        info!(
            "synthetic replay seed={} orders={} cancels={} canceled={}",
            seed, summary.orders, summary.cancels, summary.canceled
        );
        info!(
            "synthetic replay trades={} traded_quantity={} resting={}",
            summary.trades,
            summary.traded_quantity,
            engine.book().len()
        );
    }
    Ok(())
}
