//! Order book benchmarks (Criterion).
//!
//! Run: `cargo bench` or `cargo bench --bench engine`.

use aegis_lob::{Generator, GeneratorConfig, Order, OrderBook, OrderId, Side};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rust_decimal::Decimal;

fn add_only_config(seed: u64, n: usize) -> GeneratorConfig {
    GeneratorConfig {
        seed,
        num_commands: n,
        cancel_ratio: 0.0,
        ..Default::default()
    }
}

fn orders(config: GeneratorConfig) -> Vec<Order> {
    let n = config.num_commands;
    let mut gen = Generator::new(config);
    (0..n).map(|_| gen.next_order()).collect()
}

fn bench_add_order_throughput(c: &mut Criterion) {
    const N: usize = 1000;
    let mut group = c.benchmark_group("book");
    group.throughput(Throughput::Elements(N as u64));
    group.bench_function("add_order_1000_mixed", |b| {
        b.iter_batched(
            || (OrderBook::new(), orders(add_only_config(42, N))),
            |(mut book, orders)| {
                for order in orders {
                    let _ = book.add_order(order).unwrap();
                }
                book
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    const LEVELS: u64 = 100;
    const PER_LEVEL: u64 = 10;
    let mut group = c.benchmark_group("book");
    group.throughput(Throughput::Elements(LEVELS * PER_LEVEL));
    group.bench_function("sweep_100_levels_x_10", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::new();
                let mut id = 1;
                for level in 0..LEVELS {
                    for _ in 0..PER_LEVEL {
                        let price = Decimal::from(1000 + level);
                        book.add_order(Order::new(id, price, 1, Side::Sell, id)).unwrap();
                        id += 1;
                    }
                }
                let taker = Order::new(
                    id,
                    Decimal::from(1000 + LEVELS),
                    (LEVELS * PER_LEVEL) as u32,
                    Side::Buy,
                    id,
                );
                (book, taker)
            },
            |(mut book, taker)| {
                let trades = book.add_order(taker).unwrap();
                assert_eq!(trades.len() as u64, LEVELS * PER_LEVEL);
                book
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_cancel_order(c: &mut Criterion) {
    const RESTING: usize = 5000;
    const CANCELS_PER_ITER: usize = 1000;
    let mut group = c.benchmark_group("book");
    group.throughput(Throughput::Elements(CANCELS_PER_ITER as u64));
    group.bench_function("cancel_1000_after_5000_resting", |b| {
        b.iter_batched(
            || {
                // Disjoint price bands so nothing crosses and every order rests.
                let mut book = OrderBook::new();
                for i in 0..RESTING as u64 {
                    let id = i + 1;
                    let (side, price) = if i % 2 == 0 {
                        (Side::Buy, Decimal::from(900 + i % 50))
                    } else {
                        (Side::Sell, Decimal::from(1000 + i % 50))
                    };
                    book.add_order(Order::new(id, price, 10, side, id)).unwrap();
                }
                let ids: Vec<OrderId> = (0..CANCELS_PER_ITER as u64)
                    .map(|i| OrderId(i * 5 % RESTING as u64 + 1))
                    .collect();
                (book, ids)
            },
            |(mut book, ids)| {
                for id in ids {
                    book.cancel_order(id);
                }
                book
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_add_order_throughput, bench_sweep, bench_cancel_order);
criterion_main!(benches);
