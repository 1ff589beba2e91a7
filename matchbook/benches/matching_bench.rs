use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matchbook::{Engine, Order, OrderId, OrderKind, Side, DEPTH_LEVELS};

fn limit(id: u128, side: Side, px: i64, qty: i64, ts: u128) -> Order {
    Order {
        id: OrderId(id),
        symbol: "BTC-USDT".to_string(),
        side,
        kind: OrderKind::Limit { px_ticks: px },
        qty,
        ts_ns: ts,
    }
}

fn bench_order_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_submission");

    for &num_orders in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("non_crossing_orders", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter(|| {
                    let mut engine = Engine::new("BTC-USDT");
                    for i in 0..num_orders {
                        let order = limit(
                            i as u128,
                            if i % 2 == 0 { Side::Buy } else { Side::Sell },
                            if i % 2 == 0 {
                                10_000 - i as i64
                            } else {
                                10_100 + i as i64
                            },
                            100,
                            i as u128,
                        );
                        black_box(engine.submit(order).unwrap());
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_crossing_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossing_walk");

    for &depth in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("market_sweep", depth),
            &depth,
            |b, &depth| {
                b.iter_batched(
                    || {
                        let mut engine = Engine::new("BTC-USDT");
                        for i in 0..depth {
                            engine
                                .submit(limit(
                                    i as u128,
                                    Side::Sell,
                                    10_000 + i as i64,
                                    100,
                                    i as u128,
                                ))
                                .unwrap();
                        }
                        engine
                    },
                    |mut engine| {
                        let sweep = Order {
                            id: OrderId(depth as u128 + 1),
                            symbol: "BTC-USDT".to_string(),
                            side: Side::Buy,
                            kind: OrderKind::Market,
                            qty: (depth * 50) as i64,
                            ts_ns: depth as u128 + 1,
                        };
                        black_box(engine.submit(sweep).unwrap())
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_depth_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_data");

    let mut engine = Engine::new("BTC-USDT");
    for i in 0..1000 {
        engine
            .submit(limit(i, Side::Sell, 10_100 + i as i64, 100, i))
            .unwrap();
        engine
            .submit(limit(i + 1000, Side::Buy, 9_999 - i as i64, 100, i + 1000))
            .unwrap();
    }

    group.bench_function("depth_top15", |b| {
        b.iter(|| black_box(engine.depth(DEPTH_LEVELS)))
    });

    group.bench_function("bbo", |b| {
        b.iter(|| black_box((engine.book().best_bid(), engine.book().best_ask())))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_order_submission,
    bench_crossing_walk,
    bench_depth_snapshot
);

criterion_main!(benches);
