//! Stateful single-instrument market built on the `matchbook` engine.
//!
//! The engine lives behind an async `RwLock`, making the exclusive
//! single-writer discipline explicit: one `submit` runs to completion
//! before the next begins. Observers subscribe to a zero-payload
//! broadcast signal fired once per completed mutation and pull a fresh
//! `snapshot()` when it arrives; delivery never blocks matching.

mod sim;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use matchbook::{
    Bbo, BookLevel, Engine, Order, OrderId, OrderKind, OrderType, Outcome, Side, SubmitError,
    Trade, DEPTH_LEVELS,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Midpoint the seeded book is built around (60000.00 in 0.01 ticks).
pub const SEED_MID_TICKS: i64 = 6_000_000;
/// Price levels seeded per side.
const SEED_LEVELS: i64 = 15;
/// Tick distance between seeded levels (0.50).
const SEED_STEP_TICKS: i64 = 50;
/// Buffered change signals before slow subscribers start lagging.
const NOTIFY_CAPACITY: usize = 1000;

/// Order parameters as supplied by an external caller, price still
/// optional and unvalidated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub order_type: OrderType,
    /// Quantity in integer lots.
    pub qty: i64,
    /// Limit price in ticks; required for limit/FOK, optional for IOC,
    /// ignored for market.
    pub px_ticks: Option<i64>,
}

/// Outcome of an accepted submission.
#[derive(Clone, Debug, Serialize)]
pub struct SubmitReceipt {
    pub order_id: OrderId,
    pub outcome: Outcome,
    pub residual: i64,
    pub trades: Vec<Trade>,
}

/// Full published view of the market after the most recent completed
/// mutation.
#[derive(Clone, Debug, Serialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    pub bbo: Bbo,
    /// Recent trades, newest first.
    pub trades: Vec<Trade>,
}

/// A single-instrument market: matching engine, trade history, change
/// notification, and an optional synthetic order driver.
pub struct Market {
    symbol: String,
    engine: RwLock<Engine>,
    changed: broadcast::Sender<()>,
    driver: Mutex<Option<JoinHandle<()>>>,
    initialized: AtomicBool,
    sim_period: Duration,
}

impl Market {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_sim_period(symbol, sim::DEFAULT_PERIOD)
    }

    pub fn with_sim_period(symbol: impl Into<String>, sim_period: Duration) -> Self {
        let symbol = symbol.into();
        let (changed, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            engine: RwLock::new(Engine::new(symbol.clone())),
            symbol,
            changed,
            driver: Mutex::new(None),
            initialized: AtomicBool::new(false),
            sim_period,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Registers an observer of the change signal. Constant-time; does
    /// not touch the engine lock.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    /// Validates and matches an order, then fires one change signal if
    /// the call mutated the book or the ledger. A killed FOK mutates
    /// nothing and stays silent.
    pub async fn submit(&self, request: OrderRequest) -> Result<SubmitReceipt, SubmitError> {
        let kind = order_kind(&request)?;
        let order = Order {
            id: OrderId(Uuid::new_v4().as_u128()),
            symbol: self.symbol.clone(),
            side: request.side,
            kind,
            qty: request.qty,
            ts_ns: now_ns(),
        };
        let order_id = order.id;

        let execution = {
            let mut engine = self.engine.write().await;
            engine.submit(order)?
        };

        debug!(
            order_id = order_id.0,
            outcome = ?execution.outcome,
            fills = execution.trades.len(),
            residual = execution.residual,
            "order processed"
        );

        if execution.outcome != Outcome::Killed {
            // Fire-and-forget; no receivers is fine.
            let _ = self.changed.send(());
        }

        Ok(SubmitReceipt {
            order_id,
            outcome: execution.outcome,
            residual: execution.residual,
            trades: execution.trades,
        })
    }

    /// View of the market as of the most recent completed mutation.
    pub async fn snapshot(&self) -> MarketSnapshot {
        let engine = self.engine.read().await;
        let depth = engine.depth(DEPTH_LEVELS);
        MarketSnapshot {
            symbol: self.symbol.clone(),
            bids: depth.bids,
            asks: depth.asks,
            bbo: depth.bbo,
            trades: engine.ledger().iter().cloned().collect(),
        }
    }

    /// Seeds a two-sided book around [`SEED_MID_TICKS`] and starts the
    /// synthetic order driver. Idempotent: later calls are no-ops.
    pub async fn init(self: &Arc<Self>) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }

        self.seed_book().await;
        let _ = self.changed.send(());

        let handle = sim::spawn(Arc::clone(self), self.sim_period);
        *self.driver.lock().unwrap() = Some(handle);

        info!(symbol = %self.symbol, "market initialized");
    }

    /// Stops the synthetic order driver. Safe to call repeatedly; book
    /// and trade history are retained.
    pub fn teardown(&self) {
        if let Some(handle) = self.driver.lock().unwrap().take() {
            handle.abort();
            info!(symbol = %self.symbol, "simulation driver stopped");
        }
    }

    async fn seed_book(&self) {
        let mut engine = self.engine.write().await;
        let ts = now_ns();
        let mut rng = rand::thread_rng();

        for i in 1..=SEED_LEVELS {
            let qty: i64 = rng.gen_range(10..=500);
            for (side, px) in [
                (Side::Buy, SEED_MID_TICKS - i * SEED_STEP_TICKS),
                (Side::Sell, SEED_MID_TICKS + i * SEED_STEP_TICKS),
            ] {
                // Seed orders are well-formed and never cross; they
                // all rest.
                let _ = engine.submit(Order {
                    id: OrderId(Uuid::new_v4().as_u128()),
                    symbol: self.symbol.clone(),
                    side,
                    kind: OrderKind::Limit { px_ticks: px },
                    qty,
                    ts_ns: ts,
                });
            }
        }
    }
}

impl Drop for Market {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn order_kind(request: &OrderRequest) -> Result<OrderKind, SubmitError> {
    match request.order_type {
        OrderType::Limit => request
            .px_ticks
            .map(|px_ticks| OrderKind::Limit { px_ticks })
            .ok_or(SubmitError::MissingLimitPrice(OrderType::Limit)),
        // Any price supplied with a market order is ignored.
        OrderType::Market => Ok(OrderKind::Market),
        OrderType::Ioc => Ok(OrderKind::Ioc {
            px_ticks: request.px_ticks,
        }),
        OrderType::Fok => request
            .px_ticks
            .map(|px_ticks| OrderKind::Fok { px_ticks })
            .ok_or(SubmitError::MissingLimitPrice(OrderType::Fok)),
    }
}

fn now_ns() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}
