//! Synthetic order flow keeping a standalone market lively.
//!
//! Peripheral by design: it feeds the same `submit` path as any
//! external caller and can be replaced by a real feed without touching
//! the matching core.

use std::sync::Arc;
use std::time::Duration;

use matchbook::{OrderType, Side};
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::warn;

use crate::{Market, OrderRequest, SEED_MID_TICKS};

pub(crate) const DEFAULT_PERIOD: Duration = Duration::from_secs(2);

/// Price jitter around the midpoint, in ticks.
const PX_JITTER_TICKS: i64 = 250;
/// Fallback spread when one side of the book is empty.
const FALLBACK_SPREAD_TICKS: i64 = 100;

/// Spawns the driver task: every period, submit one random limit order
/// around the current BBO midpoint.
pub(crate) fn spawn(market: Arc<Market>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // interval fires immediately; wait a full period before the
        // first synthetic order
        ticker.tick().await;
        loop {
            ticker.tick().await;

            let bbo = market.snapshot().await.bbo;
            let request = {
                let mut rng = rand::thread_rng();
                let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
                let mid = bbo.best_bid.unwrap_or(SEED_MID_TICKS)
                    + bbo.spread.unwrap_or(FALLBACK_SPREAD_TICKS) / 2;
                OrderRequest {
                    side,
                    order_type: OrderType::Limit,
                    qty: rng.gen_range(1..=50),
                    px_ticks: Some(mid + rng.gen_range(-PX_JITTER_TICKS..=PX_JITTER_TICKS)),
                }
            };

            if let Err(err) = market.submit(request).await {
                warn!(%err, "synthetic order rejected");
            }
        }
    })
}
