//! Standalone market demo.
//!
//! Seeds a BTC-USDT book, lets the synthetic order driver run, and
//! logs the BBO and latest trade each time the market signals a
//! change. Ctrl-C stops the driver and exits.

use std::sync::Arc;

use market::Market;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let market = Arc::new(Market::new("BTC-USDT"));
    let mut changes = market.subscribe();
    market.init().await;

    info!(symbol = market.symbol(), "demo running, ctrl-c to stop");

    loop {
        tokio::select! {
            changed = changes.recv() => {
                match changed {
                    Ok(()) => {}
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
                let snap = market.snapshot().await;
                match snap.trades.first() {
                    Some(trade) => info!(
                        best_bid = ?snap.bbo.best_bid,
                        best_ask = ?snap.bbo.best_ask,
                        spread = ?snap.bbo.spread,
                        last_px = trade.px_ticks,
                        last_qty = trade.qty,
                        "book changed"
                    ),
                    None => info!(
                        best_bid = ?snap.bbo.best_bid,
                        best_ask = ?snap.bbo.best_ask,
                        spread = ?snap.bbo.spread,
                        "book changed"
                    ),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    market.teardown();
    info!("demo stopped");
}
