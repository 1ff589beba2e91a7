//! Single-writer matching engine for one instrument.
//!
//! Matching rules:
//! - Walks the opposing side in strict book priority: best price
//!   first, earliest arrival within a price.
//! - Trades execute at the maker's resting price, never the taker's.
//! - Limit remainders rest; market and IOC remainders are discarded;
//!   FOK either fully fills or leaves the book and ledger untouched.
//!
//! Matching is pure in-memory computation and completes synchronously
//! relative to the caller.

use serde::Serialize;
use thiserror::Error;

use crate::book::OrderBook;
use crate::depth::{self, DepthSnapshot};
use crate::ledger::TradeLedger;
use crate::types::{Order, OrderKind, OrderType, RestingOrder, Side, Trade, TradeId};

/// Input validation failures, rejected before any state mutation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("order quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),
    #[error("{0} order requires a limit price")]
    MissingLimitPrice(OrderType),
}

/// What became of a submitted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Fully executed against resting liquidity.
    Filled,
    /// Limit remainder now rests in the book.
    Rested,
    /// Market/IOC remainder discarded after the walk.
    Expired,
    /// FOK that could not fully fill; a no-op, not an error.
    Killed,
}

/// Result of one `submit` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Execution {
    pub outcome: Outcome,
    /// Quantity left unexecuted at the end of the call. Zero when
    /// filled, the full request when killed.
    pub residual: i64,
    /// Fills in execution order, also recorded in the ledger.
    pub trades: Vec<Trade>,
}

/// Owns the book and the trade ledger; the exclusive writer for its
/// instrument.
pub struct Engine {
    symbol: String,
    book: OrderBook,
    ledger: TradeLedger,
    next_trade_id: u64,
}

impl Engine {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            book: OrderBook::new(),
            ledger: TradeLedger::new(),
            next_trade_id: 1,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// Depth snapshot of up to `max_levels` per side, with BBO.
    pub fn depth(&self, max_levels: usize) -> DepthSnapshot {
        depth::snapshot(&self.book, max_levels)
    }

    /// Matches an incoming order against the book.
    ///
    /// Validation failures reject the order before any mutation. A FOK
    /// that cannot fully fill returns `Outcome::Killed` with the book
    /// and ledger unchanged.
    pub fn submit(&mut self, order: Order) -> Result<Execution, SubmitError> {
        if order.qty <= 0 {
            return Err(SubmitError::NonPositiveQuantity(order.qty));
        }

        if let OrderKind::Fok { px_ticks } = order.kind {
            if !self.fok_fillable(order.side, px_ticks, order.qty) {
                return Ok(Execution {
                    outcome: Outcome::Killed,
                    residual: order.qty,
                    trades: Vec::new(),
                });
            }
        }

        let limit_px = order.kind.limit_px();
        let mut residual = order.qty;
        let mut trades = Vec::new();

        while residual > 0 {
            let opposing = self.book.side_mut(order.side.opposite());
            let Some(best_px) = opposing.best_price() else {
                break;
            };

            let crosses = match (order.side, limit_px) {
                (_, None) => true,
                (Side::Buy, Some(px)) => px >= best_px,
                (Side::Sell, Some(px)) => px <= best_px,
            };
            if !crosses {
                break;
            }

            let mut maker = match opposing.pop_best() {
                Some(o) => o,
                None => break,
            };

            let fill = residual.min(maker.remaining());
            residual -= fill;
            maker.filled += fill;

            let trade = Trade {
                id: TradeId(self.next_trade_id),
                symbol: self.symbol.clone(),
                px_ticks: maker.px_ticks, // trade at maker's price
                qty: fill,
                aggressor: order.side,
                maker: maker.id,
                taker: order.id,
                ts_ns: order.ts_ns,
            };
            self.next_trade_id += 1;
            self.ledger.record(trade.clone());
            trades.push(trade);

            // Partially filled maker keeps its place at the head of
            // the level; fully filled makers stay removed.
            if maker.remaining() > 0 {
                self.book.side_mut(order.side.opposite()).push_front(maker);
            }
        }

        let outcome = if residual == 0 {
            Outcome::Filled
        } else if let OrderKind::Limit { px_ticks } = order.kind {
            self.book.insert(
                order.side,
                RestingOrder {
                    id: order.id,
                    px_ticks,
                    qty: order.qty,
                    filled: order.qty - residual,
                    ts_ns: order.ts_ns,
                },
            );
            Outcome::Rested
        } else {
            // Market/IOC remainders expire; a FOK cannot reach here
            // after passing the pre-check.
            debug_assert!(!matches!(order.kind, OrderKind::Fok { .. }));
            Outcome::Expired
        };

        debug_assert!(
            match (self.book.best_bid(), self.book.best_ask()) {
                (Some(bid), Some(ask)) => bid < ask,
                _ => true,
            },
            "resting book must never be crossed"
        );

        Ok(Execution {
            outcome,
            residual,
            trades,
        })
    }

    /// Dry run for FOK: can the full quantity be accumulated from the
    /// opposing side before the price constraint breaks?
    fn fok_fillable(&self, side: Side, px_ticks: i64, qty: i64) -> bool {
        let mut needed = qty;
        for maker in self.book.side(side.opposite()).iter_best_first() {
            let crosses = match side {
                Side::Buy => px_ticks >= maker.px_ticks,
                Side::Sell => px_ticks <= maker.px_ticks,
            };
            if !crosses {
                break;
            }
            needed -= maker.remaining();
            if needed <= 0 {
                return true;
            }
        }
        false
    }
}
