//! Aggregated book depth and best-bid/offer, recomputed in full from
//! the order book after every mutation. Nothing here holds state of
//! its own; incremental patching would risk drift from the true book.

use serde::Serialize;

use crate::book::OrderBook;
use crate::types::Side;

/// Default number of price levels published per side.
pub const DEPTH_LEVELS: usize = 15;

/// One aggregated price level. `cum_qty` is the running total across
/// the returned levels only, not the whole side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookLevel {
    pub px_ticks: i64,
    pub qty: i64,
    pub cum_qty: i64,
}

/// Best bid and offer. Spread is present only when both sides are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bbo {
    pub best_bid: Option<i64>,
    pub best_ask: Option<i64>,
    pub spread: Option<i64>,
}

/// Published depth view: top levels per side in book priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepthSnapshot {
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    pub bbo: Bbo,
}

/// Computes the depth snapshot for up to `max_levels` per side.
pub fn snapshot(book: &OrderBook, max_levels: usize) -> DepthSnapshot {
    DepthSnapshot {
        bids: side_levels(book, Side::Buy, max_levels),
        asks: side_levels(book, Side::Sell, max_levels),
        bbo: bbo(book),
    }
}

/// Derives the BBO from the resting book.
pub fn bbo(book: &OrderBook) -> Bbo {
    let best_bid = book.best_bid();
    let best_ask = book.best_ask();
    let spread = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => Some(ask - bid),
        _ => None,
    };
    Bbo {
        best_bid,
        best_ask,
        spread,
    }
}

fn side_levels(book: &OrderBook, side: Side, max_levels: usize) -> Vec<BookLevel> {
    let mut cum = 0;
    book.side(side)
        .iter_levels_best_first()
        .filter(|&(_, qty)| qty > 0)
        .take(max_levels)
        .map(|(px_ticks, qty)| {
            cum += qty;
            BookLevel {
                px_ticks,
                qty,
                cum_qty: cum,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderId, RestingOrder};

    fn resting(id: u128, px: i64, qty: i64) -> RestingOrder {
        RestingOrder {
            id: OrderId(id),
            px_ticks: px,
            qty,
            filled: 0,
            ts_ns: id,
        }
    }

    #[test]
    fn empty_book_empty_snapshot() {
        let book = OrderBook::new();
        let snap = snapshot(&book, DEPTH_LEVELS);
        assert!(snap.bids.is_empty());
        assert!(snap.asks.is_empty());
        assert_eq!(
            snap.bbo,
            Bbo {
                best_bid: None,
                best_ask: None,
                spread: None
            }
        );
    }

    /// Twenty resting bids at distinct prices, fifteen levels
    /// requested: exactly fifteen come back, descending, with
    /// non-decreasing cumulative totals.
    #[test]
    fn caps_levels_and_accumulates() {
        let mut book = OrderBook::new();
        for i in 0..20 {
            book.insert(Side::Buy, resting(i as u128, 10_000 - i, 10 + i));
        }

        let snap = snapshot(&book, 15);
        assert_eq!(snap.bids.len(), 15);
        for pair in snap.bids.windows(2) {
            assert!(pair[0].px_ticks > pair[1].px_ticks, "bids must descend");
            assert!(pair[0].cum_qty <= pair[1].cum_qty, "totals must not decrease");
        }
        assert_eq!(snap.bids[0].px_ticks, 10_000);
        assert_eq!(snap.bids[0].cum_qty, snap.bids[0].qty);
    }

    #[test]
    fn cumulative_totals_cover_returned_levels_only() {
        let mut book = OrderBook::new();
        book.insert(Side::Sell, resting(1, 10_100, 5));
        book.insert(Side::Sell, resting(2, 10_100, 5));
        book.insert(Side::Sell, resting(3, 10_200, 7));
        book.insert(Side::Sell, resting(4, 10_300, 9));

        let snap = snapshot(&book, 2);
        assert_eq!(
            snap.asks,
            vec![
                BookLevel {
                    px_ticks: 10_100,
                    qty: 10,
                    cum_qty: 10
                },
                BookLevel {
                    px_ticks: 10_200,
                    qty: 7,
                    cum_qty: 17
                },
            ]
        );
    }

    #[test]
    fn bbo_requires_both_sides_for_spread() {
        let mut book = OrderBook::new();
        book.insert(Side::Buy, resting(1, 9_990, 10));
        assert_eq!(
            bbo(&book),
            Bbo {
                best_bid: Some(9_990),
                best_ask: None,
                spread: None
            }
        );

        book.insert(Side::Sell, resting(2, 10_010, 10));
        assert_eq!(
            bbo(&book),
            Bbo {
                best_bid: Some(9_990),
                best_ask: Some(10_010),
                spread: Some(20)
            }
        );
    }
}
