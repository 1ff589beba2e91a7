use crate::price_levels::PriceLevels;
use crate::types::{RestingOrder, Side};

/// Central limit order book for one instrument, bid and ask sides kept
/// independently in price-time priority.
///
/// Not thread-safe on its own; the engine owning it is the single
/// writer.
pub struct OrderBook {
    /// Buy orders, highest price first.
    bids: PriceLevels,
    /// Sell orders, lowest price first.
    asks: PriceLevels,
}

impl OrderBook {
    /// Creates an empty order book.
    pub fn new() -> Self {
        Self {
            bids: PriceLevels::new(Side::Buy),
            asks: PriceLevels::new(Side::Sell),
        }
    }

    pub fn side(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Rests an order on the given side at its limit price, behind any
    /// earlier arrivals at the same price. Precondition: remaining
    /// quantity is positive.
    pub fn insert(&mut self, side: Side, order: RestingOrder) {
        debug_assert!(order.remaining() > 0, "fully filled order must not rest");
        self.side_mut(side).insert(order);
    }

    /// Current best bid price (highest resting buy).
    pub fn best_bid(&self) -> Option<i64> {
        self.bids.best_price()
    }

    /// Current best ask price (lowest resting sell).
    pub fn best_ask(&self) -> Option<i64> {
        self.asks.best_price()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
