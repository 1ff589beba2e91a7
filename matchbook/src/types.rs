use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u128);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeId(pub u64);

/// Order type tag as it appears at the submission boundary,
/// before the optional price has been validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
    Ioc,
    Fok,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Ioc => "ioc",
            OrderType::Fok => "fok",
        };
        f.write_str(s)
    }
}

/// Order type together with its price constraint.
///
/// Limit and FOK orders always carry a price; market orders never do;
/// IOC may run priced or unpriced. A priceless limit order is
/// unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderKind {
    Limit { px_ticks: i64 },
    Market,
    Ioc { px_ticks: Option<i64> },
    Fok { px_ticks: i64 },
}

impl OrderKind {
    /// The price constraint applied while walking the opposing side,
    /// if any. `None` means every resting price crosses.
    pub fn limit_px(&self) -> Option<i64> {
        match *self {
            OrderKind::Limit { px_ticks } => Some(px_ticks),
            OrderKind::Market => None,
            OrderKind::Ioc { px_ticks } => px_ticks,
            OrderKind::Fok { px_ticks } => Some(px_ticks),
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::Market => OrderType::Market,
            OrderKind::Ioc { .. } => OrderType::Ioc,
            OrderKind::Fok { .. } => OrderType::Fok,
        }
    }
}

/// An incoming order as accepted by the matching engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub kind: OrderKind,
    /// Requested quantity in integer lots. Must be positive.
    pub qty: i64,
    /// Arrival time in ns, the time-priority tiebreak.
    pub ts_ns: u128,
}

/// An order resting in the book. Always limit-priced: market, IOC and
/// FOK remainders never rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestingOrder {
    pub id: OrderId,
    pub px_ticks: i64,
    pub qty: i64,
    pub filled: i64,
    pub ts_ns: u128,
}

impl RestingOrder {
    pub fn remaining(&self) -> i64 {
        self.qty - self.filled
    }
}

/// Immutable execution record, created exactly once per fill.
///
/// Maker and taker are referenced by id only; the maker may already
/// have left the book by the time the trade is read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Trade {
    pub id: TradeId,
    pub symbol: String,
    /// Execution price: always the maker's resting price.
    pub px_ticks: i64,
    pub qty: i64,
    /// Side of the incoming order that triggered the match.
    pub aggressor: Side,
    pub maker: OrderId,
    pub taker: OrderId,
    pub ts_ns: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_side() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn limit_px_per_kind() {
        assert_eq!(OrderKind::Limit { px_ticks: 100 }.limit_px(), Some(100));
        assert_eq!(OrderKind::Market.limit_px(), None);
        assert_eq!(OrderKind::Ioc { px_ticks: None }.limit_px(), None);
        assert_eq!(OrderKind::Ioc { px_ticks: Some(99) }.limit_px(), Some(99));
        assert_eq!(OrderKind::Fok { px_ticks: 101 }.limit_px(), Some(101));
    }

    #[test]
    fn remaining_tracks_fill_progress() {
        let mut o = RestingOrder {
            id: OrderId(1),
            px_ticks: 10_000,
            qty: 100,
            filled: 0,
            ts_ns: 1,
        };
        assert_eq!(o.remaining(), 100);
        o.filled += 60;
        assert_eq!(o.remaining(), 40);
    }
}
