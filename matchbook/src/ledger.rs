use std::collections::VecDeque;

use crate::types::Trade;

/// Default trade history cap.
pub const LEDGER_CAP: usize = 50;

/// Bounded trade history, newest first. Oldest entries are evicted
/// once the cap is reached; there is no other removal path.
pub struct TradeLedger {
    trades: VecDeque<Trade>,
    cap: usize,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::with_cap(LEDGER_CAP)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            trades: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Prepends a trade, evicting from the tail when over the cap.
    pub fn record(&mut self, trade: Trade) {
        self.trades.push_front(trade);
        self.trades.truncate(self.cap);
    }

    /// Trades newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter()
    }

    /// Most recent trade, if any.
    pub fn latest(&self) -> Option<&Trade> {
        self.trades.front()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl Default for TradeLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderId, Side, TradeId};

    fn trade(id: u64, px: i64) -> Trade {
        Trade {
            id: TradeId(id),
            symbol: "BTC-USDT".to_string(),
            px_ticks: px,
            qty: 1,
            aggressor: Side::Buy,
            maker: OrderId(1),
            taker: OrderId(2),
            ts_ns: id as u128,
        }
    }

    #[test]
    fn newest_first() {
        let mut ledger = TradeLedger::new();
        ledger.record(trade(1, 10_000));
        ledger.record(trade(2, 10_001));
        ledger.record(trade(3, 10_002));

        let ids: Vec<u64> = ledger.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(ledger.latest().map(|t| t.id.0), Some(3));
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut ledger = TradeLedger::with_cap(3);
        for i in 1..=5 {
            ledger.record(trade(i, 10_000 + i as i64));
        }
        assert_eq!(ledger.len(), 3);
        let ids: Vec<u64> = ledger.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }
}
