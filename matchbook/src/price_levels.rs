use std::collections::{BTreeMap, VecDeque};

use crate::types::{RestingOrder, Side};

/// One side of the book: price levels in a BTreeMap, FIFO queue of
/// resting orders per level.
///
/// Which end of the map is best depends on the side:
/// - Asks: lowest price is best (front of map)
/// - Bids: highest price is best (back of map)
pub struct PriceLevels {
    side: Side,
    levels: BTreeMap<i64, VecDeque<RestingOrder>>,
}

impl PriceLevels {
    /// Creates empty price levels for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Adds a resting order at its price level, keeping FIFO intact.
    /// Creates the level if it does not exist yet.
    pub fn insert(&mut self, order: RestingOrder) {
        self.levels
            .entry(order.px_ticks)
            .or_default()
            .push_back(order);
    }

    /// Returns a partially filled maker to the head of its level so it
    /// keeps its time priority for the next walk.
    pub fn push_front(&mut self, order: RestingOrder) {
        self.levels
            .entry(order.px_ticks)
            .or_default()
            .push_front(order);
    }

    /// Best price for this side without removing anything.
    /// Returns None when the side is empty.
    pub fn best_price(&self) -> Option<i64> {
        match self.side {
            Side::Sell => self.levels.first_key_value().map(|(px, _)| *px),
            Side::Buy => self.levels.last_key_value().map(|(px, _)| *px),
        }
    }

    /// Highest-priority resting order, if any.
    pub fn peek_best(&self) -> Option<&RestingOrder> {
        let px = self.best_price()?;
        self.levels.get(&px)?.front()
    }

    /// Removes and returns the highest-priority resting order.
    /// Cleans up the level when its queue empties.
    pub fn pop_best(&mut self) -> Option<RestingOrder> {
        let px = self.best_price()?;
        let q = self.levels.get_mut(&px)?;
        let order = q.pop_front();
        if q.is_empty() {
            self.levels.remove(&px);
        }
        order
    }

    /// Resting orders in strict book priority: best price first, FIFO
    /// within a level. Used by the FOK dry run.
    pub fn iter_best_first(&self) -> impl Iterator<Item = &RestingOrder> {
        let levels: Box<dyn Iterator<Item = (&i64, &VecDeque<RestingOrder>)> + '_> = match self.side
        {
            Side::Sell => Box::new(self.levels.iter()),
            Side::Buy => Box::new(self.levels.iter().rev()),
        };
        levels.flat_map(|(_, q)| q.iter())
    }

    /// `(price, total remaining quantity)` per level in book priority.
    /// Orders with zero remaining are skipped defensively; they should
    /// never be present.
    pub fn iter_levels_best_first(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let levels: Box<dyn Iterator<Item = (&i64, &VecDeque<RestingOrder>)> + '_> = match self.side
        {
            Side::Sell => Box::new(self.levels.iter()),
            Side::Buy => Box::new(self.levels.iter().rev()),
        };
        levels.map(|(px, q)| {
            let total: i64 = q.iter().map(|o| o.remaining().max(0)).sum();
            (*px, total)
        })
    }

    /// Total resting orders across all levels.
    pub fn total_orders(&self) -> usize {
        self.levels.values().map(|q| q.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
