//! Single-instrument order matching core with price-time priority.
//!
//! Core pieces:
//! - `OrderBook`: two-sided book of resting limit orders (BTreeMap of
//!   FIFO price levels per side)
//! - `Engine`: consumes incoming orders (market/limit/IOC/FOK), walks
//!   the opposing side, records trades, rests limit remainders
//! - `TradeLedger`: bounded newest-first trade history
//! - `depth`: aggregated price-level depth and BBO, recomputed from
//!   the book after every mutation
//!
//! The crate is synchronous and single-writer; wrap the engine behind
//! an exclusive lock for concurrent access (see the `market` crate).

pub mod book;
pub mod depth;
pub mod engine;
pub mod ledger;
pub mod price_levels;
pub mod types;

pub use book::OrderBook;
pub use depth::{Bbo, BookLevel, DepthSnapshot, DEPTH_LEVELS};
pub use engine::{Engine, Execution, Outcome, SubmitError};
pub use ledger::{TradeLedger, LEDGER_CAP};
pub use price_levels::PriceLevels;
pub use types::{Order, OrderId, OrderKind, OrderType, RestingOrder, Side, Trade, TradeId};
