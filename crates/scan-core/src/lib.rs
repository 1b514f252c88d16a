//! scan-core
//!
//! The simulated ledger feed: a synthetic, continuously evolving view of
//! network figures, recent blocks and recent transactions.
//! Depends on scan-domain. No terminal I/O, no async runtime.

pub mod buffer;
pub mod feed;
pub mod generator;
pub mod random;
pub mod schedule;
pub mod time;

pub use buffer::{RecentBuffer, RECENT_CAPACITY};
pub use feed::LedgerFeed;
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use schedule::{Cadence, CadenceSchedule};
pub use time::{Clock, FixedClock};

#[cfg(test)]
mod tests;
