#![doc(test(attr(deny(warnings))))]

//! Scan Feed simulates a blockchain explorer's live data: a network summary
//! plus recent blocks and transactions that evolve on fixed cadences, with a
//! pause/resume switch and a terminal dashboard on top.

pub mod cli;
pub mod dashboard;
pub mod errors;
pub mod runtime;
pub mod utils;

pub use runtime::{LiveFeed, SnapshotReceiver};
pub use utils::system_clock::SystemClock;
pub use scan_core::{Cadence, Clock, LedgerFeed, RandomSource, SeededRandom};
pub use scan_domain::{
    BlockSummary, FeedSnapshot, LiveState, NetworkSummary, TransactionStatus, TransactionSummary,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_DIRECTIVE);
}

/// Like [`init`], with `directive` layered over `RUST_LOG`. Only the first call takes effect.
pub fn init_with_filter(directive: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Scan Feed tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init_with_filter("scan_feed=debug");
    }
}
