//! scan-domain
//!
//! Pure data types shared by the feed engine and its consumers
//! (network summary, block and transaction summaries, snapshots).
//! No I/O, no scheduling. Only data types and their seeded defaults.

pub mod block;
pub mod network;
pub mod snapshot;
pub mod transaction;

pub use block::*;
pub use network::*;
pub use snapshot::*;
pub use transaction::*;
