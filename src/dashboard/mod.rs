//! Dashboard presentation: overview cards and recent-activity tables built
//! from a [`FeedSnapshot`](scan_domain::FeedSnapshot).

pub mod format;
pub mod stats;
pub mod tables;

pub use stats::{network_stats, newest_activity, StatCard};
pub use tables::{blocks_table, stats_table, transactions_table};
