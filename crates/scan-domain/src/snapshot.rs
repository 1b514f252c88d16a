use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BlockSummary, NetworkSummary, TransactionSummary};

/// Scheduling state of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveState {
    #[default]
    Live,
    Paused,
}

impl LiveState {
    pub fn is_live(self) -> bool {
        matches!(self, LiveState::Live)
    }

    pub fn toggled(self) -> Self {
        match self {
            LiveState::Live => LiveState::Paused,
            LiveState::Paused => LiveState::Live,
        }
    }
}

impl fmt::Display for LiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LiveState::Live => "live",
            LiveState::Paused => "paused",
        };
        f.write_str(label)
    }
}

/// Read-only view of everything a feed owns at one point in time.
///
/// Buffers are ordered newest first. `revision` increases on every state
/// change, so two snapshots with equal revisions carry identical data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub summary: NetworkSummary,
    pub recent_blocks: Vec<BlockSummary>,
    pub recent_transactions: Vec<TransactionSummary>,
    pub live: LiveState,
    pub revision: u64,
}

impl FeedSnapshot {
    pub fn latest_block(&self) -> Option<&BlockSummary> {
        self.recent_blocks.first()
    }

    pub fn latest_transaction(&self) -> Option<&TransactionSummary> {
        self.recent_transactions.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips_between_states() {
        assert_eq!(LiveState::Live.toggled(), LiveState::Paused);
        assert_eq!(LiveState::Paused.toggled().toggled(), LiveState::Paused);
        assert!(LiveState::default().is_live());
    }

    #[test]
    fn snapshot_serializes_live_flag() {
        let now = chrono::Utc::now();
        let snapshot = FeedSnapshot {
            summary: NetworkSummary::seeded(now),
            recent_blocks: BlockSummary::seeded(now),
            recent_transactions: TransactionSummary::seeded(now),
            live: LiveState::Paused,
            revision: 0,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["live"], "paused");
        assert_eq!(json["recent_blocks"][0]["number"], 1_234_567);
        assert_eq!(snapshot.latest_block().map(|b| b.number), Some(1_234_567));
    }
}
