use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound for [`BlockSummary::gas_used_percent`].
pub const MAX_GAS_USED_PERCENT: u8 = 100;

/// Compact view of a recently observed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub number: u64,
    pub hash_digest: String,
    pub transaction_count: u32,
    pub gas_used_percent: u8,
    pub miner_address: String,
    pub observed_at: DateTime<Utc>,
}

impl BlockSummary {
    pub fn new(
        number: u64,
        hash_digest: impl Into<String>,
        transaction_count: u32,
        gas_used_percent: u8,
        miner_address: impl Into<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            hash_digest: hash_digest.into(),
            transaction_count,
            gas_used_percent: gas_used_percent.min(MAX_GAS_USED_PERCENT),
            miner_address: miner_address.into(),
            observed_at,
        }
    }

    /// The three placeholder blocks, newest first.
    pub fn seeded(now: DateTime<Utc>) -> Vec<Self> {
        vec![
            Self::new(
                1_234_567,
                "0x14f39f...f7cf68",
                163,
                59,
                "0x14f39f...f7cf68",
                now - Duration::seconds(12),
            ),
            Self::new(
                1_234_566,
                "0xf63880...30f26f",
                73,
                83,
                "0xf63880...30f26f",
                now - Duration::seconds(24),
            ),
            Self::new(
                1_234_565,
                "0x737a9e...2434d8",
                94,
                48,
                "0x737a9e...2434d8",
                now - Duration::seconds(36),
            ),
        ]
    }
}
