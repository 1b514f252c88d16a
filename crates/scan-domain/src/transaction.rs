use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 3] = [
        TransactionStatus::Success,
        TransactionStatus::Failed,
        TransactionStatus::Pending,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compact view of a recently observed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub hash_digest: String,
    pub from_address: String,
    pub to_address: String,
    pub value_decimal: String,
    pub gas_price_gwei: u32,
    pub status: TransactionStatus,
    pub observed_at: DateTime<Utc>,
}

impl TransactionSummary {
    /// The three placeholder transactions, newest first.
    pub fn seeded(now: DateTime<Utc>) -> Vec<Self> {
        vec![
            Self {
                hash_digest: "0x2fd098...f3eba8".into(),
                from_address: "0x1234...5678".into(),
                to_address: "0xabcd...ef90".into(),
                value_decimal: "0.133".into(),
                gas_price_gwei: 39,
                status: TransactionStatus::Success,
                observed_at: now - Duration::seconds(5),
            },
            Self {
                hash_digest: "0x9a7ab5...77edb8".into(),
                from_address: "0x5678...1234".into(),
                to_address: "0xef90...abcd".into(),
                value_decimal: "7.712".into(),
                gas_price_gwei: 23,
                status: TransactionStatus::Failed,
                observed_at: now - Duration::seconds(8),
            },
            Self {
                hash_digest: "0x7e5660...258768".into(),
                from_address: "0x9012...3456".into(),
                to_address: "0x7890...bcde".into(),
                value_decimal: "3.598".into(),
                gas_price_gwei: 52,
                status: TransactionStatus::Success,
                observed_at: now - Duration::seconds(12),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let parsed: TransactionStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, TransactionStatus::Failed);
    }

    #[test]
    fn seeded_transactions_include_a_failure() {
        let txs = TransactionSummary::seeded(Utc::now());
        assert_eq!(txs.len(), 3);
        assert!(txs
            .iter()
            .any(|tx| tx.status == TransactionStatus::Failed));
    }
}
