use chrono::{DateTime, Utc};
use scan_domain::{FeedSnapshot, NetworkSummary};

use super::format::{compact_millions, compact_thousands, group_thousands, relative_age};

/// One headline figure of the network overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub description: &'static str,
}

impl StatCard {
    fn new(label: &'static str, value: String, description: &'static str) -> Self {
        Self {
            label,
            value,
            description,
        }
    }
}

/// The eight overview cards, in display order.
pub fn network_stats(summary: &NetworkSummary) -> Vec<StatCard> {
    vec![
        StatCard::new(
            "Latest Block",
            group_thousands(summary.block_height),
            "Most recent block number",
        ),
        StatCard::new(
            "Total Transactions",
            compact_millions(summary.total_transaction_count),
            "Total network transactions",
        ),
        StatCard::new(
            "Average Gas Price",
            format!("{:.1} gwei", summary.gas_price),
            "Current average gas price",
        ),
        StatCard::new(
            "Network Hash Rate",
            format!("{:.1} TH/s", summary.network_hash_rate),
            "Total network hash rate",
        ),
        StatCard::new(
            "Block Time",
            format!("{:.1}s", summary.block_time_seconds),
            "Average block time",
        ),
        StatCard::new(
            "Active Addresses",
            compact_thousands(summary.active_address_count),
            "Unique active addresses",
        ),
        StatCard::new(
            "Market Cap",
            format!("${:.1}B", summary.market_cap_billions),
            "Total market capitalization",
        ),
        StatCard::new(
            "TPS",
            format!("{:.1}", summary.transactions_per_second),
            "Transactions per second",
        ),
    ]
}

/// One line naming the newest block and transaction with their ages.
pub fn newest_activity(snapshot: &FeedSnapshot, now: DateTime<Utc>) -> String {
    let block = snapshot.latest_block().map_or_else(
        || "no blocks yet".to_string(),
        |block| {
            format!(
                "block #{} {}",
                group_thousands(block.number),
                relative_age(block.observed_at, now)
            )
        },
    );
    let transaction = snapshot.latest_transaction().map_or_else(
        || "no transactions yet".to_string(),
        |tx| {
            format!(
                "transaction {} ({}) {}",
                tx.hash_digest,
                tx.status,
                relative_age(tx.observed_at, now)
            )
        },
    );
    format!("Newest: {block}; {transaction}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan_domain::{BlockSummary, LiveState, TransactionSummary};

    #[test]
    fn seeded_summary_renders_expected_values() {
        let cards = network_stats(&NetworkSummary::seeded(Utc::now()));
        let values: Vec<(&str, &str)> = cards
            .iter()
            .map(|card| (card.label, card.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Latest Block", "1,234,567"),
                ("Total Transactions", "45.2M"),
                ("Average Gas Price", "25.0 gwei"),
                ("Network Hash Rate", "245.7 TH/s"),
                ("Block Time", "12.3s"),
                ("Active Addresses", "892K"),
                ("Market Cap", "$2.4B"),
                ("TPS", "15.2"),
            ]
        );
    }

    #[test]
    fn newest_activity_names_the_front_entries() {
        let now = Utc::now();
        let mut snapshot = FeedSnapshot {
            summary: NetworkSummary::seeded(now),
            recent_blocks: BlockSummary::seeded(now),
            recent_transactions: TransactionSummary::seeded(now),
            live: LiveState::Live,
            revision: 0,
        };
        let line = newest_activity(&snapshot, now);
        assert!(line.starts_with("Newest: block #1,234,567 "), "{line}");
        assert!(line.contains("transaction 0x2fd098...f3eba8 (success) 5s ago"), "{line}");

        snapshot.recent_blocks.clear();
        snapshot.recent_transactions.clear();
        assert_eq!(
            newest_activity(&snapshot, now),
            "Newest: no blocks yet; no transactions yet."
        );
    }
}
