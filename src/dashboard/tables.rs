use chrono::{DateTime, Utc};
use scan_domain::{BlockSummary, FeedSnapshot, TransactionSummary};

use crate::cli::ui::table::{Table, TableColumn};

use super::format::{group_thousands, relative_age};
use super::stats::network_stats;

pub fn stats_table(snapshot: &FeedSnapshot) -> Table {
    let title = format!(
        "Network overview ({}, revision {})",
        snapshot.live, snapshot.revision
    );
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::new("Stat", 20),
            TableColumn::new("Value", 14),
            TableColumn::new("About", 28),
        ],
    );
    for card in network_stats(&snapshot.summary) {
        table.add_row(vec![
            card.label.to_string(),
            card.value,
            card.description.to_string(),
        ]);
    }
    table
}

pub fn blocks_table(blocks: &[BlockSummary], now: DateTime<Utc>) -> Table {
    let mut table = Table::new(
        Some("Recent blocks"),
        vec![
            TableColumn::new("Block", 12),
            TableColumn::new("Hash", 18),
            TableColumn::new("Txs", 5),
            TableColumn::new("Gas", 5),
            TableColumn::new("Miner", 18),
            TableColumn::new("Age", 10),
        ],
    );
    for block in blocks {
        table.add_row(vec![
            format!("#{}", group_thousands(block.number)),
            block.hash_digest.clone(),
            block.transaction_count.to_string(),
            format!("{}%", block.gas_used_percent),
            block.miner_address.clone(),
            relative_age(block.observed_at, now),
        ]);
    }
    table
}

pub fn transactions_table(transactions: &[TransactionSummary], now: DateTime<Utc>) -> Table {
    let mut table = Table::new(
        Some("Recent transactions"),
        vec![
            TableColumn::new("Hash", 18),
            TableColumn::new("From", 14),
            TableColumn::new("To", 14),
            TableColumn::new("Value", 8),
            TableColumn::new("Gas", 9),
            TableColumn::new("Status", 8),
            TableColumn::new("Age", 10),
        ],
    );
    for tx in transactions {
        table.add_row(vec![
            tx.hash_digest.clone(),
            tx.from_address.clone(),
            tx.to_address.clone(),
            tx.value_decimal.clone(),
            format!("{} gwei", tx.gas_price_gwei),
            tx.status.to_string(),
            relative_age(tx.observed_at, now),
        ]);
    }
    table
}
