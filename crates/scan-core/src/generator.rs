//! Synthesizes the next network summary, block and transaction.
//!
//! Every function here is pure apart from the draws it takes from the
//! supplied [`RandomSource`]; the feed decides when to call them.

use chrono::{DateTime, Utc};
use scan_domain::{BlockSummary, NetworkSummary, TransactionStatus, TransactionSummary};

use crate::random::RandomSource;

/// Half-widths of the per-tick random walk.
pub const GAS_PRICE_STEP: f64 = 2.5;
pub const HASH_RATE_STEP: f64 = 5.0;
pub const BLOCK_TIME_STEP: f64 = 1.0;
pub const ACTIVE_ADDRESS_STEP: i64 = 50;
pub const MARKET_CAP_STEP: f64 = 0.05;
pub const TPS_STEP: f64 = 1.5;

/// Chance that a network tick observes one more block.
pub const BLOCK_HEIGHT_BUMP_PROBABILITY: f64 = 0.2;
/// Exclusive upper bound of the transactions added to the counter per network tick.
pub const TRANSACTION_COUNTER_STEP: u64 = 50;

pub const BLOCK_TRANSACTIONS_MIN: u32 = 50;
pub const BLOCK_TRANSACTIONS_SPAN: u32 = 200;
pub const GAS_USED_MIN: u8 = 20;
pub const GAS_USED_SPAN: u8 = 80;

pub const TX_GAS_PRICE_MIN: u32 = 15;
pub const TX_GAS_PRICE_SPAN: u32 = 60;
pub const TX_VALUE_MAX: f64 = 10.0;

/// Relative weights of synthesized transaction outcomes.
pub const STATUS_WEIGHTS: [(TransactionStatus, u32); 3] = [
    (TransactionStatus::Success, 60),
    (TransactionStatus::Failed, 20),
    (TransactionStatus::Pending, 20),
];

const HASH_DIGEST_HALF: usize = 6;
const ADDRESS_DIGEST_HALF: usize = 4;

/// Computes the summary that follows `previous` after one network tick.
pub fn next_summary(
    previous: &NetworkSummary,
    rng: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> NetworkSummary {
    let bump = u64::from(rng.chance(BLOCK_HEIGHT_BUMP_PROBABILITY));
    let added_transactions = rng.below(TRANSACTION_COUNTER_STEP);
    let address_delta = rng.below(2 * ACTIVE_ADDRESS_STEP as u64) as i64 - ACTIVE_ADDRESS_STEP;

    NetworkSummary {
        block_height: previous.block_height.saturating_add(bump),
        total_transaction_count: previous
            .total_transaction_count
            .saturating_add(added_transactions),
        gas_price: previous.gas_price + rng.symmetric(GAS_PRICE_STEP),
        network_hash_rate: previous.network_hash_rate + rng.symmetric(HASH_RATE_STEP),
        block_time_seconds: previous.block_time_seconds + rng.symmetric(BLOCK_TIME_STEP),
        active_address_count: previous
            .active_address_count
            .saturating_add_signed(address_delta),
        market_cap_billions: previous.market_cap_billions + rng.symmetric(MARKET_CAP_STEP),
        transactions_per_second: previous.transactions_per_second + rng.symmetric(TPS_STEP),
        last_update: now,
    }
    .clamped()
}

/// Synthesizes block `number`.
pub fn next_block(number: u64, rng: &mut dyn RandomSource, now: DateTime<Utc>) -> BlockSummary {
    let hash = digest(rng, HASH_DIGEST_HALF);
    let transaction_count =
        BLOCK_TRANSACTIONS_MIN + rng.below(u64::from(BLOCK_TRANSACTIONS_SPAN)) as u32;
    let gas_used = GAS_USED_MIN + rng.below(u64::from(GAS_USED_SPAN)) as u8;
    let miner = digest(rng, HASH_DIGEST_HALF);
    BlockSummary::new(number, hash, transaction_count, gas_used, miner, now)
}

pub fn next_transaction(rng: &mut dyn RandomSource, now: DateTime<Utc>) -> TransactionSummary {
    TransactionSummary {
        hash_digest: digest(rng, HASH_DIGEST_HALF),
        from_address: digest(rng, ADDRESS_DIGEST_HALF),
        to_address: digest(rng, ADDRESS_DIGEST_HALF),
        value_decimal: format!("{:.3}", rng.next_unit() * TX_VALUE_MAX),
        gas_price_gwei: TX_GAS_PRICE_MIN + rng.below(u64::from(TX_GAS_PRICE_SPAN)) as u32,
        status: pick_status(rng),
        observed_at: now,
    }
}

/// Draws a status according to [`STATUS_WEIGHTS`].
pub fn pick_status(rng: &mut dyn RandomSource) -> TransactionStatus {
    let total: u32 = STATUS_WEIGHTS.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.below(u64::from(total)) as u32;
    for (status, weight) in STATUS_WEIGHTS {
        if roll < weight {
            return status;
        }
        roll -= weight;
    }
    TransactionStatus::Success
}

/// Shortened digest in the `0x<hex>...<hex>` display form.
fn digest(rng: &mut dyn RandomSource, half: usize) -> String {
    let head = rng.hex(half);
    let tail = rng.hex(half);
    format!("0x{head}...{tail}")
}
