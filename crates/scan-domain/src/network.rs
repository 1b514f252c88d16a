use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Floors applied after every random-walk step.
pub const GAS_PRICE_FLOOR: f64 = 1.0;
pub const HASH_RATE_FLOOR: f64 = 200.0;
pub const BLOCK_TIME_FLOOR: f64 = 8.0;
pub const MARKET_CAP_FLOOR: f64 = 1.0;
pub const TPS_FLOOR: f64 = 0.0;

/// Aggregate network figures shown on the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub block_height: u64,
    pub total_transaction_count: u64,
    pub gas_price: f64,
    pub network_hash_rate: f64,
    pub block_time_seconds: f64,
    pub active_address_count: u64,
    pub market_cap_billions: f64,
    pub transactions_per_second: f64,
    pub last_update: DateTime<Utc>,
}

impl NetworkSummary {
    /// Placeholder figures the feed starts from.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            block_height: 1_234_567,
            total_transaction_count: 45_200_000,
            gas_price: 25.0,
            network_hash_rate: 245.7,
            block_time_seconds: 12.3,
            active_address_count: 892_000,
            market_cap_billions: 2.4,
            transactions_per_second: 15.2,
            last_update: now,
        }
    }

    /// Clamps every walkable field to its floor.
    pub fn clamped(mut self) -> Self {
        self.gas_price = self.gas_price.max(GAS_PRICE_FLOOR);
        self.network_hash_rate = self.network_hash_rate.max(HASH_RATE_FLOOR);
        self.block_time_seconds = self.block_time_seconds.max(BLOCK_TIME_FLOOR);
        self.market_cap_billions = self.market_cap_billions.max(MARKET_CAP_FLOOR);
        self.transactions_per_second = self.transactions_per_second.max(TPS_FLOOR);
        self
    }

    pub fn respects_floors(&self) -> bool {
        self.gas_price >= GAS_PRICE_FLOOR
            && self.network_hash_rate >= HASH_RATE_FLOOR
            && self.block_time_seconds >= BLOCK_TIME_FLOOR
            && self.market_cap_billions >= MARKET_CAP_FLOOR
            && self.transactions_per_second >= TPS_FLOOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_summary_matches_placeholders() {
        let now = Utc::now();
        let summary = NetworkSummary::seeded(now);
        assert_eq!(summary.block_height, 1_234_567);
        assert_eq!(summary.total_transaction_count, 45_200_000);
        assert_eq!(summary.gas_price, 25.0);
        assert_eq!(summary.last_update, now);
        assert!(summary.respects_floors());
    }

    #[test]
    fn clamped_lifts_values_below_floor() {
        let mut summary = NetworkSummary::seeded(Utc::now());
        summary.gas_price = -3.0;
        summary.network_hash_rate = 10.0;
        summary.block_time_seconds = 0.5;
        summary.market_cap_billions = 0.2;
        summary.transactions_per_second = -1.0;

        let clamped = summary.clamped();
        assert_eq!(clamped.gas_price, GAS_PRICE_FLOOR);
        assert_eq!(clamped.network_hash_rate, HASH_RATE_FLOOR);
        assert_eq!(clamped.block_time_seconds, BLOCK_TIME_FLOOR);
        assert_eq!(clamped.market_cap_billions, MARKET_CAP_FLOOR);
        assert_eq!(clamped.transactions_per_second, TPS_FLOOR);
    }
}
