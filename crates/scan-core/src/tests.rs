use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use regex::Regex;
use scan_domain::{LiveState, TransactionStatus};

use crate::{
    feed::LedgerFeed,
    random::FixedRandom,
    schedule::Cadence,
    time::{Clock, FixedClock},
    RECENT_CAPACITY,
};

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    ))
}

fn scripted_feed() -> LedgerFeed {
    LedgerFeed::new(fixed_clock(), Box::new(FixedRandom(0.5)))
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn fresh_feeds_share_seeded_defaults() {
    let first = LedgerFeed::seeded(1, fixed_clock()).snapshot();
    let second = LedgerFeed::seeded(2, fixed_clock()).snapshot();
    assert_eq!(first, second);

    let summary = &first.summary;
    assert_eq!(summary.block_height, 1_234_567);
    assert_eq!(summary.total_transaction_count, 45_200_000);
    assert_eq!(summary.gas_price, 25.0);
    assert_eq!(summary.network_hash_rate, 245.7);
    assert_eq!(summary.block_time_seconds, 12.3);
    assert_eq!(summary.active_address_count, 892_000);
    assert_eq!(summary.market_cap_billions, 2.4);
    assert_eq!(summary.transactions_per_second, 15.2);

    let numbers: Vec<u64> = first.recent_blocks.iter().map(|b| b.number).collect();
    assert_eq!(numbers, vec![1_234_567, 1_234_566, 1_234_565]);
    assert_eq!(first.recent_transactions.len(), 3);
    assert_eq!(first.live, LiveState::Live);
}

#[test]
fn toggling_twice_resumes_ticking() {
    let mut feed = scripted_feed();
    assert_eq!(feed.toggle_live(), LiveState::Paused);
    assert_eq!(feed.advance_by(ms(30_000)), 0);

    assert_eq!(feed.toggle_live(), LiveState::Live);
    assert!(feed.advance_by(ms(3_000)) > 0);
    assert_eq!(feed.snapshot().recent_transactions.len(), 4);
}

#[test]
fn block_appears_after_fifteen_seconds() {
    let mut feed = scripted_feed();
    feed.advance_by(ms(14_999));
    assert_eq!(feed.snapshot().recent_blocks.len(), 3);

    feed.advance_by(ms(1));
    let snapshot = feed.snapshot();
    assert_eq!(snapshot.recent_blocks.len(), 4);
    assert_eq!(snapshot.recent_blocks[0].number, 1_234_568);
    assert_eq!(snapshot.summary.block_height, 1_234_568);
}

#[test]
fn transaction_appears_after_three_seconds() {
    let mut feed = LedgerFeed::seeded(99, fixed_clock());
    feed.advance_by(ms(3_000));
    let snapshot = feed.snapshot();
    assert_eq!(snapshot.recent_transactions.len(), 4);
    let newest = snapshot.latest_transaction().expect("newest transaction");
    assert!(TransactionStatus::ALL.contains(&newest.status));
}

#[test]
fn buffers_evict_down_to_capacity() {
    let mut feed = scripted_feed();
    feed.advance_by(ms(150_000));
    let snapshot = feed.snapshot();

    assert_eq!(snapshot.recent_blocks.len(), RECENT_CAPACITY);
    assert_eq!(snapshot.recent_transactions.len(), RECENT_CAPACITY);

    // Ten blocks were generated (1_234_568..=1_234_577); the newest eight survive.
    let numbers: Vec<u64> = snapshot.recent_blocks.iter().map(|b| b.number).collect();
    assert_eq!(numbers, (1_234_570..=1_234_577).rev().collect::<Vec<_>>());
}

#[test]
fn seeded_entries_are_evicted_with_random_draws() {
    let mut feed = LedgerFeed::seeded(2024, fixed_clock());
    feed.advance_by(ms(8 * 15_000 + 1));
    let snapshot = feed.snapshot();

    assert_eq!(snapshot.recent_blocks.len(), RECENT_CAPACITY);
    assert!(snapshot
        .recent_blocks
        .iter()
        .all(|block| block.number > 1_234_567));
    assert!(snapshot
        .recent_blocks
        .windows(2)
        .all(|pair| pair[0].number > pair[1].number));
}

#[test]
fn counters_never_decrease_and_floors_hold() {
    let mut feed = LedgerFeed::seeded(7, fixed_clock());
    let mut previous = feed.snapshot().summary;
    for _ in 0..400 {
        feed.advance_by(ms(5_000));
        let snapshot = feed.snapshot();
        let summary = snapshot.summary;
        assert!(summary.block_height >= previous.block_height);
        assert!(summary.total_transaction_count >= previous.total_transaction_count);
        assert!(summary.respects_floors(), "floors violated: {summary:?}");
        assert!(snapshot.recent_blocks.len() <= RECENT_CAPACITY);
        assert!(snapshot.recent_transactions.len() <= RECENT_CAPACITY);
        previous = summary;
    }
}

#[test]
fn low_draws_pin_values_to_floors() {
    let mut feed = LedgerFeed::new(fixed_clock(), Box::new(FixedRandom(0.0)));
    feed.advance_by(ms(600_000));
    let summary = feed.snapshot().summary;
    assert_eq!(summary.gas_price, 1.0);
    assert_eq!(summary.network_hash_rate, 200.0);
    assert_eq!(summary.block_time_seconds, 8.0);
    assert_eq!(summary.market_cap_billions, 1.0);
    assert_eq!(summary.transactions_per_second, 0.0);
}

#[test]
fn pause_freezes_state() {
    let mut feed = LedgerFeed::seeded(5, fixed_clock());
    feed.advance_by(ms(20_000));
    feed.toggle_live();
    let frozen = feed.snapshot();

    assert_eq!(feed.advance_by(ms(120_000)), 0);
    assert!(!feed.tick(Cadence::Block));
    assert_eq!(feed.snapshot(), frozen);
}

#[test]
fn resume_does_not_backfill_missed_ticks() {
    let mut feed = scripted_feed();
    feed.toggle_live();
    feed.advance_by(ms(60_000));
    feed.toggle_live();

    // Only the first transaction cadence is due within 3s of resuming.
    assert_eq!(feed.advance_by(ms(3_000)), 1);
    assert_eq!(feed.snapshot().recent_transactions.len(), 4);
    assert_eq!(feed.snapshot().recent_blocks.len(), 3);
}

#[test]
fn disposed_feed_ignores_time_and_toggles() {
    let mut feed = LedgerFeed::seeded(3, fixed_clock());
    feed.advance_by(ms(4_000));
    feed.dispose();
    let final_state = feed.snapshot();

    assert_eq!(feed.advance_by(ms(90_000)), 0);
    assert_eq!(feed.toggle_live(), LiveState::Live);
    assert!(!feed.tick(Cadence::Transaction));
    assert_eq!(feed.snapshot(), final_state);
    assert!(feed.is_disposed());
}

#[test]
fn generated_blocks_use_digest_shape() {
    let pattern = Regex::new(r"^0x[a-f0-9]+\.\.\.[a-f0-9]+$").unwrap();
    let mut feed = LedgerFeed::seeded(17, fixed_clock());
    feed.advance_by(ms(15_000));

    let block = feed.snapshot().recent_blocks[0].clone();
    assert!(pattern.is_match(&block.hash_digest));
    assert!(pattern.is_match(&block.miner_address));
    assert!(block.transaction_count > 0);
    assert!(block.gas_used_percent > 0 && block.gas_used_percent <= 100);
}

#[test]
fn simulated_ticks_are_stamped_in_simulated_time() {
    let clock = fixed_clock();
    let origin = clock.now();
    let mut feed = LedgerFeed::new(clock, Box::new(FixedRandom(0.5)));
    feed.advance_by(ms(5_000));

    let snapshot = feed.snapshot();
    assert_eq!(
        snapshot.summary.last_update,
        origin + chrono::Duration::seconds(5)
    );
    assert_eq!(
        snapshot.recent_transactions[0].observed_at,
        origin + chrono::Duration::seconds(3)
    );
}

#[test]
fn status_distribution_favors_success() {
    let mut feed = LedgerFeed::seeded(31, fixed_clock());
    let mut success = 0;
    let mut other = 0;
    for _ in 0..600 {
        feed.advance_by(ms(3_000));
        match feed.snapshot().recent_transactions[0].status {
            TransactionStatus::Success => success += 1,
            _ => other += 1,
        }
    }
    assert!(success > other, "success={success} other={other}");
}

#[test]
fn revision_tracks_every_change() {
    let mut feed = scripted_feed();
    assert_eq!(feed.snapshot().revision, 0);
    feed.advance_by(ms(3_000));
    assert_eq!(feed.snapshot().revision, 1);
    feed.toggle_live();
    assert_eq!(feed.snapshot().revision, 2);
}

#[test]
fn advancing_by_an_unbounded_duration_saturates() {
    let mut feed = scripted_feed();
    feed.toggle_live();
    let frozen = feed.snapshot();

    assert_eq!(feed.advance_by(ms(1_000)), 0);
    assert_eq!(feed.advance_by(Duration::MAX), 0);
    assert_eq!(feed.simulated_elapsed(), Duration::MAX);
    assert_eq!(feed.snapshot(), frozen);
    assert_eq!(feed.simulated_now(), fixed_clock().now());

    assert_eq!(feed.toggle_live(), LiveState::Live);
    assert_eq!(feed.advance_by(Duration::MAX), 0);
    assert_eq!(feed.snapshot().recent_blocks, frozen.recent_blocks);
}
