use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use scan_domain::{BlockSummary, FeedSnapshot, LiveState, NetworkSummary, TransactionSummary};
use tracing::{debug, info};

use crate::{
    buffer::{RecentBuffer, RECENT_CAPACITY},
    generator,
    random::{RandomSource, SeededRandom},
    schedule::{Cadence, CadenceSchedule},
    time::Clock,
};

/// Simulated ledger feed.
///
/// Owns the network summary and the two recent-activity buffers and mutates
/// them only from its tick handlers. Consumers read cloned [`FeedSnapshot`]s.
///
/// The feed can be driven two ways: [`LedgerFeed::advance_by`] walks a
/// simulated timetable, while [`LedgerFeed::tick`] runs a single handler on
/// demand for an external scheduler. Both honour the live/paused state.
pub struct LedgerFeed {
    summary: NetworkSummary,
    blocks: RecentBuffer<BlockSummary>,
    transactions: RecentBuffer<TransactionSummary>,
    live: LiveState,
    schedule: CadenceSchedule,
    random: Box<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    origin: DateTime<Utc>,
    revision: u64,
    disposed: bool,
}

impl LedgerFeed {
    /// Seeds the placeholder state and starts live with every cadence armed.
    pub fn new(clock: Arc<dyn Clock>, random: Box<dyn RandomSource>) -> Self {
        let origin = clock.now();
        Self {
            summary: NetworkSummary::seeded(origin),
            blocks: RecentBuffer::from_newest_first(RECENT_CAPACITY, BlockSummary::seeded(origin)),
            transactions: RecentBuffer::from_newest_first(
                RECENT_CAPACITY,
                TransactionSummary::seeded(origin),
            ),
            live: LiveState::Live,
            schedule: CadenceSchedule::armed(),
            random,
            clock,
            origin,
            revision: 0,
            disposed: false,
        }
    }

    pub fn seeded(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Box::new(SeededRandom::new(seed)))
    }

    pub fn from_entropy(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Box::new(SeededRandom::from_entropy()))
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            summary: self.summary.clone(),
            recent_blocks: self.blocks.to_vec(),
            recent_transactions: self.transactions.to_vec(),
            live: self.live,
            revision: self.revision,
        }
    }

    pub fn live_state(&self) -> LiveState {
        self.live
    }

    pub fn is_live(&self) -> bool {
        self.live.is_live()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Simulated time walked so far through [`LedgerFeed::advance_by`].
    pub fn simulated_elapsed(&self) -> Duration {
        self.schedule.elapsed()
    }

    /// Wall-clock equivalent of the simulated instant: creation time plus simulated elapsed time.
    pub fn simulated_now(&self) -> DateTime<Utc> {
        self.stamp_for(self.schedule.elapsed())
    }

    /// Flips between live and paused.
    ///
    /// Pausing cancels every pending tick; resuming re-arms all cadences one
    /// full period from now, without replaying ticks missed while paused.
    pub fn toggle_live(&mut self) -> LiveState {
        if self.disposed {
            debug!("toggle ignored on a disposed feed");
            return self.live;
        }
        self.live = self.live.toggled();
        if self.live.is_live() {
            self.schedule.restart();
        } else {
            self.schedule.cancel_all();
        }
        self.revision += 1;
        info!(state = %self.live, "ledger feed toggled");
        self.live
    }

    /// Cancels every cadence for good. Later ticks, toggles and advances are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.schedule.cancel_all();
        info!(revision = self.revision, "ledger feed disposed");
    }

    /// Runs one handler stamped with the clock's current time.
    pub fn tick(&mut self, cadence: Cadence) -> bool {
        let now = self.clock.now();
        self.tick_at(cadence, now)
    }

    /// Runs one handler stamped with `now`. Returns false when suppressed.
    pub fn tick_at(&mut self, cadence: Cadence, now: DateTime<Utc>) -> bool {
        if self.disposed || !self.live.is_live() {
            return false;
        }
        match cadence {
            Cadence::Network => self.on_network_tick(now),
            Cadence::Block => self.on_block_tick(now),
            Cadence::Transaction => self.on_transaction_tick(now),
        }
        self.revision += 1;
        debug!(%cadence, revision = self.revision, "feed tick");
        true
    }

    /// Advances simulated time, firing every tick that falls due on the way.
    ///
    /// Returns how many handlers ran. Nothing fires while paused or disposed,
    /// but the simulated clock still moves.
    pub fn advance_by(&mut self, by: Duration) -> usize {
        let deadline = self.schedule.elapsed().saturating_add(by);
        let mut fired = 0;
        while let Some((cadence, due)) = self.schedule.pop_due(deadline) {
            let stamp = self.stamp_for(due);
            if self.tick_at(cadence, stamp) {
                fired += 1;
            }
        }
        self.schedule.settle_at(deadline);
        fired
    }

    fn stamp_for(&self, offset: Duration) -> DateTime<Utc> {
        chrono::Duration::from_std(offset)
            .ok()
            .and_then(|delta| self.origin.checked_add_signed(delta))
            .unwrap_or_else(|| self.clock.now())
    }

    fn on_network_tick(&mut self, now: DateTime<Utc>) {
        let next = generator::next_summary(&self.summary, self.random.as_mut(), now);
        self.summary = next;
    }

    fn on_block_tick(&mut self, now: DateTime<Utc>) {
        let number = self.summary.block_height.saturating_add(1);
        let block = generator::next_block(number, self.random.as_mut(), now);
        self.summary = NetworkSummary {
            block_height: number,
            ..self.summary.clone()
        };
        self.blocks.push_front(block);
    }

    fn on_transaction_tick(&mut self, now: DateTime<Utc>) {
        let transaction = generator::next_transaction(self.random.as_mut(), now);
        self.transactions.push_front(transaction);
    }
}
