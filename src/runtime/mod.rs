//! Wall-clock driver for a [`LedgerFeed`].
//!
//! One tokio task per cadence ticks the shared feed and publishes a complete
//! snapshot through a watch channel after every change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scan_core::{Cadence, LedgerFeed};
use scan_domain::{FeedSnapshot, LiveState};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

pub type SnapshotReceiver = watch::Receiver<Arc<FeedSnapshot>>;
type SnapshotPublisher = Arc<watch::Sender<Arc<FeedSnapshot>>>;

/// A feed ticking on real timers.
///
/// Pausing aborts the three cadence tasks; resuming spawns fresh ones whose
/// first tick lands one full period later. Dropping the handle tears
/// everything down.
pub struct LiveFeed {
    feed: Arc<Mutex<LedgerFeed>>,
    publisher: SnapshotPublisher,
    runtime: Handle,
    tasks: Vec<JoinHandle<()>>,
}

impl LiveFeed {
    /// Takes ownership of `feed` and starts its cadences on `runtime` if it is live.
    pub fn spawn(feed: LedgerFeed, runtime: Handle) -> Self {
        let (publisher, _) = watch::channel(Arc::new(feed.snapshot()));
        let should_run = feed.is_live() && !feed.is_disposed();
        let mut live_feed = Self {
            feed: Arc::new(Mutex::new(feed)),
            publisher: Arc::new(publisher),
            runtime,
            tasks: Vec::new(),
        };
        if should_run {
            live_feed.start_cadences();
        }
        live_feed
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        lock(&self.feed).snapshot()
    }

    /// Receiver notified after every tick or toggle.
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.publisher.subscribe()
    }

    pub fn live_state(&self) -> LiveState {
        lock(&self.feed).live_state()
    }

    /// True while cadence tasks are scheduled.
    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn toggle_live(&mut self) -> LiveState {
        let (state, disposed, snapshot) = {
            let mut feed = lock(&self.feed);
            let state = feed.toggle_live();
            (state, feed.is_disposed(), feed.snapshot())
        };
        self.stop_cadences();
        if state.is_live() && !disposed {
            self.start_cadences();
        }
        self.publisher.send_replace(Arc::new(snapshot));
        state
    }

    /// Aborts every cadence task and disposes the feed.
    pub fn dispose(&mut self) {
        self.stop_cadences();
        lock(&self.feed).dispose();
    }

    fn start_cadences(&mut self) {
        for cadence in Cadence::ALL {
            let feed = Arc::clone(&self.feed);
            let publisher = Arc::clone(&self.publisher);
            self.tasks
                .push(self.runtime.spawn(run_cadence(cadence, feed, publisher)));
        }
        info!(tasks = self.tasks.len(), "feed cadences started");
    }

    fn stop_cadences(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!("feed cadences stopped");
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.stop_cadences();
    }
}

async fn run_cadence(
    cadence: Cadence,
    feed: Arc<Mutex<LedgerFeed>>,
    publisher: SnapshotPublisher,
) {
    let period = cadence.period();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let snapshot = {
            let mut guard = lock(&feed);
            if !guard.tick(cadence) {
                debug!(%cadence, "tick suppressed");
                continue;
            }
            guard.snapshot()
        };
        publisher.send_replace(Arc::new(snapshot));
    }
}

// Handlers replace state wholesale, so a poisoned lock still guards a consistent feed.
fn lock(feed: &Mutex<LedgerFeed>) -> MutexGuard<'_, LedgerFeed> {
    feed.lock().unwrap_or_else(PoisonError::into_inner)
}
