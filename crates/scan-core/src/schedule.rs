use std::fmt;
use std::time::Duration;

/// One of the three periodic update schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Network,
    Block,
    Transaction,
}

impl Cadence {
    /// Registration order; ticks due at the same instant fire in this order.
    pub const ALL: [Cadence; 3] = [Cadence::Network, Cadence::Block, Cadence::Transaction];

    pub const NETWORK_PERIOD: Duration = Duration::from_millis(5_000);
    pub const BLOCK_PERIOD: Duration = Duration::from_millis(15_000);
    pub const TRANSACTION_PERIOD: Duration = Duration::from_millis(3_000);

    pub fn period(self) -> Duration {
        match self {
            Cadence::Network => Self::NETWORK_PERIOD,
            Cadence::Block => Self::BLOCK_PERIOD,
            Cadence::Transaction => Self::TRANSACTION_PERIOD,
        }
    }

    fn index(self) -> usize {
        match self {
            Cadence::Network => 0,
            Cadence::Block => 1,
            Cadence::Transaction => 2,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Cadence::Network => "network",
            Cadence::Block => "block",
            Cadence::Transaction => "transaction",
        };
        f.write_str(label)
    }
}

/// Simulated-time timetable for the three cadences.
///
/// Tracks how much simulated time has elapsed and, per cadence, the instant
/// of its next tick. A cancelled cadence has no next tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CadenceSchedule {
    elapsed: Duration,
    next_due: [Option<Duration>; 3],
}

impl CadenceSchedule {
    /// Creates a schedule with every cadence armed from time zero.
    pub fn armed() -> Self {
        let mut schedule = Self::default();
        schedule.restart();
        schedule
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Arms every cadence one period after the current instant.
    ///
    /// A cadence whose next instant is past the representable range stays disarmed.
    pub fn restart(&mut self) {
        for cadence in Cadence::ALL {
            self.next_due[cadence.index()] = self.elapsed.checked_add(cadence.period());
        }
    }

    pub fn cancel_all(&mut self) {
        self.next_due = [None; 3];
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.iter().any(Option::is_some)
    }

    pub fn next_due(&self, cadence: Cadence) -> Option<Duration> {
        self.next_due[cadence.index()]
    }

    /// Pops the earliest tick due at or before `deadline`.
    ///
    /// Moves the clock to that tick's instant and re-arms the cadence one
    /// period later. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(Cadence, Duration)> {
        let (cadence, due) = Cadence::ALL
            .iter()
            .filter_map(|cadence| self.next_due(*cadence).map(|due| (*cadence, due)))
            .filter(|(_, due)| *due <= deadline)
            .min_by_key(|(cadence, due)| (*due, cadence.index()))?;
        self.elapsed = due;
        self.next_due[cadence.index()] = due.checked_add(cadence.period());
        Some((cadence, due))
    }

    /// Moves the clock forward without firing anything.
    pub fn settle_at(&mut self, instant: Duration) {
        if instant > self.elapsed {
            self.elapsed = instant;
        }
    }
}
