//! Shell context, feed driver, and command dispatch.

use std::{io, path::PathBuf, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use scan_config::{ClockMode, Config, ConfigError, ConfigManager};
use scan_core::LedgerFeed;
use scan_domain::{FeedSnapshot, LiveState};
use strsim::levenshtein;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

pub use crate::errors::CliError;
use crate::runtime::LiveFeed;
use crate::utils::system_clock::SystemClock;

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Message(err.to_string())
    }
}

/// The feed behind the shell, driven either by simulated time or by real timers.
pub enum FeedDriver {
    /// Time only moves when `wait` advances it.
    Simulated(LedgerFeed),
    /// Cadence tasks run on a private runtime while the shell blocks on input.
    /// `wait` parks the shell on that runtime's timer.
    Realtime {
        // Declared first so the cadence tasks are aborted before the runtime shuts down.
        feed: LiveFeed,
        runtime: Runtime,
    },
}

impl FeedDriver {
    pub fn start(config: &Config) -> Result<Self, CliError> {
        let clock = Arc::new(SystemClock);
        let feed = match config.seed {
            Some(seed) => LedgerFeed::seeded(seed, clock),
            None => LedgerFeed::from_entropy(clock),
        };
        match config.clock {
            ClockMode::Simulated => Ok(FeedDriver::Simulated(feed)),
            ClockMode::Realtime => {
                let runtime = Builder::new_multi_thread()
                    .worker_threads(1)
                    .thread_name("scan-feed")
                    .enable_time()
                    .build()?;
                let feed = LiveFeed::spawn(feed, runtime.handle().clone());
                Ok(FeedDriver::Realtime { feed, runtime })
            }
        }
    }

    pub fn clock_mode(&self) -> ClockMode {
        match self {
            FeedDriver::Simulated(_) => ClockMode::Simulated,
            FeedDriver::Realtime { .. } => ClockMode::Realtime,
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        match self {
            FeedDriver::Simulated(feed) => feed.snapshot(),
            FeedDriver::Realtime { feed, .. } => feed.snapshot(),
        }
    }

    pub fn live_state(&self) -> LiveState {
        match self {
            FeedDriver::Simulated(feed) => feed.live_state(),
            FeedDriver::Realtime { feed, .. } => feed.live_state(),
        }
    }

    /// Reference instant for relative ages.
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            FeedDriver::Simulated(feed) => feed.simulated_now(),
            FeedDriver::Realtime { .. } => Utc::now(),
        }
    }

    /// Simulated time walked so far, or `None` on the wall clock.
    pub fn simulated_elapsed(&self) -> Option<Duration> {
        match self {
            FeedDriver::Simulated(feed) => Some(feed.simulated_elapsed()),
            FeedDriver::Realtime { .. } => None,
        }
    }

    pub fn toggle_live(&mut self) -> LiveState {
        match self {
            FeedDriver::Simulated(feed) => feed.toggle_live(),
            FeedDriver::Realtime { feed, .. } => feed.toggle_live(),
        }
    }

    /// Lets `duration` pass. Returns the number of ticks fired when that is known.
    pub fn wait(&mut self, duration: Duration) -> Option<usize> {
        match self {
            FeedDriver::Simulated(feed) => Some(feed.advance_by(duration)),
            FeedDriver::Realtime { runtime, .. } => {
                runtime.block_on(tokio::time::sleep(duration));
                None
            }
        }
    }

    pub fn dispose(&mut self) {
        match self {
            FeedDriver::Simulated(feed) => feed.dispose(),
            FeedDriver::Realtime { feed, .. } => feed.dispose(),
        }
    }
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) driver: FeedDriver,
    pub(crate) config: Config,
    pub(crate) config_path: PathBuf,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Loads configuration, initializes logging, and starts the feed.
    ///
    /// An unreadable config file is reported and replaced by defaults.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::from_env()?;
        let (config, load_error) = match manager.load() {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        };
        crate::init_with_filter(&config.log_filter);
        if let Some(err) = load_error {
            warn!(path = %manager.config_path().display(), "using default config: {err}");
        }
        Self::with_config(mode, config, manager.config_path().to_path_buf())
    }

    pub fn with_config(
        mode: CliMode,
        config: Config,
        config_path: PathBuf,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_output,
            color_enabled: config.ui_color_enabled,
        });

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let driver = FeedDriver::start(&config)?;
        info!(clock = %config.clock, seed = ?config.seed, "shell started");

        Ok(Self {
            mode,
            registry,
            driver,
            config,
            config_path,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// `(name, usage)` for every registered command, for line-editor hints.
    pub(crate) fn command_usages(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .list()
            .into_iter()
            .map(|entry| (entry.name, entry.usage))
            .collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("scan[{}]> ", self.driver.live_state())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest_command(self.registry.names(), input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        debug!(command = ?self.last_command, error = %err, "command failed");
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    /// Stops the feed for good. Called once the loop ends.
    pub(crate) fn shutdown(&mut self) {
        self.running = false;
        self.driver.dispose();
    }
}

/// Closest registered name within an edit distance of three.
pub(crate) fn closest_command<'a>(
    names: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<&'a str> {
    let needle = input.to_ascii_lowercase();
    names
        .map(|name| (levenshtein(name, &needle), name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_stay_within_three_edits() {
        let names = ["status", "blocks", "txs", "toggle"];
        assert_eq!(closest_command(names.into_iter(), "stauts"), Some("status"));
        assert_eq!(closest_command(names.into_iter(), "BLOKS"), Some("blocks"));
        assert_eq!(closest_command(names.into_iter(), "completely-off"), None);
    }

    #[test]
    fn simulated_driver_advances_virtual_time() {
        let config = Config {
            clock: ClockMode::Simulated,
            seed: Some(11),
            ..Config::default()
        };
        let mut driver = FeedDriver::start(&config).unwrap();
        assert_eq!(driver.clock_mode(), ClockMode::Simulated);

        let before = driver.now();
        assert_eq!(driver.wait(Duration::from_secs(3)), Some(1));
        assert_eq!(driver.snapshot().recent_transactions.len(), 4);
        assert_eq!((driver.now() - before).num_seconds(), 3);
        assert_eq!(driver.simulated_elapsed(), Some(Duration::from_secs(3)));

        assert_eq!(driver.toggle_live(), LiveState::Paused);
        assert_eq!(driver.wait(Duration::from_secs(30)), Some(0));
        driver.dispose();
        assert_eq!(driver.toggle_live(), LiveState::Paused);
    }

    #[test]
    fn prompt_and_hints_follow_the_shell() {
        let config = Config {
            clock: ClockMode::Simulated,
            seed: Some(3),
            ..Config::default()
        };
        let mut context =
            ShellContext::with_config(CliMode::Script, config, PathBuf::from("unused.json"))
                .unwrap();
        assert_eq!(context.prompt(), "scan[live]> ");
        context.driver.toggle_live();
        assert_eq!(context.prompt(), "scan[paused]> ");

        let usages = context.command_usages();
        assert!(usages.contains(&("wait", "wait <seconds>")));
        assert!(usages.iter().all(|(name, usage)| usage.starts_with(name)));
        context.shutdown();
    }
}
