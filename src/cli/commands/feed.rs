use std::time::Duration;

use scan_domain::LiveState;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{TableRenderer, UiStyle};
use crate::dashboard::{blocks_table, newest_activity, stats_table, transactions_table};

/// Longest single `wait`, in seconds.
const MAX_WAIT_SECONDS: f64 = 86_400.0;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("status", "Show network stats", "status", cmd_status),
        CommandEntry::new("blocks", "List recent blocks", "blocks", cmd_blocks),
        CommandEntry::new("txs", "List recent transactions", "txs", cmd_txs),
        CommandEntry::new("toggle", "Pause or resume the live feed", "toggle", cmd_toggle),
        CommandEntry::new("wait", "Let time pass", "wait <seconds>", cmd_wait),
        CommandEntry::new("json", "Print the current snapshot as JSON", "json", cmd_json),
    ]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.driver.snapshot();
    TableRenderer::render(&stats_table(&snapshot), &UiStyle::detect());
    output::info(newest_activity(&snapshot, context.driver.now()));
    if let Some(elapsed) = context.driver.simulated_elapsed() {
        output::info(format!("Simulated clock: +{:.1}s", elapsed.as_secs_f64()));
    }
    Ok(())
}

fn cmd_blocks(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.driver.snapshot();
    let table = blocks_table(&snapshot.recent_blocks, context.driver.now());
    TableRenderer::render(&table, &UiStyle::detect());
    Ok(())
}

fn cmd_txs(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.driver.snapshot();
    let table = transactions_table(&snapshot.recent_transactions, context.driver.now());
    TableRenderer::render(&table, &UiStyle::detect());
    Ok(())
}

fn cmd_toggle(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.driver.toggle_live() {
        LiveState::Live => output::success("Feed live. Updates resume from now."),
        LiveState::Paused => output::success("Feed paused."),
    }
    Ok(())
}

fn cmd_wait(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let duration = parse_wait(args)?;
    match context.driver.wait(duration) {
        Some(fired) => output::info(format!(
            "Advanced {:.1}s of simulated time ({} updates).",
            duration.as_secs_f64(),
            fired
        )),
        None => output::info(format!("Waited {:.1}s.", duration.as_secs_f64())),
    }
    Ok(())
}

fn cmd_json(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.driver.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn parse_wait(args: &[&str]) -> Result<Duration, CommandError> {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: wait <seconds>".into(),
        ));
    };
    let seconds: f64 = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a number of seconds"))
    })?;
    if !seconds.is_finite() || !(0.0..=MAX_WAIT_SECONDS).contains(&seconds) {
        return Err(CommandError::InvalidArguments(format!(
            "seconds must be between 0 and {MAX_WAIT_SECONDS}"
        )));
    }
    Ok(Duration::from_secs_f64(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_accepts_fractional_seconds() {
        assert_eq!(parse_wait(&["1.5"]).unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_wait(&["0"]).unwrap(), Duration::ZERO);
    }

    #[test]
    fn wait_rejects_bad_input() {
        assert!(matches!(
            parse_wait(&[]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_wait(&["soon"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_wait(&["-3"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_wait(&["NaN"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(parse_wait(&["1", "2"]).is_err());
    }
}
