use scan_config::{ClockMode, Config, ConfigManager};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn, TableRenderer, UiStyle};

const KEYS: &str = "clock, seed, log_filter, color, plain";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change settings",
        "config [set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value] => set_config(context, key, value),
        _ => Err(CommandError::InvalidArguments(
            "usage: config [set <key> <value>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    let mut table = Table::new(
        Some("Configuration"),
        vec![TableColumn::new("Setting", 12), TableColumn::new("Value", 30)],
    );
    let seed = config
        .seed
        .map(|seed| seed.to_string())
        .unwrap_or_else(|| "entropy".into());
    table.add_row(vec!["clock".to_string(), config.clock.to_string()]);
    table.add_row(vec!["seed".to_string(), seed]);
    table.add_row(vec!["log_filter".to_string(), config.log_filter.clone()]);
    table.add_row(vec!["color".to_string(), config.ui_color_enabled.to_string()]);
    table.add_row(vec!["plain".to_string(), config.plain_output.to_string()]);
    table.add_row(vec![
        "running".to_string(),
        format!("{} clock", context.driver.clock_mode()),
    ]);
    TableRenderer::render(&table, &UiStyle::detect());
    output::info(format!("Config file: {}", context.config_path.display()));
}

fn set_config(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    let applies_now = apply_setting(&mut updated, key, value)?;

    ConfigManager::new(context.config_path.clone()).save(&updated)?;
    context.config = updated;

    if applies_now {
        output::set_preferences(OutputPreferences {
            plain_mode: context.config.plain_output,
            color_enabled: context.config.ui_color_enabled,
        });
        output::success(format!("Saved `{key}`."));
    } else {
        output::success(format!("Saved `{key}`. It takes effect on next start."));
    }
    Ok(())
}

/// Writes one setting into `config`. Returns whether it applies to the running shell.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<bool, CommandError> {
    match key.to_ascii_lowercase().as_str() {
        "clock" => {
            config.clock = value
                .parse::<ClockMode>()
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            Ok(false)
        }
        "seed" => {
            config.seed = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(value.parse().map_err(|_| {
                    CommandError::InvalidArguments(format!("`{value}` is not a valid seed"))
                })?)
            };
            Ok(false)
        }
        "log_filter" => {
            config.log_filter = value.to_string();
            Ok(false)
        }
        "color" => {
            config.ui_color_enabled = parse_flag(value)?;
            Ok(true)
        }
        "plain" => {
            config.plain_output = parse_flag(value)?;
            Ok(true)
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown setting `{other}` (expected one of: {KEYS})"
        ))),
    }
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{value}` is not on/off"
        ))),
    }
}
