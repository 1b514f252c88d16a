use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead, Lines, StdinLock},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::{self, colors_active, current_preferences};

/// Set to any value to read commands from stdin instead of a line editor.
pub const SCRIPT_ENV: &str = "SCAN_FEED_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    let result = LineSource::open(&context).and_then(|mut source| run_loop(&mut context, &mut source));
    context.shutdown();
    result
}

/// Where command lines come from: the line editor or piped stdin.
enum LineSource {
    Editor(Box<Editor<CommandHelper, DefaultHistory>>),
    Script(Lines<StdinLock<'static>>),
}

impl LineSource {
    fn open(context: &ShellContext) -> Result<Self, CliError> {
        match context.mode() {
            CliMode::Script => Ok(LineSource::Script(io::stdin().lock().lines())),
            CliMode::Interactive => {
                let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
                editor.set_helper(Some(CommandHelper::new(context.command_usages())));
                editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
                output::info("Type `help` to list commands, `exit` to leave.");
                Ok(LineSource::Editor(Box::new(editor)))
            }
        }
    }

    /// Next non-empty line, or `None` once input is exhausted.
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        loop {
            let line = match self {
                LineSource::Script(lines) => match lines.next() {
                    Some(line) => line?,
                    None => return Ok(None),
                },
                LineSource::Editor(editor) => match editor.readline(prompt) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            editor.add_history_entry(line.trim()).ok();
                        }
                        line
                    }
                    Err(ReadlineError::Interrupted) => {
                        output::info("Type `exit` to leave.");
                        continue;
                    }
                    Err(ReadlineError::Eof) => return Ok(None),
                    Err(err) => return Err(err.into()),
                },
            };
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
    }
}

fn run_loop(context: &mut ShellContext, source: &mut LineSource) -> Result<(), CliError> {
    while context.running {
        let Some(line) = source.next_line(&context.prompt())? else {
            break;
        };
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err);
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Line-editor support: command completion, usage hints, a prompt colored by
/// feed state, and holding back lines with an open quote.
struct CommandHelper {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandHelper {
    fn new(mut commands: Vec<(&'static str, &'static str)>) -> Self {
        commands.sort_by_key(|(name, _)| *name);
        commands.dedup_by_key(|(name, _)| *name);
        Self { commands }
    }

    fn candidates(&self, needle: &str) -> Vec<Pair> {
        let needle = needle.to_ascii_lowercase();
        self.commands
            .iter()
            .filter(|(name, _)| name.starts_with(&needle))
            .map(|(name, _)| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect()
    }

    /// Rest of the command name for a unique prefix, or the argument usage
    /// once the full name is typed.
    fn hint_for(&self, line: &str) -> Option<String> {
        let typed = line.trim_start();
        if typed.is_empty() || typed.ends_with(char::is_whitespace) {
            return None;
        }
        let needle = typed.to_ascii_lowercase();
        if let Some((name, usage)) = self.commands.iter().find(|(name, _)| *name == needle) {
            let args = usage.strip_prefix(name)?;
            return (!args.is_empty()).then(|| args.to_string());
        }
        let mut matches = self.commands.iter().filter(|(name, _)| name.starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some((name, _)), None) => Some(name[needle.len()..].to_string()),
            _ => None,
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        // Only the command word completes; arguments are free-form.
        if prefix[start..].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((start, self.candidates(&prefix[start..])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.hint_for(line)
    }
}

impl Highlighter for CommandHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        if !colors_active(&current_preferences()) {
            return Cow::Borrowed(prompt);
        }
        let colored = if prompt.contains("[paused]") {
            prompt.bright_yellow()
        } else {
            prompt.bright_green()
        };
        Cow::Owned(colored.to_string())
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if colors_active(&current_preferences()) {
            Cow::Owned(hint.dimmed().to_string())
        } else {
            Cow::Borrowed(hint)
        }
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(match parse_command_line(ctx.input()) {
            Ok(_) => ValidationResult::Valid(None),
            Err(_) => ValidationResult::Incomplete,
        })
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper::new(vec![
            ("status", "status"),
            ("blocks", "blocks"),
            ("toggle", "toggle"),
            ("txs", "txs"),
            ("wait", "wait <seconds>"),
        ])
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens =
            parse_command_line(r#"config set log_filter "scan_feed=debug,warn""#).unwrap();
        assert_eq!(
            tokens,
            vec!["config", "set", "log_filter", "scan_feed=debug,warn"]
        );
        assert!(parse_command_line("wait \"3").is_err());
    }

    #[test]
    fn completion_matches_command_prefixes() {
        let names: Vec<String> = helper()
            .candidates("T")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(names, vec!["toggle", "txs"]);
    }

    #[test]
    fn hints_finish_names_then_show_arguments() {
        let helper = helper();
        assert_eq!(helper.hint_for("sta").as_deref(), Some("tus"));
        assert_eq!(helper.hint_for("wait").as_deref(), Some(" <seconds>"));
        assert_eq!(helper.hint_for("t"), None);
        assert_eq!(helper.hint_for("status"), None);
        assert_eq!(helper.hint_for("wait "), None);
        assert_eq!(helper.hint_for(""), None);
    }
}
