//! Check command implementation (§6 `utf8lex check`).
//!
//! Drives the engine directly over an input file: loads a `LexSpec`
//! (built-in §8 S1 arithmetic demo rules if `--rules` isn't given, or a
//! JSON/TOML file otherwise), lexes the whole file to EOF, and prints
//! each token's rule name and byte range (plus its char/grapheme/line
//! units too, when `show_all_units` is set). Exits with the matching
//! `ErrorCode` on the first `NoMatch`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use utf8lex_core::{ByteString, LexOutcome, State};
use utf8lex_gen::build::build_definition_set;
use utf8lex_gen::spec::{demo_arithmetic_spec, LexSpec};
use utf8lex_util::{ErrorCode, Utf8LexError};

use crate::commands::common::error_messages;
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{CliError, Result};

/// Arguments for the check command.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub verbose: bool,
    /// File to lex.
    pub input: PathBuf,
    /// Optional path to a JSON/TOML `LexSpec`; defaults to the built-in
    /// §8 S1 arithmetic demo rules.
    pub rules: Option<PathBuf>,
    /// Also report the char/grapheme/line units of each token's location,
    /// not just its byte range. Mirrors `Config::check.show_all_units`.
    pub show_all_units: bool,
}

/// One line of `check`'s token report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedToken {
    pub rule_name: String,
    pub byte_start: u64,
    pub byte_end: u64,
    /// Populated only when `show_all_units` is set.
    pub other_units: Option<OtherUnits>,
}

/// The char/grapheme/line units of a token's location, reported alongside
/// its byte range when `--show-all-units`/`check.show_all_units` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherUnits {
    pub char_start: u64,
    pub char_end: u64,
    pub grapheme_start: u64,
    pub grapheme_end: u64,
    pub line_start: u64,
    pub line_end: u64,
}

/// Check command handler.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Build a command whose `show_all_units` falls back to the config's
    /// `check.show_all_units` default when the CLI flag wasn't set.
    pub fn with_config(mut args: CheckArgs, config: Config) -> Self {
        args.show_all_units = args.show_all_units || config.check.show_all_units;
        Self { args }
    }

    pub fn run(&self) -> Result<Vec<CheckedToken>> {
        let start_time = Instant::now();
        self.validate_input_path()?;

        let spec = self.load_rules()?;
        let (defs, rules) = build_definition_set(&spec).map_err(CliError::from)?;

        let text = std::fs::read_to_string(&self.args.input)?;
        let mut state = State::new();
        state.append(ByteString::from_str(&text), true).map_err(CliError::from)?;

        let mut tokens = Vec::new();
        loop {
            match utf8lex_core::lex(&mut state, &rules, &defs).map_err(CliError::from)? {
                LexOutcome::Token(token) => {
                    let rule = rules.find_by_id(token.rule_id).map_err(CliError::from)?;
                    let other_units = self.args.show_all_units.then(|| OtherUnits {
                        char_start: token.location.char.start,
                        char_end: token.location.char.end(),
                        grapheme_start: token.location.grapheme.start,
                        grapheme_end: token.location.grapheme.end(),
                        line_start: token.location.line.start,
                        line_end: token.location.line.end(),
                    });
                    if self.args.verbose {
                        match &other_units {
                            Some(units) => println!(
                                "🔹 {} bytes[{}..{}) chars[{}..{}) graphemes[{}..{}) lines[{}..{})",
                                rule.name,
                                token.byte_start,
                                token.byte_end,
                                units.char_start,
                                units.char_end,
                                units.grapheme_start,
                                units.grapheme_end,
                                units.line_start,
                                units.line_end,
                            ),
                            None => println!("🔹 {} [{}..{})", rule.name, token.byte_start, token.byte_end),
                        }
                    }
                    tokens.push(CheckedToken {
                        rule_name: rule.name.clone(),
                        byte_start: token.byte_start,
                        byte_end: token.byte_end,
                        other_units,
                    });
                }
                LexOutcome::Eof => break,
                LexOutcome::More => {
                    return Err(CliError::from(Utf8LexError::new(
                        ErrorCode::More,
                        "unexpected MORE: check reads the whole file as one buffer",
                    )));
                }
                LexOutcome::NoMatch => {
                    let offset = state.byte_offset() as usize;
                    let excerpt: String = text[offset..].chars().take(16).collect();
                    return Err(CliError::NoMatch { byte: state.byte_offset(), excerpt });
                }
            }
        }

        if self.args.verbose {
            eprintln!("✅ Checked {} in {:.2}s, {} token(s)", self.args.input.display(), start_time.elapsed().as_secs_f64(), tokens.len());
        }

        Ok(tokens)
    }

    fn validate_input_path(&self) -> Result<()> {
        if !self.args.input.exists() {
            return Err(CliError::Validation(format!(
                "{} {}",
                error_messages::INPUT_PATH_NOT_EXIST,
                self.args.input.display()
            )));
        }
        if !self.args.input.is_file() {
            return Err(CliError::Validation(format!(
                "{} {}",
                error_messages::INPUT_PATH_NOT_FILE,
                self.args.input.display()
            )));
        }
        Ok(())
    }

    fn load_rules(&self) -> Result<LexSpec> {
        match &self.args.rules {
            None => Ok(demo_arithmetic_spec()),
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                match path.extension().and_then(|e| e.to_str()) {
                    Some("toml") => Ok(toml::from_str(&text)?),
                    _ => Ok(serde_json::from_str(&text)?),
                }
            }
        }
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = Vec<CheckedToken>;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Lex a file against a rule set and report the token stream"
    }

    fn help() -> &'static str {
        "Lexes <file> to EOF using --rules (a JSON/TOML LexSpec) or, if \
         omitted, the built-in arithmetic demo rules, printing each \
         token's rule name and byte range (and, with --show-all-units, \
         its char/grapheme/line units too). Exits with a non-zero status \
         on the first NoMatch."
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<Vec<CheckedToken>> {
    CheckCommand::new(args).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_input(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("input.txt");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_check_command_name() {
        assert_eq!(<CheckCommand as Command>::name(), "check");
    }

    #[test]
    fn test_check_demo_rules_arithmetic() {
        let dir = TempDir::new().unwrap();
        let input = write_input(dir.path(), "x = 12+3");

        let tokens = run_check(CheckArgs { verbose: false, input, rules: None, show_all_units: false }).unwrap();
        let names: Vec<&str> = tokens.iter().map(|t| t.rule_name.as_str()).collect();
        assert_eq!(names, vec!["ID", "SPACE", "EQUALS", "SPACE", "NUMBER", "PLUS", "NUMBER"]);
    }

    #[test]
    fn test_check_reports_no_match() {
        let dir = TempDir::new().unwrap();
        let input = write_input(dir.path(), "x # y");

        let err = run_check(CheckArgs { verbose: false, input, rules: None, show_all_units: false }).unwrap_err();
        assert!(matches!(err, CliError::NoMatch { .. }));
    }

    #[test]
    fn test_check_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("does-not-exist.txt");

        let err = run_check(CheckArgs { verbose: false, input, rules: None, show_all_units: false }).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_check_without_show_all_units_omits_other_units() {
        let dir = TempDir::new().unwrap();
        let input = write_input(dir.path(), "x = 1");

        let tokens =
            run_check(CheckArgs { verbose: false, input, rules: None, show_all_units: false }).unwrap();
        assert!(tokens.iter().all(|t| t.other_units.is_none()));
    }

    #[test]
    fn test_check_with_show_all_units_reports_char_and_line_position() {
        let dir = TempDir::new().unwrap();
        let input = write_input(dir.path(), "x = 1");

        let tokens =
            run_check(CheckArgs { verbose: false, input, rules: None, show_all_units: true }).unwrap();
        let id_token = tokens.iter().find(|t| t.rule_name == "ID").unwrap();
        let units = id_token.other_units.as_ref().unwrap();
        assert_eq!((units.char_start, units.char_end), (0, 1));
        assert_eq!((units.line_start, units.line_end), (0, 0));
    }

    #[test]
    fn test_with_config_falls_back_to_config_show_all_units() {
        let dir = TempDir::new().unwrap();
        let input = write_input(dir.path(), "x = 1");
        let mut config = Config::default();
        config.check.show_all_units = true;

        let args = CheckArgs { verbose: false, input, rules: None, show_all_units: false };
        let tokens = CheckCommand::with_config(args, config).run().unwrap();
        assert!(tokens.iter().all(|t| t.other_units.is_some()));
    }
}
