//! utf8lex CLI - a command-line tool for the Unicode-aware lexer engine.
//!
//! This is the main entry point for the utf8lex CLI application.
//! It uses clap for argument parsing and dispatches to appropriate
//! command handlers based on user input.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    check::{run_check, CheckArgs},
    generate::{run_generate, GenerateArgs},
    init::{run_init, InitArgs},
};
use config::Config;
use error::{CliError, Result};

/// utf8lex - a Unicode-aware lexical analyzer engine and code generator.
///
/// utf8lex provides utilities for scaffolding a new lexer project,
/// generating a driver from a lex specification, and checking input
/// against a rule set directly.
#[derive(Parser, Debug)]
#[command(name = "utf8lex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for the utf8lex lexer engine", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "UTF8LEX_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "UTF8LEX_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "UTF8LEX_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the utf8lex CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new utf8lex project
    ///
    /// Creates a default utf8lex.toml and a demo lex spec in the
    /// specified or current directory.
    Init(InitCommand),

    /// Generate a lexer driver from a LexSpec
    ///
    /// Reads a LexSpec (JSON or TOML) from <lex-dir>, builds and
    /// validates it, and writes a generated driver source file to
    /// <generated-dir>.
    Generate(GenerateCommand),

    /// Check a file against a rule set
    ///
    /// Lexes <file> to EOF using --rules or the built-in arithmetic
    /// demo rules, printing the resulting token stream.
    Check(CheckCommand),
}

/// Arguments for the init subcommand.
#[derive(Parser, Debug)]
struct InitCommand {
    /// Directory to initialize (default: a fresh temp directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Force initialization even if directory is not empty
    #[arg(short, long)]
    force: bool,
}

/// Arguments for the generate subcommand.
#[derive(Parser, Debug)]
struct GenerateCommand {
    /// Directory (or direct file path) holding the LexSpec
    lex_dir: PathBuf,

    /// Directory of prologue.tmpl/epilogue.tmpl overrides
    #[arg(short, long)]
    template_dir: Option<PathBuf>,

    /// Directory the generated driver is written into
    #[arg(short, long)]
    generated_dir: Option<PathBuf>,

    /// Base name for the generated file (<name>.rs)
    #[arg(short, long)]
    name: Option<String>,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// File to lex
    input: PathBuf,

    /// Path to a JSON/TOML LexSpec (defaults to the built-in arithmetic demo)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Also report the char/grapheme/line units of each token, not just bytes
    #[arg(long)]
    show_all_units: bool,
}

/// Main entry point for the utf8lex CLI.
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.verbose, config)
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    let subscriber =
        fmt::layer().with_ansi(!no_color).with_target(false).with_thread_ids(false).with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CliError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Init(args) => execute_init(args, verbose),
        Commands::Generate(args) => execute_generate(args, verbose, &config),
        Commands::Check(args) => execute_check(args, verbose, &config),
    }
}

/// Execute the init command.
fn execute_init(args: InitCommand, verbose: bool) -> Result<()> {
    run_init(InitArgs { verbose, force: args.force, path: args.path })
}

/// Execute the generate command.
fn execute_generate(args: GenerateCommand, verbose: bool, config: &Config) -> Result<()> {
    let generated_dir = args.generated_dir.or_else(|| Some(PathBuf::from(&config.generated_dir)));
    let template_dir = args.template_dir.or_else(|| Some(PathBuf::from(&config.template_dir)));
    let name = args.name.or_else(|| Some(config.generate.name.clone()));

    let output_path = run_generate(GenerateArgs {
        verbose,
        lex_dir: args.lex_dir,
        template_dir,
        generated_dir,
        name,
    })?;
    if !verbose {
        println!("{}", output_path.display());
    }
    Ok(())
}

/// Execute the check command.
fn execute_check(args: CheckCommand, verbose: bool, config: &Config) -> Result<()> {
    let show_all_units = args.show_all_units || config.check.show_all_units;
    let tokens = run_check(CheckArgs {
        verbose,
        input: args.input,
        rules: args.rules,
        show_all_units,
    })?;
    if !verbose {
        for token in tokens {
            match &token.other_units {
                Some(units) => println!(
                    "{} bytes[{}..{}) chars[{}..{}) graphemes[{}..{}) lines[{}..{})",
                    token.rule_name,
                    token.byte_start,
                    token.byte_end,
                    units.char_start,
                    units.char_end,
                    units.grapheme_start,
                    units.grapheme_end,
                    units.line_start,
                    units.line_end,
                ),
                None => println!("{} [{}..{})", token.rule_name, token.byte_start, token.byte_end),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["utf8lex", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_init_with_path() {
        let cli = Cli::parse_from(["utf8lex", "init", "--path", "/tmp/test"]);
        if let Commands::Init(args) = cli.command {
            assert_eq!(args.path, Some(PathBuf::from("/tmp/test")));
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn test_cli_parse_init_with_force() {
        let cli = Cli::parse_from(["utf8lex", "init", "--force"]);
        if let Commands::Init(args) = cli.command {
            assert!(args.force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["utf8lex", "generate", "spec-dir"]);
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.lex_dir, PathBuf::from("spec-dir"));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_with_name() {
        let cli = Cli::parse_from(["utf8lex", "generate", "spec-dir", "--name", "arith"]);
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.name, Some("arith".to_string()));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["utf8lex", "check", "input.txt"]);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.input, PathBuf::from("input.txt"));
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_check_with_rules() {
        let cli = Cli::parse_from(["utf8lex", "check", "input.txt", "--rules", "rules.json"]);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.rules, Some(PathBuf::from("rules.json")));
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_check_with_show_all_units() {
        let cli = Cli::parse_from(["utf8lex", "check", "input.txt", "--show-all-units"]);
        if let Commands::Check(args) = cli.command {
            assert!(args.show_all_units);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_global_verbose() {
        let cli = Cli::parse_from(["utf8lex", "--verbose", "init"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::parse_from(["utf8lex", "--config", "/path/to/config.toml", "init"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_cli_parse_global_no_color() {
        let cli = Cli::parse_from(["utf8lex", "--no-color", "init"]);
        assert!(cli.no_color);
    }
}
