//! Generate command implementation (§6 `utf8lex generate`).
//!
//! Reads a `LexSpec` (JSON or TOML, per the REDESIGN FLAG that a `.l`
//! grammar parser is out of scope) from `<lex-dir>`, builds and validates
//! the `DefinitionSet`/`RuleList` it describes, and writes a generated
//! driver source file to `<generated-dir>`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use utf8lex_gen::settings::GeneratorSettings;
use utf8lex_gen::spec::LexSpec;

use crate::commands::common::{error_messages, output_messages};
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{CliError, Result};

/// Arguments for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub verbose: bool,
    /// Directory (or single file) holding the serialized `LexSpec`.
    pub lex_dir: PathBuf,
    /// Directory to look for `prologue.tmpl`/`epilogue.tmpl` overrides in.
    pub template_dir: Option<PathBuf>,
    /// Directory the generated driver source file is written into.
    pub generated_dir: Option<PathBuf>,
    /// Base name for the generated file (`<name>.rs`).
    pub name: Option<String>,
}

/// Generate command handler.
pub struct GenerateCommand {
    args: GenerateArgs,
    config: Config,
}

impl GenerateCommand {
    pub fn new(args: GenerateArgs) -> Self {
        Self { args, config: Config::default() }
    }

    pub fn with_config(args: GenerateArgs, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(&self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let spec = self.load_spec()?;
        let settings = self.build_settings();

        let output_path = utf8lex_gen::generate(&spec, &settings)?;

        self.log_generate_complete(start_time.elapsed(), &output_path);
        Ok(output_path)
    }

    /// Read and parse the `LexSpec`. `<lex-dir>` may be a directory
    /// containing `lexspec.json`/`lexspec.toml`, or a path directly to
    /// either file.
    fn load_spec(&self) -> Result<LexSpec> {
        let path = self.resolve_spec_path()?;
        let text = std::fs::read_to_string(&path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(toml::from_str(&text)?),
            _ => Ok(serde_json::from_str(&text)?),
        }
    }

    fn resolve_spec_path(&self) -> Result<PathBuf> {
        if self.args.lex_dir.is_file() {
            return Ok(self.args.lex_dir.clone());
        }
        if !self.args.lex_dir.exists() {
            return Err(CliError::Validation(format!(
                "{} {}",
                error_messages::INPUT_PATH_NOT_EXIST,
                self.args.lex_dir.display()
            )));
        }
        for candidate in ["lexspec.json", "lexspec.toml"] {
            let candidate_path = self.args.lex_dir.join(candidate);
            if candidate_path.exists() {
                return Ok(candidate_path);
            }
        }
        Err(CliError::Validation(format!(
            "no lexspec.json/lexspec.toml found in {}",
            self.args.lex_dir.display()
        )))
    }

    fn build_settings(&self) -> GeneratorSettings {
        let generated_dir = self
            .args
            .generated_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.config.generated_dir));
        let name = self.args.name.clone().unwrap_or_else(|| self.config.generate.name.clone());

        let mut settings = GeneratorSettings::new(generated_dir, name);
        let template_dir =
            self.args.template_dir.clone().or_else(|| Some(PathBuf::from(&self.config.template_dir)));
        if let Some(dir) = template_dir {
            if dir.exists() {
                settings = settings.with_template_dir(dir);
            }
        }
        settings
    }

    fn log_generate_complete(&self, elapsed: std::time::Duration, output_path: &Path) {
        if self.args.verbose {
            eprintln!("{} {}", output_messages::GENERATED_DRIVER, output_path.display());
            eprintln!("✅ Completed in {:.2}s", elapsed.as_secs_f64());
        }
    }
}

impl Command for GenerateCommand {
    type Args = GenerateArgs;
    type Output = PathBuf;

    fn new(args: Self::Args) -> Self {
        Self { args, config: Config::default() }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "generate"
    }
}

impl CommandDescription for GenerateCommand {
    fn description() -> &'static str {
        "Generate a lexer driver from a LexSpec"
    }

    fn help() -> &'static str {
        "Reads a LexSpec (JSON or TOML) from <lex-dir>, builds and validates \
         its definitions and rules, and writes a generated Rust driver \
         source file to <generated-dir>."
    }
}

/// Run the generate command.
pub fn run_generate(args: GenerateArgs) -> Result<PathBuf> {
    GenerateCommand::new(args).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use utf8lex_gen::spec::demo_arithmetic_spec;

    fn write_demo_spec(dir: &Path) -> PathBuf {
        let spec_path = dir.join("lexspec.json");
        let json = serde_json::to_string_pretty(&demo_arithmetic_spec()).unwrap();
        std::fs::write(&spec_path, json).unwrap();
        spec_path
    }

    #[test]
    fn test_generate_args_name() {
        assert_eq!(<GenerateCommand as Command>::name(), "generate");
    }

    #[test]
    fn test_generate_from_directory() {
        let lex_dir = TempDir::new().unwrap();
        write_demo_spec(lex_dir.path());
        let out_dir = TempDir::new().unwrap();

        let args = GenerateArgs {
            verbose: false,
            lex_dir: lex_dir.path().to_path_buf(),
            template_dir: None,
            generated_dir: Some(out_dir.path().to_path_buf()),
            name: Some("arith".to_string()),
        };
        let path = run_generate(args).unwrap();
        assert_eq!(path, out_dir.path().join("arith.rs"));
        assert!(path.exists());
    }

    #[test]
    fn test_generate_rejects_missing_spec() {
        let lex_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();

        let args = GenerateArgs {
            verbose: false,
            lex_dir: lex_dir.path().to_path_buf(),
            template_dir: None,
            generated_dir: Some(out_dir.path().to_path_buf()),
            name: None,
        };
        assert!(run_generate(args).is_err());
    }

    #[test]
    fn test_generate_from_direct_file_path() {
        let lex_dir = TempDir::new().unwrap();
        let spec_path = write_demo_spec(lex_dir.path());
        let out_dir = TempDir::new().unwrap();

        let args = GenerateArgs {
            verbose: false,
            lex_dir: spec_path,
            template_dir: None,
            generated_dir: Some(out_dir.path().to_path_buf()),
            name: None,
        };
        let path = run_generate(args).unwrap();
        assert!(path.exists());
    }
}
