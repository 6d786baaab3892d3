//! Generator settings (§4.J, §6 `generate` subcommand): where templates
//! live, where output goes, and what target language to emit.
//!
//! Grounded on `faxt::commands::build::BuildArgs`/`BuildConfig` (an
//! input/output-directory pair plus a small set of named options) and the
//! `other_examples` `maciejhirsz-logos` codegen crate, which also keys its
//! emitted code off one target-language descriptor.

use std::path::PathBuf;

/// A target language the generator knows how to emit a driver for.
///
/// Only `Rust` is implemented; the field exists so a future target
/// doesn't require restructuring `GeneratorSettings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    Rust,
}

impl TargetLanguage {
    pub fn extension(self) -> &'static str {
        match self {
            TargetLanguage::Rust => "rs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetLanguage::Rust => "rust",
        }
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        TargetLanguage::Rust
    }
}

/// Everything `generate` needs beyond the `LexSpec` itself: where to look
/// for `prologue.tmpl`/`epilogue.tmpl` overrides, where to write the
/// generated driver, its base name, and the target language.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub template_dir: Option<PathBuf>,
    pub generated_dir: PathBuf,
    pub name: String,
    pub target: TargetLanguage,
}

impl GeneratorSettings {
    pub fn new(generated_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            template_dir: None,
            generated_dir: generated_dir.into(),
            name: name.into(),
            target: TargetLanguage::Rust,
        }
    }

    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.generated_dir.join(format!("{}.{}", self.name, self.target.extension()))
    }
}
