//! The generator's own error enum, in the same one-variant-per-concern
//! shape as `faxt::error::FaxtError`, wrapping `utf8lex_util::Utf8LexError`
//! instead of inventing a parallel taxonomy.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("unknown definition referenced: {0}")]
    UnknownDefinition(String),

    #[error("unknown rule definition {definition:?} for rule {rule:?}")]
    UnknownRuleDefinition { rule: String, definition: String },

    #[error("unrecognized category name: {0}")]
    UnknownCategory(String),

    #[error("could not read template {path}: {source}")]
    Template { path: PathBuf, source: std::io::Error },

    #[error("could not write generated file {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("failed to parse lex spec as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse lex spec as TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to serialize lex spec as TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] utf8lex_util::Utf8LexError),
}

pub type Result<T> = std::result::Result<T, GenError>;
