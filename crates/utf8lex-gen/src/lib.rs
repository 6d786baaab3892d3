//! utf8lex-gen — the generator interface (§4.J): turns an in-memory
//! [`spec::LexSpec`] into a resolved `DefinitionSet`/`RuleList` pair
//! (`build`) and, from there, a self-contained generated driver source
//! file (`codegen::generate`).
//!
//! Per the REDESIGN FLAGS, a `.l`-file grammar parser is out of scope;
//! `LexSpec` is the thing a `.l` parser would have produced, read
//! directly from JSON or TOML instead.

pub mod build;
pub mod codegen;
pub mod error;
pub mod settings;
pub mod spec;

pub use build::build_definition_set;
pub use codegen::generate;
pub use error::{GenError, Result};
pub use settings::{GeneratorSettings, TargetLanguage};
pub use spec::{DefSpec, LexSpec, MultiKindSpec, ReferenceSpec, RuleSpec};
