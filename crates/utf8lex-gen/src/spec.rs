//! The in-memory `LexSpec` (§4.J): the data a `.l`-file parser would have
//! produced, serialized as JSON/TOML since that parser itself is out of
//! scope (REDESIGN FLAGS).
//!
//! Grounded on `faxt::config::Config`'s serde-derived, `#[serde(default)]`
//! heavy settings structs, applied here to the spec a generator consumes
//! instead of to CLI configuration.

use serde::{Deserialize, Serialize};

/// One named pattern definition, as a `.l` file's definitions section
/// would describe it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DefSpec {
    /// A run of graphemes whose category matches every name in `categories`
    /// unioned together (e.g. `["Lu", "Ll"]` for any-case letters).
    ClassCat { name: String, categories: Vec<String>, min: usize, max: Option<usize> },
    /// An exact literal string match.
    Literal { name: String, text: String },
    /// An anchored regular expression.
    Regex { name: String, pattern: String },
    /// A SEQUENCE or OR composition over other named definitions.
    Multi { name: String, kind: MultiKindSpec, references: Vec<ReferenceSpec> },
}

impl DefSpec {
    pub fn name(&self) -> &str {
        match self {
            DefSpec::ClassCat { name, .. } => name,
            DefSpec::Literal { name, .. } => name,
            DefSpec::Regex { name, .. } => name,
            DefSpec::Multi { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiKindSpec {
    Sequence,
    Or,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSpec {
    pub name: String,
    #[serde(default = "default_min")]
    pub min: usize,
    #[serde(default)]
    pub max: Option<usize>,
}

fn default_min() -> usize {
    1
}

/// One rule: the name the generated driver dispatches by, the definition
/// it matches against, and an opaque action string (a fragment of target-
/// language source the generated driver splices in verbatim).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub definition: String,
    #[serde(default)]
    pub action: String,
}

/// The complete spec for one generated lexer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LexSpec {
    #[serde(default)]
    pub definitions: Vec<DefSpec>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    #[serde(default)]
    pub prologue: String,
    #[serde(default)]
    pub epilogue: String,
}

impl Default for DefSpec {
    fn default() -> Self {
        DefSpec::Literal { name: String::new(), text: String::new() }
    }
}

/// The §8 S1 arithmetic rule set, used both by `utf8lex-cli check`'s
/// built-in demo rules and by this crate's own tests.
pub fn demo_arithmetic_spec() -> LexSpec {
    LexSpec {
        definitions: vec![
            DefSpec::Regex { name: "NUMBER".into(), pattern: r"\p{N}+".into() },
            DefSpec::Regex { name: "ID".into(), pattern: r"[_\p{L}][_\p{L}\p{N}]*".into() },
            DefSpec::Literal { name: "EQUALS3".into(), text: "===".into() },
            DefSpec::Literal { name: "EQUALS".into(), text: "=".into() },
            DefSpec::Literal { name: "PLUS".into(), text: "+".into() },
            DefSpec::Literal { name: "MINUS".into(), text: "-".into() },
            DefSpec::ClassCat { name: "SPACE".into(), categories: vec!["Whitespace".into()], min: 1, max: None },
        ],
        rules: vec![
            RuleSpec { name: "NUMBER".into(), definition: "NUMBER".into(), action: String::new() },
            RuleSpec { name: "ID".into(), definition: "ID".into(), action: String::new() },
            RuleSpec { name: "EQUALS3".into(), definition: "EQUALS3".into(), action: String::new() },
            RuleSpec { name: "EQUALS".into(), definition: "EQUALS".into(), action: String::new() },
            RuleSpec { name: "PLUS".into(), definition: "PLUS".into(), action: String::new() },
            RuleSpec { name: "MINUS".into(), definition: "MINUS".into(), action: String::new() },
            RuleSpec { name: "SPACE".into(), definition: "SPACE".into(), action: String::new() },
        ],
        prologue: String::new(),
        epilogue: String::new(),
    }
}
