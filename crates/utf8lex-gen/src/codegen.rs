//! Driver-source emission (§4.J `generate`).
//!
//! Per the REDESIGN FLAG, `<lex-dir>` is a serialized [`LexSpec`], not a
//! `.l` grammar, so there is no template-language grammar to expand here
//! either: `generate` writes one self-contained Rust source file that
//! builds the `DefinitionSet`/`RuleList` at startup (via [`crate::build`])
//! and drives `utf8lex_core::engine::lex` in a loop, splicing each rule's
//! opaque action string in as the body of its match arm.
//!
//! Grounded on `faxt::commands::build::BuildCommand`'s
//! validate-then-write orchestration, and on the `other_examples`
//! `maciejhirsz-logos` generator, which likewise emits one generated
//! source file per invocation rather than a multi-file tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{GenError, Result};
use crate::settings::GeneratorSettings;
use crate::spec::LexSpec;

const DEFAULT_PROLOGUE: &str = "// Generated by utf8lex-gen. Do not edit by hand.\n";
const DEFAULT_EPILOGUE: &str = "";

fn read_template(dir: &Path, file_name: &str) -> Result<Option<String>> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(&path).map(Some).map_err(|source| GenError::Template { path, source })
}

fn prologue(spec: &LexSpec, settings: &GeneratorSettings) -> Result<String> {
    if let Some(dir) = &settings.template_dir {
        if let Some(text) = read_template(dir, "prologue.tmpl")? {
            return Ok(text);
        }
    }
    if !spec.prologue.is_empty() {
        return Ok(spec.prologue.clone());
    }
    Ok(DEFAULT_PROLOGUE.to_string())
}

fn epilogue(spec: &LexSpec, settings: &GeneratorSettings) -> Result<String> {
    if let Some(dir) = &settings.template_dir {
        if let Some(text) = read_template(dir, "epilogue.tmpl")? {
            return Ok(text);
        }
    }
    if !spec.epilogue.is_empty() {
        return Ok(spec.epilogue.clone());
    }
    Ok(DEFAULT_EPILOGUE.to_string())
}

/// Render the body of the generated driver's `match rule_name { ... }`,
/// one arm per rule, splicing each rule's action string in verbatim. A
/// rule with an empty action just drops the token on the floor — useful
/// for a demo/check-style spec that only wants the token stream, not
/// side effects.
fn render_dispatch(spec: &LexSpec) -> String {
    let mut out = String::new();
    out.push_str("    match rule_name {\n");
    for rule in &spec.rules {
        out.push_str(&format!("        {:?} => {{\n", rule.name));
        if rule.action.trim().is_empty() {
            out.push_str("            let _ = &token;\n");
        } else {
            for line in rule.action.lines() {
                out.push_str("            ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str("        }\n");
    }
    out.push_str("        other => panic!(\"generated driver: no dispatch arm for rule {other}\"),\n");
    out.push_str("    }\n");
    out
}

fn render_driver(name: &str, spec: &LexSpec, prologue: &str, epilogue: &str) -> String {
    let dispatch = render_dispatch(spec);
    let spec_json = serde_json::to_string(spec).unwrap_or_default();
    format!(
        r#"{prologue}
// Driver for lexer `{name}`, generated from a `LexSpec`.

use utf8lex_core::{{BufferChain, ByteString, LexOutcome, State}};
use utf8lex_gen::build::build_definition_set;
use utf8lex_gen::spec::LexSpec;

const SPEC_JSON: &str = r###"{spec_json}"###;

pub fn run(input: &str) -> utf8lex_util::Result<()> {{
    let spec: LexSpec = serde_json::from_str(SPEC_JSON).expect("embedded spec is valid JSON");
    let (defs, rules) = build_definition_set(&spec).expect("embedded spec builds cleanly");

    let mut state = State::new();
    state.append(ByteString::from_str(input), true)?;

    loop {{
        match utf8lex_core::lex(&mut state, &rules, &defs)? {{
            LexOutcome::Token(token) => {{
                let rule = rules.find_by_id(token.rule_id)?;
                let rule_name = rule.name.as_str();
{dispatch}
            }}
            LexOutcome::Eof => break,
            LexOutcome::More => {{
                panic!("generated driver: ran out of input mid-match; caller must append another buffer before EOF");
            }}
            LexOutcome::NoMatch => {{
                panic!("generated driver: no rule matched at the current position");
            }}
        }}
    }}
    Ok(())
}}
{epilogue}
"#,
        prologue = prologue,
        name = name,
        spec_json = spec_json.replace("\"###", "\\\"###"),
        dispatch = dispatch,
        epilogue = epilogue,
    )
}

/// Build and write the generated driver source file, returning its path.
pub fn generate(spec: &LexSpec, settings: &GeneratorSettings) -> Result<PathBuf> {
    // Fail fast on a spec that can't actually be built, before writing
    // anything — a generated file that doesn't compile is worse than no
    // file at all.
    crate::build::build_definition_set(spec)?;

    let prologue_text = prologue(spec, settings)?;
    let epilogue_text = epilogue(spec, settings)?;
    let source = render_driver(&settings.name, spec, &prologue_text, &epilogue_text);

    fs::create_dir_all(&settings.generated_dir)
        .map_err(|source| GenError::Write { path: settings.generated_dir.clone(), source })?;
    let output_path = settings.output_path();
    fs::write(&output_path, source).map_err(|source| GenError::Write { path: output_path.clone(), source })?;
    info!(path = %output_path.display(), "generated lexer driver");
    Ok(output_path)
}
