//! Turns a [`LexSpec`] into the `DefinitionSet`/`RuleList` pair the
//! engine actually runs against (§4.J "build the definition set").
//!
//! Grounded on `utf8lex_core::definition::mod`'s own two-phase
//! construction (`insert` every definition, then `resolve` the `Multi`
//! references) — this module is the one place outside `utf8lex-core`
//! itself that drives that same sequence, just sourced from a
//! deserialized spec instead of hand-written `Definition::` calls.

use utf8lex_core::{Category, ClassCat, Definition, DefinitionSet, Literal, Multi, Reference, RegexDef, RuleList};

use crate::error::{GenError, Result};
use crate::spec::{DefSpec, LexSpec, MultiKindSpec};

/// Resolve one category name from a `.l`-file's point of view (a General
/// Category abbreviation like `"Nd"`, or one of the derived group names
/// `utf8lex_core::Category` exposes, like `"Letter"`/`"Whitespace"`).
fn category_by_name(name: &str) -> Result<Category> {
    Ok(match name {
        "Lu" => Category::LU,
        "Ll" => Category::LL,
        "Lt" => Category::LT,
        "Lm" => Category::LM,
        "Lo" => Category::LO,
        "Mn" => Category::MN,
        "Mc" => Category::MC,
        "Me" => Category::ME,
        "Nd" => Category::ND,
        "Nl" => Category::NL,
        "No" => Category::NO,
        "Pc" => Category::PC,
        "Pd" => Category::PD,
        "Ps" => Category::PS,
        "Pe" => Category::PE,
        "Pi" => Category::PI,
        "Pf" => Category::PF,
        "Po" => Category::PO,
        "Sm" => Category::SM,
        "Sc" => Category::SC,
        "Sk" => Category::SK,
        "So" => Category::SO,
        "Zs" => Category::ZS,
        "Zl" => Category::ZL,
        "Zp" => Category::ZP,
        "Cc" => Category::CC,
        "Cf" => Category::CF,
        "Cs" => Category::CS,
        "Co" => Category::CO,
        "Cn" => Category::CN,
        "SepLineExt" => Category::SEP_LINE_EXT,
        "Letter" => Category::LETTER,
        "Mark" => Category::MARK,
        "Number" => Category::NUMBER,
        "Punct" => Category::PUNCT,
        "Symbol" => Category::SYMBOL,
        "Whitespace" => Category::WHITESPACE,
        "Other" => Category::OTHER,
        other => return Err(GenError::UnknownCategory(other.to_string())),
    })
}

fn categories_union(names: &[String]) -> Result<Category> {
    let mut mask = Category::EMPTY;
    for name in names {
        mask = mask.union(category_by_name(name)?);
    }
    Ok(mask)
}

/// Phase one: insert every `DefSpec` as a `Definition`, `Multi` references
/// included but left unresolved.
fn insert_definitions(defs: &mut DefinitionSet, spec: &LexSpec) -> Result<()> {
    for def_spec in &spec.definitions {
        let definition = match def_spec {
            DefSpec::ClassCat { categories, min, max, .. } => {
                Definition::ClassCat(ClassCat::new(categories_union(categories)?, *min, *max))
            }
            DefSpec::Literal { text, .. } => Definition::Literal(Literal::new(text.clone())?),
            DefSpec::Regex { pattern, .. } => Definition::Regex(RegexDef::new(pattern)?),
            DefSpec::Multi { kind, references, .. } => {
                let refs: Vec<Reference> = references
                    .iter()
                    .map(|r| Reference::bounded(r.name.clone(), r.min, r.max))
                    .collect();
                Definition::Multi(match kind {
                    MultiKindSpec::Sequence => Multi::sequence(refs),
                    MultiKindSpec::Or => Multi::alternation(refs),
                })
            }
        };
        defs.insert(def_spec.name(), definition)?;
    }
    Ok(())
}

/// Build a resolved `DefinitionSet` and its `RuleList` from a `LexSpec`.
///
/// Two-phase per §4.F: every definition is inserted before any `Multi` is
/// resolved, so forward references (a rule defined before the definitions
/// it names) are legal.
pub fn build_definition_set(spec: &LexSpec) -> Result<(DefinitionSet, RuleList)> {
    let mut defs = DefinitionSet::new();
    insert_definitions(&mut defs, spec)?;
    defs.resolve()?;

    let mut rules = RuleList::new();
    for rule_spec in &spec.rules {
        let def_id = defs.find_by_name(&rule_spec.definition).ok_or_else(|| GenError::UnknownRuleDefinition {
            rule: rule_spec.name.clone(),
            definition: rule_spec.definition.clone(),
        })?;
        rules.push(rule_spec.name.clone(), def_id, rule_spec.action.clone());
    }
    Ok((defs, rules))
}
