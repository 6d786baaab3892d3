//! `Multi`: SEQUENCE and OR composition over named [`Reference`]s (§4.F).

use std::collections::HashMap;

use utf8lex_util::{ErrorCode, Result, Utf8LexError};

use super::{DefId, Definition, MatchContext, MatchOutcome, MatchSpan};
use crate::unit::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiKind {
    Sequence,
    Or,
}

/// A by-name, bounded-repetition link from a `Multi` to another
/// `Definition`. Unresolved until [`DefinitionSet::resolve`](super::DefinitionSet::resolve)
/// binds `target`.
#[derive(Debug, Clone)]
pub struct Reference {
    pub name: String,
    pub min: usize,
    pub max: Option<usize>,
    pub target: ReferenceTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTarget {
    Unresolved,
    Resolved(DefId),
}

impl Reference {
    /// A reference matched exactly once (the common case: `{NAME}` with no
    /// explicit repetition).
    pub fn once(name: impl Into<String>) -> Self {
        Self { name: name.into(), min: 1, max: Some(1), target: ReferenceTarget::Unresolved }
    }

    pub fn bounded(name: impl Into<String>, min: usize, max: Option<usize>) -> Self {
        Self { name: name.into(), min, max, target: ReferenceTarget::Unresolved }
    }
}

#[derive(Debug, Clone)]
pub struct Multi {
    pub kind: MultiKind,
    pub references: Vec<Reference>,
    /// An owned, named inner definition list that scopes this Multi's own
    /// child Multis (§4.F, §3 "an owned inner definition list"). Consumed
    /// and flattened into [`DefinitionSet`](super::DefinitionSet)'s global
    /// storage during [`DefinitionSet::resolve`](super::DefinitionSet::resolve);
    /// empty for a Multi with no nested local definitions.
    pub inner: Vec<(String, Definition)>,
    resolved: bool,
}

impl Multi {
    pub fn sequence(references: Vec<Reference>) -> Self {
        Self { kind: MultiKind::Sequence, references, inner: Vec::new(), resolved: false }
    }

    pub fn alternation(references: Vec<Reference>) -> Self {
        Self { kind: MultiKind::Or, references, inner: Vec::new(), resolved: false }
    }

    /// A sequence with its own scoped inner definitions (inner lists are
    /// searched before the toplevel `DefinitionSet` during resolution).
    pub fn sequence_with_inner(references: Vec<Reference>, inner: Vec<(String, Definition)>) -> Self {
        Self { kind: MultiKind::Sequence, references, inner, resolved: false }
    }

    /// An alternation with its own scoped inner definitions.
    pub fn alternation_with_inner(references: Vec<Reference>, inner: Vec<(String, Definition)>) -> Self {
        Self { kind: MultiKind::Or, references, inner, resolved: false }
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Phase two, step one (§4.F): bind every reference's name to a
    /// `DefId`, walking the enclosing scope chain innermost-first (this
    /// Multi's own flattened inner list, then each ancestor's, then the
    /// toplevel `DefinitionSet`). Idempotent.
    pub fn resolve(mut self, scope_chain: &[&HashMap<String, DefId>]) -> Result<Self> {
        if self.resolved {
            return Ok(self);
        }
        for reference in &mut self.references {
            if reference.target == ReferenceTarget::Unresolved {
                let id = scope_chain
                    .iter()
                    .find_map(|scope| scope.get(&reference.name).copied())
                    .ok_or_else(|| {
                        Utf8LexError::new(ErrorCode::NotFound, format!("unresolved reference: {}", reference.name))
                    })?;
                reference.target = ReferenceTarget::Resolved(id);
            }
        }
        self.resolved = true;
        Ok(self)
    }

    pub fn try_match(&self, ctx: &MatchContext) -> Result<MatchOutcome> {
        match self.kind {
            MultiKind::Sequence => self.try_match_sequence(ctx, 0, ctx.start_offset),
            MultiKind::Or => self.try_match_or(ctx),
        }
    }

    /// OR: first alternative that fully matches wins, ties broken by
    /// declaration order, never by length (§4.F, property verified by §8 S2
    /// style scenarios at the rule-list level).
    fn try_match_or(&self, ctx: &MatchContext) -> Result<MatchOutcome> {
        let mut saw_more = false;
        for reference in &self.references {
            let target = resolved_target(reference)?;
            let sub_ctx = MatchContext { chain: ctx.chain, start_offset: ctx.start_offset, defs: ctx.defs };
            match ctx.defs.get(target).try_match(&sub_ctx)? {
                MatchOutcome::Matched(span) => return Ok(MatchOutcome::Matched(span)),
                MatchOutcome::More => saw_more = true,
                MatchOutcome::NoMatch => {}
            }
        }
        if saw_more {
            return Ok(MatchOutcome::More);
        }
        Ok(MatchOutcome::NoMatch)
    }

    /// SEQUENCE: references matched in order, each greedily as many times
    /// as possible up to its `max`, backtracking down to `min` when a
    /// later reference in the sequence can't be satisfied (§4.F).
    fn try_match_sequence(&self, ctx: &MatchContext, index: usize, offset: u64) -> Result<MatchOutcome> {
        if index == self.references.len() {
            return Ok(MatchOutcome::Matched(MatchSpan { bytes: 0, location: Location::init() }));
        }

        let reference = &self.references[index];
        let target = resolved_target(reference)?;

        let mut reps: Vec<MatchSpan> = Vec::new();
        let mut offset_cursor = offset;
        let mut saw_more = false;

        loop {
            if reference.max.is_some_and(|max| reps.len() >= max) {
                break;
            }
            let sub_ctx = MatchContext { chain: ctx.chain, start_offset: offset_cursor, defs: ctx.defs };
            match ctx.defs.get(target).try_match(&sub_ctx)? {
                MatchOutcome::Matched(span) => {
                    offset_cursor += span.bytes as u64;
                    reps.push(span);
                }
                MatchOutcome::More => {
                    saw_more = true;
                    break;
                }
                MatchOutcome::NoMatch => break,
            }
        }

        // Greedy-longest-first: try the largest rep count first, backtrack
        // toward `min` if the rest of the sequence can't be completed.
        while reps.len() >= reference.min {
            let consumed: usize = reps.iter().map(|s| s.bytes).sum();
            match self.try_match_sequence(ctx, index + 1, offset + consumed as u64)? {
                MatchOutcome::Matched(rest) => {
                    let mut location = Location::init();
                    for rep in &reps {
                        fold_location(&mut location, &rep.location);
                    }
                    fold_location(&mut location, &rest.location);
                    return Ok(MatchOutcome::Matched(MatchSpan { bytes: consumed + rest.bytes, location }));
                }
                MatchOutcome::More => return Ok(MatchOutcome::More),
                MatchOutcome::NoMatch => {
                    if reps.is_empty() {
                        break;
                    }
                    reps.pop();
                }
            }
        }

        if saw_more && reps.len() < reference.min {
            return Ok(MatchOutcome::More);
        }
        Ok(MatchOutcome::NoMatch)
    }
}

fn resolved_target(reference: &Reference) -> Result<DefId> {
    match reference.target {
        ReferenceTarget::Resolved(id) => Ok(id),
        ReferenceTarget::Unresolved => {
            Err(Utf8LexError::new(ErrorCode::NotFound, format!("reference {} used before resolution", reference.name)))
        }
    }
}

/// Fold a sub-match's relative `Location` onto a running total by
/// re-accumulating its grapheme-level contributions. Byte/char/grapheme
/// lengths and line counts add directly; `after` and hash values come
/// along for the ride on the final grapheme rather than being re-derived,
/// since the engine only needs accurate lengths and line-reset behavior
/// out of a composed Multi token.
fn fold_location(total: &mut Location, part: &Location) {
    total.byte.length += part.byte.length;
    total.byte.hash = total.byte.hash.wrapping_add(part.byte.hash);
    total.char.length += part.char.length;
    total.char.hash = total.char.hash.wrapping_add(part.char.hash);
    total.grapheme.length += part.grapheme.length;
    total.grapheme.hash = total.grapheme.hash.wrapping_add(part.grapheme.hash);
    total.line.length += part.line.length;
    total.line.hash = total.line.hash.wrapping_add(part.line.hash);
    if part.char.after.is_some() {
        total.char.after = Some(0);
        total.grapheme.after = Some(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferChain, ByteString};
    use crate::category::Category;
    use crate::definition::{ClassCat, Definition, DefinitionSet, Literal};

    fn chain_of(s: &str) -> BufferChain {
        let mut chain = BufferChain::new();
        chain.append(ByteString::from_str(s), true).unwrap();
        chain
    }

    fn build_arithmetic_defs() -> DefinitionSet {
        let mut defs = DefinitionSet::new();
        defs.insert("NUMBER", Definition::ClassCat(ClassCat::new(Category::ND, 1, None))).unwrap();
        defs.insert("ID", Definition::ClassCat(ClassCat::new(Category::LETTER, 1, None))).unwrap();
        defs.insert("SPACE", Definition::ClassCat(ClassCat::new(Category::WHITESPACE, 1, None))).unwrap();
        defs.insert("EQUALS3", Definition::Literal(Literal::new("===").unwrap())).unwrap();
        defs.insert("EQUALS", Definition::Literal(Literal::new("=").unwrap())).unwrap();
        defs.insert("PLUS", Definition::Literal(Literal::new("+").unwrap())).unwrap();
        defs.insert("MINUS", Definition::Literal(Literal::new("-").unwrap())).unwrap();
        defs
    }

    #[test]
    fn or_picks_first_matching_alternative_in_order() {
        let mut defs = build_arithmetic_defs();
        let operator = Multi::alternation(vec![
            Reference::once("EQUALS3"),
            Reference::once("EQUALS"),
            Reference::once("PLUS"),
            Reference::once("MINUS"),
        ]);
        defs.insert("OPERATOR", Definition::Multi(operator)).unwrap();
        defs.resolve().unwrap();

        let chain = chain_of("=ab");
        let ctx = MatchContext { chain: &chain, start_offset: 0, defs: &defs };
        match defs.get(defs.find_by_name("OPERATOR").unwrap()).try_match(&ctx).unwrap() {
            MatchOutcome::Matched(span) => assert_eq!(span.bytes, 1),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn sequence_matches_all_parts_in_order() {
        let mut defs = build_arithmetic_defs();
        let declaration =
            Multi::sequence(vec![Reference::once("ID"), Reference::once("SPACE"), Reference::once("ID")]);
        defs.insert("DECLARATION", Definition::Multi(declaration)).unwrap();
        defs.resolve().unwrap();

        let chain = chain_of("foo bar+7");
        let ctx = MatchContext { chain: &chain, start_offset: 0, defs: &defs };
        match defs.get(defs.find_by_name("DECLARATION").unwrap()).try_match(&ctx).unwrap() {
            MatchOutcome::Matched(span) => assert_eq!(span.bytes, "foo bar".len()),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn nested_multi_composes_into_one_token() {
        let mut defs = build_arithmetic_defs();
        defs.insert("OPERATOR", Definition::Multi(Multi::alternation(vec![
            Reference::once("EQUALS3"),
            Reference::once("EQUALS"),
            Reference::once("PLUS"),
            Reference::once("MINUS"),
        ])))
        .unwrap();
        defs.insert("OPERAND", Definition::Multi(Multi::alternation(vec![
            Reference::once("NUMBER"),
            Reference::once("ID"),
        ])))
        .unwrap();
        defs.insert("DECLARATION", Definition::Multi(Multi::sequence(vec![
            Reference::once("ID"),
            Reference::once("SPACE"),
            Reference::once("ID"),
        ])))
        .unwrap();
        defs.insert("EXPRESSION", Definition::Multi(Multi::sequence(vec![
            Reference::once("DECLARATION"),
            Reference::once("SPACE"),
            Reference::once("OPERATOR"),
            Reference::once("SPACE"),
            Reference::once("OPERAND"),
        ])))
        .unwrap();
        defs.resolve().unwrap();

        let input = "foo bar + 7";
        let chain = chain_of(input);
        let ctx = MatchContext { chain: &chain, start_offset: 0, defs: &defs };
        match defs.get(defs.find_by_name("EXPRESSION").unwrap()).try_match(&ctx).unwrap() {
            MatchOutcome::Matched(span) => assert_eq!(span.bytes, input.len()),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn unresolved_reference_is_an_error() {
        let defs = DefinitionSet::new();
        let multi = Multi::alternation(vec![Reference::once("MISSING")]);
        let chain = chain_of("x");
        let ctx = MatchContext { chain: &chain, start_offset: 0, defs: &defs };
        let err = multi.try_match(&ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn inner_definitions_are_found_before_toplevel_definitions_of_the_same_name() {
        let mut defs = DefinitionSet::new();
        // Toplevel ID means "any letter run".
        defs.insert("ID", Definition::ClassCat(ClassCat::new(Category::LETTER, 1, None))).unwrap();

        // This Multi owns its own inner "ID", meaning "any digit run"
        // instead; resolution must prefer the inner scope over the
        // toplevel name of the same name (§4.F scope-chain walk).
        let shadowing = Multi::sequence_with_inner(
            vec![Reference::once("ID")],
            vec![("ID".to_string(), Definition::ClassCat(ClassCat::new(Category::ND, 1, None)))],
        );
        defs.insert("SHADOWED", Definition::Multi(shadowing)).unwrap();
        defs.resolve().unwrap();

        let chain = chain_of("123abc");
        let ctx = MatchContext { chain: &chain, start_offset: 0, defs: &defs };
        match defs.get(defs.find_by_name("SHADOWED").unwrap()).try_match(&ctx).unwrap() {
            MatchOutcome::Matched(span) => assert_eq!(span.bytes, 3),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn sibling_multi_without_inner_still_resolves_against_toplevel() {
        let mut defs = DefinitionSet::new();
        defs.insert("ID", Definition::ClassCat(ClassCat::new(Category::LETTER, 1, None))).unwrap();
        let plain = Multi::sequence(vec![Reference::once("ID")]);
        defs.insert("PLAIN", Definition::Multi(plain)).unwrap();
        defs.resolve().unwrap();

        let chain = chain_of("abc123");
        let ctx = MatchContext { chain: &chain, start_offset: 0, defs: &defs };
        match defs.get(defs.find_by_name("PLAIN").unwrap()).try_match(&ctx).unwrap() {
            MatchOutcome::Matched(span) => assert_eq!(span.bytes, 3),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn nested_inner_multi_sees_grandparent_scope_when_not_shadowed() {
        let mut defs = DefinitionSet::new();
        defs.insert("SPACE", Definition::ClassCat(ClassCat::new(Category::WHITESPACE, 1, None))).unwrap();

        // An inner Multi ("INNER") nested inside another inner definition
        // of an outer Multi ("OUTER"); INNER's own Reference to "SPACE"
        // isn't shadowed anywhere in the chain, so it must fall through
        // past its own (empty) scope and OUTER's inner scope to the
        // toplevel definition.
        let inner_multi = Multi::sequence(vec![Reference::once("SPACE")]);
        let outer = Multi::sequence_with_inner(
            vec![Reference::once("INNER")],
            vec![("INNER".to_string(), Definition::Multi(inner_multi))],
        );
        defs.insert("OUTER", Definition::Multi(outer)).unwrap();
        defs.resolve().unwrap();

        let chain = chain_of("   ");
        let ctx = MatchContext { chain: &chain, start_offset: 0, defs: &defs };
        match defs.get(defs.find_by_name("OUTER").unwrap()).try_match(&ctx).unwrap() {
            MatchOutcome::Matched(span) => assert_eq!(span.bytes, 3),
            other => panic!("{other:?}"),
        }
    }
}
