//! Definitions (§4.E/§4.F): the polymorphic pattern variants a [`Rule`](crate::rule::Rule)
//! dispatches to, plus the two-phase name resolution that turns a tree of
//! named [`Reference`]s into direct handles.
//!
//! `faxc_lex` hand-writes one module per fixed grammar construct
//! (`lexer/identifier.rs`, `lexer/number.rs`, ...); this crate instead
//! models the same idea — "a chunk of input matches a kind of pattern" —
//! as data, so a `Rule` set can be built at runtime instead of compiled in.
//! Dispatch stays a tagged `match`, per the design note on avoiding a
//! vtable-by-first-field translation of the original C union.

mod class_cat;
mod literal;
mod multi;
mod regex_matcher;

pub use class_cat::ClassCat;
pub use literal::Literal;
pub use multi::{Multi, MultiKind, Reference, ReferenceTarget};
pub use regex_matcher::RegexDef;

use std::collections::HashMap;

use utf8lex_util::{define_idx, ErrorCode, IndexVec, Result, Utf8LexError};

use crate::buffer::BufferChain;
use crate::unit::Location;

define_idx!(DefId);

/// One grapheme/byte span successfully matched by a [`Definition`].
#[derive(Debug, Clone)]
pub struct MatchSpan {
    pub bytes: usize,
    /// Accumulated *relative* to the match's own start (i.e. a fresh
    /// `Location::init()` advanced only by the graphemes this match
    /// consumed), so the caller can fold it onto the running token
    /// location.
    pub location: Location,
}

/// What a [`Definition::try_match`] call can report.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Matched(MatchSpan),
    NoMatch,
    /// Not enough buffered input to decide; the caller must append another
    /// buffer and retry from the same offset.
    More,
}

/// Everything a matcher needs to attempt a match at one cursor.
pub struct MatchContext<'a> {
    pub chain: &'a BufferChain,
    pub start_offset: u64,
    pub defs: &'a DefinitionSet,
}

/// The polymorphic pattern variant (§3 `Definition`).
#[derive(Debug, Clone)]
pub enum Definition {
    ClassCat(ClassCat),
    Literal(Literal),
    Regex(RegexDef),
    Multi(Multi),
}

impl Definition {
    pub fn try_match(&self, ctx: &MatchContext) -> Result<MatchOutcome> {
        match self {
            Definition::ClassCat(d) => d.try_match(ctx),
            Definition::Literal(d) => d.try_match(ctx),
            Definition::Regex(d) => d.try_match(ctx),
            Definition::Multi(d) => d.try_match(ctx),
        }
    }

}

/// A bounded DFS depth cap for cycle detection during resolution (§4.F,
/// `UTF8LEX_DEFINITIONS_DB_LENGTH_MAX`). Chosen generously above any
/// plausible nesting depth for a hand-written rule set.
pub const MAX_RESOLUTION_DEPTH: usize = 4096;

/// The owned, indexable set of [`Definition`]s built at spec-load time and
/// resolved once before the first token is lexed.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    defs: IndexVec<DefId, Definition>,
    names: HashMap<String, DefId>,
    resolved: bool,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named definition. Names must be unique within a set.
    pub fn insert(&mut self, name: impl Into<String>, def: Definition) -> Result<DefId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(Utf8LexError::new(ErrorCode::NotFound, format!("definition name already used: {name}")));
        }
        let id = self.defs.push(def);
        self.names.insert(name, id);
        Ok(id)
    }

    pub fn get(&self, id: DefId) -> &Definition {
        &self.defs[id]
    }

    pub fn find_by_name(&self, name: &str) -> Option<DefId> {
        self.names.get(name).copied()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Phase two of §4.F: flatten every Multi's owned inner definition list
    /// into global storage (assigning each a `DefId`), bind every
    /// [`Reference`] by walking the enclosing scope chain innermost-first
    /// (§3 "an owned inner definition list that scopes child Multis";
    /// §4.F "inner lists first, then the toplevel definitions list"), then
    /// verify the resulting graph is acyclic. A no-op (idempotent, property
    /// 5) if already resolved.
    pub fn resolve(&mut self) -> Result<()> {
        if self.resolved {
            return Ok(());
        }
        let toplevel_ids: Vec<DefId> = self.defs.indices().collect();

        // Phase 2a: flatten every toplevel Multi's inner definitions into
        // `self.defs`, recording the scope chain each flattened-in (and
        // each toplevel) Multi must search its own References against.
        let mut scopes: HashMap<DefId, Vec<HashMap<String, DefId>>> = HashMap::new();
        for id in &toplevel_ids {
            if matches!(self.defs[*id], Definition::Multi(_)) {
                flatten_multi_inner(&mut self.defs, &mut scopes, *id, &[])?;
            }
        }

        // Phase 2b: bind every Reference now that all inner definitions
        // (at every nesting depth) have a `DefId`.
        let all_ids: Vec<DefId> = self.defs.indices().collect();
        for id in &all_ids {
            if let Definition::Multi(multi) = self.defs[*id].clone() {
                if !multi.is_resolved() {
                    let chain: Vec<&HashMap<String, DefId>> = scopes
                        .get(id)
                        .map(|maps| maps.iter().collect())
                        .unwrap_or_default();
                    let mut full_chain = chain;
                    full_chain.push(&self.names);
                    let resolved_multi = multi.resolve(&full_chain)?;
                    self.defs[*id] = Definition::Multi(resolved_multi);
                }
            }
        }

        for id in &all_ids {
            if let Definition::Multi(_) = &self.defs[*id] {
                self.check_acyclic(*id, &mut Vec::new())?;
            }
        }
        self.resolved = true;
        Ok(())
    }

    fn check_acyclic(&self, id: DefId, stack: &mut Vec<DefId>) -> Result<()> {
        if stack.len() > MAX_RESOLUTION_DEPTH {
            return Err(Utf8LexError::new(ErrorCode::InfiniteLoop, "definition graph exceeds the maximum resolution depth"));
        }
        if stack.contains(&id) {
            return Err(Utf8LexError::new(ErrorCode::InfiniteLoop, "definition graph contains a cycle"));
        }
        if let Definition::Multi(multi) = self.get(id) {
            stack.push(id);
            for reference in multi.references() {
                if let ReferenceTarget::Resolved(target) = reference.target {
                    self.check_acyclic(target, stack)?;
                }
            }
            stack.pop();
        }
        Ok(())
    }
}

/// Recursively takes ownership of `multi_id`'s `inner` list, pushes each
/// entry into global `defs` storage (so it gets a real `DefId` a
/// `Reference` can resolve to), and records the scope chain that `multi_id`
/// (and every Multi nested inside its inner list) must search: its own
/// flattened inner names first, then everything in `enclosing_chain`
/// (outer Multis' inner lists, innermost-of-those first).
fn flatten_multi_inner(
    defs: &mut IndexVec<DefId, Definition>,
    scopes: &mut HashMap<DefId, Vec<HashMap<String, DefId>>>,
    multi_id: DefId,
    enclosing_chain: &[HashMap<String, DefId>],
) -> Result<()> {
    let inner = match &mut defs[multi_id] {
        Definition::Multi(m) => std::mem::take(&mut m.inner),
        _ => return Ok(()),
    };

    let mut local_names = HashMap::new();
    let mut local_ids = Vec::new();
    for (name, def) in inner {
        if local_names.contains_key(&name) {
            return Err(Utf8LexError::new(ErrorCode::NotFound, format!("inner definition name already used: {name}")));
        }
        let id = defs.push(def);
        local_names.insert(name, id);
        local_ids.push(id);
    }

    let mut own_chain = vec![local_names];
    own_chain.extend(enclosing_chain.iter().cloned());
    scopes.insert(multi_id, own_chain.clone());

    for id in local_ids {
        if matches!(defs[id], Definition::Multi(_)) {
            flatten_multi_inner(defs, scopes, id, &own_chain)?;
        }
    }
    Ok(())
}
