//! The rule list (§4.G): an ordered, stably-`id`'d list of `{name,
//! definition, action}` records.
//!
//! Grounded on `utf8lex_util::index_vec` (an `IndexVec<RuleId, Rule>`
//! gives exactly the "append-ordered, ids never renumber" list the spec
//! calls for) plus `faxc_util`'s "linear scan, NOT_FOUND on miss" lookup
//! idiom.

use utf8lex_util::{define_idx, ErrorCode, IndexVec, Utf8LexError};

use crate::definition::DefId;

define_idx!(RuleId);

/// One entry in the rule list: a name, the `Definition` it dispatches to,
/// and an opaque action payload the caller interprets after a token is
/// emitted (the engine never runs it).
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub definition: DefId,
    pub action: String,
}

#[derive(Debug, Clone, Default)]
pub struct RuleList {
    rules: IndexVec<RuleId, Rule>,
}

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, definition: DefId, action: impl Into<String>) -> RuleId {
        let name = name.into();
        let action = action.into();
        let next_id = RuleId(self.rules.len() as u32);
        let id = self.rules.push(Rule { id: next_id, name, definition, action });
        id
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter_enumerated().map(|(_, rule)| rule)
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn find_by_id(&self, id: RuleId) -> utf8lex_util::Result<&Rule> {
        self.rules
            .get(id)
            .ok_or_else(|| Utf8LexError::new(ErrorCode::NotFound, format!("no rule with id {}", id.0)))
    }

    pub fn find_by_name(&self, name: &str) -> utf8lex_util::Result<&Rule> {
        self.iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Utf8LexError::new(ErrorCode::NotFound, format!("no rule named {name:?}")))
    }
}
