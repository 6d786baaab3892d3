//! End-to-end coverage of the engine's documented scenarios and quantified
//! properties: every rule set here is built the way a generated driver
//! would build one (a `DefinitionSet` plus a `RuleList`, resolved once,
//! then driven through repeated `lex` calls), not through the individual
//! matcher unit tests already covered alongside each module.

use proptest::prelude::*;

use crate::buffer::ByteString;
use crate::category::Category;
use crate::definition::{ClassCat, Definition, DefinitionSet, Literal, Multi, Reference, RegexDef};
use crate::engine::{lex, LexOutcome};
use crate::rule::RuleList;
use crate::state::State;

/// The arithmetic rule set shared by S1/S2/S5/S6: `NUMBER`, `ID`, the three
/// equals-sign variants, `PLUS`, `MINUS`, `SPACE`, in declaration order.
fn arithmetic_rules() -> (DefinitionSet, RuleList) {
    let mut defs = DefinitionSet::new();
    let number = defs.insert("NUMBER", Definition::Regex(RegexDef::new(r"\p{N}+").unwrap())).unwrap();
    let id = defs.insert("ID", Definition::Regex(RegexDef::new(r"[_\p{L}][_\p{L}\p{N}]*").unwrap())).unwrap();
    let equals3 = defs.insert("EQUALS3", Definition::Literal(Literal::new("===").unwrap())).unwrap();
    let equals = defs.insert("EQUALS", Definition::Literal(Literal::new("=").unwrap())).unwrap();
    let plus = defs.insert("PLUS", Definition::Literal(Literal::new("+").unwrap())).unwrap();
    let minus = defs.insert("MINUS", Definition::Literal(Literal::new("-").unwrap())).unwrap();
    let space = defs.insert("SPACE", Definition::ClassCat(ClassCat::new(Category::WHITESPACE, 1, None))).unwrap();

    let mut rules = RuleList::new();
    rules.push("NUMBER", number, "");
    rules.push("ID", id, "");
    rules.push("EQUALS3", equals3, "");
    rules.push("EQUALS", equals, "");
    rules.push("PLUS", plus, "");
    rules.push("MINUS", minus, "");
    rules.push("SPACE", space, "");
    (defs, rules)
}

fn lex_all(state: &mut State, rules: &RuleList, defs: &DefinitionSet) -> Vec<(String, String)> {
    let mut out = Vec::new();
    loop {
        match lex(state, rules, defs).unwrap() {
            LexOutcome::Token(t) => {
                let rule = rules.find_by_id(t.rule_id).unwrap();
                out.push((rule.name.clone(), format!("{}..{}", t.byte_start, t.byte_end)));
            }
            LexOutcome::Eof => {
                out.push(("EOF".to_string(), String::new()));
                return out;
            }
            LexOutcome::More => panic!("unexpected MORE with a fully-buffered, EOF-terminated input"),
            LexOutcome::NoMatch => panic!("unexpected NO_MATCH"),
        }
    }
}

/// S1. ASCII arithmetic: `"x = 12+3"` tokenizes to ID, SPACE, EQUALS,
/// SPACE, NUMBER, PLUS, NUMBER, EOF.
#[test]
fn s1_ascii_arithmetic() {
    let (defs, rules) = arithmetic_rules();
    let mut state = State::new();
    state.append(ByteString::from_str("x = 12+3"), true).unwrap();

    let names: Vec<&str> = lex_all(&mut state, &rules, &defs).iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["ID", "SPACE", "EQUALS", "SPACE", "NUMBER", "PLUS", "NUMBER", "EOF"]);
}

/// S2. `"a===b"` must prefer the longest-matching `EQUALS3` over `EQUALS`.
#[test]
fn s2_three_equals_precedence() {
    let (defs, rules) = arithmetic_rules();
    let mut state = State::new();
    state.append(ByteString::from_str("a===b"), true).unwrap();

    let names: Vec<&str> = lex_all(&mut state, &rules, &defs).iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["ID", "EQUALS3", "ID", "EOF"]);
}

/// S3. A single Hebrew grapheme built from three combining codepoints:
/// byte.length=6, char.length=3, grapheme.length=1, line.length=0.
#[test]
fn s3_grapheme_counting() {
    use crate::buffer::BufferChain;
    use crate::reader::{read_grapheme, ReadOutcome};

    let word = "\u{05D4}\u{05B7}\u{05BD}"; // he, patah, meteg
    assert_eq!(word.len(), 6);
    let mut chain = BufferChain::new();
    chain.append(ByteString::from_str(word), true).unwrap();

    match read_grapheme(&chain, 0).unwrap() {
        ReadOutcome::Ok(g) => {
            assert_eq!(g.bytes, 6);
            assert_eq!(g.codepoints.len(), 3);
            assert!(!g.is_line_break);
        }
        other => panic!("{other:?}"),
    }
}

/// S4. `"a\r\nb"`: two ID tokens around one CRLF whitespace token; the
/// line counter advances and char/grapheme restart at zero afterwards.
#[test]
fn s4_crlf() {
    let (defs, rules) = arithmetic_rules();
    let mut state = State::new();
    state.append(ByteString::from_str("a\r\nb"), true).unwrap();

    let first = lex(&mut state, &rules, &defs).unwrap();
    assert!(matches!(first, LexOutcome::Token(ref t) if rules.find_by_id(t.rule_id).unwrap().name == "ID"));

    let second = lex(&mut state, &rules, &defs).unwrap();
    match second {
        LexOutcome::Token(t) => {
            assert_eq!(rules.find_by_id(t.rule_id).unwrap().name, "SPACE");
            assert_eq!(t.location.line.length, 1);
        }
        other => panic!("{other:?}"),
    }

    let third = lex(&mut state, &rules, &defs).unwrap();
    match third {
        LexOutcome::Token(t) => {
            assert_eq!(rules.find_by_id(t.rule_id).unwrap().name, "ID");
            assert_eq!(t.location.char.start, 0);
            assert_eq!(t.location.grapheme.start, 0);
            assert_eq!(t.location.line.start, 1);
        }
        other => panic!("{other:?}"),
    }
}

/// S5. A `Multi`-of-`Multi`s grammar — `EXPRESSION = DECLARATION SPACE
/// OPERATOR SPACE OPERAND` — matches `"foo bar + 7"` as one token covering
/// the whole input (see DESIGN.md's Open Question decision on the explicit
/// `SPACE` references this requires).
#[test]
fn s5_multi_definition_alternation() {
    let mut defs = DefinitionSet::new();
    defs.insert("NUMBER", Definition::Regex(RegexDef::new(r"\p{N}+").unwrap())).unwrap();
    defs.insert("ID", Definition::Regex(RegexDef::new(r"[_\p{L}][_\p{L}\p{N}]*").unwrap())).unwrap();
    defs.insert("SPACE", Definition::ClassCat(ClassCat::new(Category::WHITESPACE, 1, None))).unwrap();
    defs.insert("EQUALS3", Definition::Literal(Literal::new("===").unwrap())).unwrap();
    defs.insert("EQUALS", Definition::Literal(Literal::new("=").unwrap())).unwrap();
    defs.insert("PLUS", Definition::Literal(Literal::new("+").unwrap())).unwrap();
    defs.insert("MINUS", Definition::Literal(Literal::new("-").unwrap())).unwrap();
    defs.insert(
        "OPERATOR",
        Definition::Multi(Multi::alternation(vec![
            Reference::once("EQUALS3"),
            Reference::once("EQUALS"),
            Reference::once("PLUS"),
            Reference::once("MINUS"),
        ])),
    )
    .unwrap();
    defs.insert(
        "OPERAND",
        Definition::Multi(Multi::alternation(vec![Reference::once("NUMBER"), Reference::once("ID")])),
    )
    .unwrap();
    defs.insert(
        "DECLARATION",
        Definition::Multi(Multi::sequence(vec![
            Reference::once("ID"),
            Reference::once("SPACE"),
            Reference::once("ID"),
        ])),
    )
    .unwrap();
    let expression_id = defs
        .insert(
            "EXPRESSION",
            Definition::Multi(Multi::sequence(vec![
                Reference::once("DECLARATION"),
                Reference::once("SPACE"),
                Reference::once("OPERATOR"),
                Reference::once("SPACE"),
                Reference::once("OPERAND"),
            ])),
        )
        .unwrap();
    defs.resolve().unwrap();

    let mut rules = RuleList::new();
    rules.push("EXPRESSION", expression_id, "");

    let input = "foo bar + 7";
    let mut state = State::new();
    state.append(ByteString::from_str(input), true).unwrap();

    match lex(&mut state, &rules, &defs).unwrap() {
        LexOutcome::Token(t) => {
            assert_eq!(rules.find_by_id(t.rule_id).unwrap().name, "EXPRESSION");
            assert_eq!(t.byte_start, 0);
            assert_eq!(t.byte_end, input.len() as u64);
        }
        other => panic!("{other:?}"),
    }
}

/// S6. `"==="` fed as `"=="` (not EOF) then `"="` (EOF, the literal split
/// the scenario names): the first `lex` call must return `MORE` even
/// though the shorter `EQUALS` literal fully matches within `"=="`.
#[test]
fn s6_more_resume() {
    let (defs, rules) = arithmetic_rules();
    let mut state = State::new();
    state.append(ByteString::from_str("=="), false).unwrap();
    assert!(matches!(lex(&mut state, &rules, &defs).unwrap(), LexOutcome::More));

    state.append(ByteString::from_str("="), true).unwrap();
    match lex(&mut state, &rules, &defs).unwrap() {
        LexOutcome::Token(t) => {
            assert_eq!(rules.find_by_id(t.rule_id).unwrap().name, "EQUALS3");
            assert_eq!(t.byte_end, 3);
        }
        other => panic!("{other:?}"),
    }
}

/// S7. Bounded escape of `"\t\n\"\\\x01"` at capacity 16 fits whole; a
/// tighter capacity reports the incomplete flag rather than splitting an
/// escape sequence (the finer-grained boundary cases live in
/// `printable.rs`'s own tests).
#[test]
fn s7_printable_escape() {
    use crate::printable::escape_bounded;
    let input = [b'\t', b'\n', b'"', b'\\', 0x01];
    let (rendered, complete) = escape_bounded(&input, 16);
    assert_eq!(rendered, "\\t\\n\\\"\\\\\\x01");
    assert!(complete);
}

proptest! {
    /// Property 1: walking a whole string with `read_grapheme` consumes
    /// every byte exactly once, each cluster at least 1 byte.
    #[test]
    fn prop1_grapheme_walk_covers_every_byte(s in "\\PC{0,40}") {
        use crate::buffer::BufferChain;
        use crate::reader::{read_grapheme, ReadOutcome};

        let mut chain = BufferChain::new();
        chain.append(ByteString::from_str(&s), true).unwrap();

        let mut offset = 0u64;
        loop {
            match read_grapheme(&chain, offset).unwrap() {
                ReadOutcome::Ok(g) => {
                    prop_assert!(g.bytes >= 1);
                    offset += g.bytes as u64;
                }
                ReadOutcome::Eof => break,
                ReadOutcome::More => prop_assert!(false, "MORE on a fully-buffered EOF chain"),
            }
        }
        prop_assert_eq!(offset, s.len() as u64);
    }

    /// Property 2: tokens emitted by `lex` over a fully-buffered input
    /// exactly tile a gap-free prefix of the input (no overlap, no holes).
    #[test]
    fn prop2_tokens_cover_a_gap_free_prefix(s in "[a-zA-Z0-9 ]{0,40}") {
        let (defs, rules) = arithmetic_rules();
        let mut state = State::new();
        state.append(ByteString::from_str(&s), true).unwrap();

        let mut expected_start = 0u64;
        loop {
            match lex(&mut state, &rules, &defs).unwrap() {
                LexOutcome::Token(t) => {
                    prop_assert_eq!(t.byte_start, expected_start);
                    prop_assert!(t.byte_end > t.byte_start);
                    expected_start = t.byte_end;
                }
                LexOutcome::Eof => break,
                LexOutcome::NoMatch => break,
                LexOutcome::More => prop_assert!(false, "MORE on a fully-buffered EOF input"),
            }
        }
    }

    /// Property 7: splitting any arithmetic-alphabet input at any byte
    /// boundary and feeding the two halves separately yields the same
    /// token sequence as feeding the whole input at once.
    #[test]
    fn prop7_split_buffer_equivalence(s in "[a-zA-Z0-9 +=-]{1,24}", split_at in 0usize..25) {
        let (defs, rules) = arithmetic_rules();
        let split_at = split_at.min(s.len());

        let mut whole_state = State::new();
        whole_state.append(ByteString::from_str(&s), true).unwrap();
        let whole_tokens = lex_all(&mut whole_state, &rules, &defs);

        let (a, b) = s.split_at(split_at);
        let mut split_state = State::new();
        split_state.append(ByteString::from_str(a), false).unwrap();

        let mut split_tokens = Vec::new();
        loop {
            match lex(&mut split_state, &rules, &defs).unwrap() {
                LexOutcome::Token(t) => {
                    let rule = rules.find_by_id(t.rule_id).unwrap();
                    split_tokens.push((rule.name.clone(), format!("{}..{}", t.byte_start, t.byte_end)));
                }
                LexOutcome::More => break,
                LexOutcome::Eof => {
                    split_tokens.push(("EOF".to_string(), String::new()));
                    break;
                }
                LexOutcome::NoMatch => break,
            }
        }
        split_state.append(ByteString::from_str(b), true).unwrap();
        loop {
            match lex(&mut split_state, &rules, &defs).unwrap() {
                LexOutcome::Token(t) => {
                    let rule = rules.find_by_id(t.rule_id).unwrap();
                    split_tokens.push((rule.name.clone(), format!("{}..{}", t.byte_start, t.byte_end)));
                }
                LexOutcome::Eof => {
                    split_tokens.push(("EOF".to_string(), String::new()));
                    break;
                }
                LexOutcome::NoMatch => break,
                LexOutcome::More => break,
            }
        }

        prop_assert_eq!(whole_tokens, split_tokens);
    }
}
