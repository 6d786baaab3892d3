//! Unicode General Category bitmasks and the derived groups built on top
//! of them.
//!
//! `faxc_lex::unicode` classifies characters with a handful of `bool`
//! predicates (`is_ident_start`, `is_digit_in_base`, ...) good enough for
//! one fixed grammar. A rule-driven lexer needs the finer-grained, exact
//! Unicode General Category of a codepoint so that a `ClassCat` definition
//! can match "uppercase letters" or "decimal digits" as data, not as a
//! hand-written predicate. `unicode_properties::UnicodeGeneralCategory`
//! supplies exact category lookups; this module turns those into a 32-bit
//! mask so a `ClassCat` can request a *union* of categories (e.g. "any
//! letter or mark") with one comparison.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

macro_rules! categories {
    ($($variant:ident => $bit:expr, $name:expr;)+) => {
        /// One bit per Unicode General Category, plus one extension bit
        /// ([`Category::SEP_LINE_EXT`]) for codepoints this crate treats as
        /// line separators even though Unicode itself classifies them as
        /// control characters (`\n`, `\r`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
        pub struct Category(u32);

        impl Category {
            pub const EMPTY: Category = Category(0);
            $(pub const $variant: Category = Category($bit);)+

            pub const fn bits(self) -> u32 {
                self.0
            }

            pub const fn from_bits(bits: u32) -> Category {
                Category(bits)
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Category::$variant => $name,)+
                    _ => "MULTI",
                }
            }
        }
    };
}

fn gc_to_category(gc: GeneralCategory) -> Category {
    match gc {
        GeneralCategory::UppercaseLetter => Category::LU,
        GeneralCategory::LowercaseLetter => Category::LL,
        GeneralCategory::TitlecaseLetter => Category::LT,
        GeneralCategory::ModifierLetter => Category::LM,
        GeneralCategory::OtherLetter => Category::LO,
        GeneralCategory::NonspacingMark => Category::MN,
        GeneralCategory::SpacingMark => Category::MC,
        GeneralCategory::EnclosingMark => Category::ME,
        GeneralCategory::DecimalNumber => Category::ND,
        GeneralCategory::LetterNumber => Category::NL,
        GeneralCategory::OtherNumber => Category::NO,
        GeneralCategory::ConnectorPunctuation => Category::PC,
        GeneralCategory::DashPunctuation => Category::PD,
        GeneralCategory::OpenPunctuation => Category::PS,
        GeneralCategory::ClosePunctuation => Category::PE,
        GeneralCategory::InitialPunctuation => Category::PI,
        GeneralCategory::FinalPunctuation => Category::PF,
        GeneralCategory::OtherPunctuation => Category::PO,
        GeneralCategory::MathSymbol => Category::SM,
        GeneralCategory::CurrencySymbol => Category::SC,
        GeneralCategory::ModifierSymbol => Category::SK,
        GeneralCategory::OtherSymbol => Category::SO,
        GeneralCategory::SpaceSeparator => Category::ZS,
        GeneralCategory::LineSeparator => Category::ZL,
        GeneralCategory::ParagraphSeparator => Category::ZP,
        GeneralCategory::Control => Category::CC,
        GeneralCategory::Format => Category::CF,
        GeneralCategory::Surrogate => Category::CS,
        GeneralCategory::PrivateUse => Category::CO,
        GeneralCategory::Unassigned => Category::CN,
    }
}

categories! {
    LU => 1 << 0,  "Lu";
    LL => 1 << 1,  "Ll";
    LT => 1 << 2,  "Lt";
    LM => 1 << 3,  "Lm";
    LO => 1 << 4,  "Lo";
    MN => 1 << 5,  "Mn";
    MC => 1 << 6,  "Mc";
    ME => 1 << 7,  "Me";
    ND => 1 << 8,  "Nd";
    NL => 1 << 9,  "Nl";
    NO => 1 << 10, "No";
    PC => 1 << 11, "Pc";
    PD => 1 << 12, "Pd";
    PS => 1 << 13, "Ps";
    PE => 1 << 14, "Pe";
    PI => 1 << 15, "Pi";
    PF => 1 << 16, "Pf";
    PO => 1 << 17, "Po";
    SM => 1 << 18, "Sm";
    SC => 1 << 19, "Sc";
    SK => 1 << 20, "Sk";
    SO => 1 << 21, "So";
    ZS => 1 << 22, "Zs";
    ZL => 1 << 23, "Zl";
    ZP => 1 << 24, "Zp";
    CC => 1 << 25, "Cc";
    CF => 1 << 26, "Cf";
    CS => 1 << 27, "Cs";
    CO => 1 << 28, "Co";
    CN => 1 << 29, "Cn";
    SEP_LINE_EXT => 1 << 30, "SepLineExt";
}

impl Category {
    pub const LETTER: Category = Category(
        Category::LU.0 | Category::LL.0 | Category::LT.0 | Category::LM.0 | Category::LO.0,
    );
    pub const MARK: Category = Category(Category::MN.0 | Category::MC.0 | Category::ME.0);
    pub const NUMBER: Category = Category(Category::ND.0 | Category::NL.0 | Category::NO.0);
    pub const PUNCT: Category = Category(
        Category::PC.0
            | Category::PD.0
            | Category::PS.0
            | Category::PE.0
            | Category::PI.0
            | Category::PF.0
            | Category::PO.0,
    );
    pub const SYMBOL: Category =
        Category(Category::SM.0 | Category::SC.0 | Category::SK.0 | Category::SO.0);
    /// Unicode whitespace: `Zs`/`Zl`/`Zp` plus the ASCII control codes that
    /// function as whitespace (`\t`, `\n`, `\r`, `\x0B`, `\x0C`) via
    /// `SEP_LINE_EXT`.
    pub const WHITESPACE: Category =
        Category(Category::ZS.0 | Category::ZL.0 | Category::ZP.0 | Category::SEP_LINE_EXT.0);
    pub const OTHER: Category =
        Category(Category::CC.0 | Category::CF.0 | Category::CS.0 | Category::CO.0 | Category::CN.0);

    pub fn union(self, other: Category) -> Category {
        Category(self.0 | other.0)
    }

    pub fn contains(self, other: Category) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Category {
    type Output = Category;
    fn bitor(self, rhs: Category) -> Category {
        self.union(rhs)
    }
}

/// Codepoints classified as a line-breaking whitespace beyond the plain
/// Unicode `Zl`/`Zp` separators: `\n`, `\r`, vertical tab, form feed, and
/// NEL (U+0085), all of which are `Cc` in the General Category table but
/// function as line terminators for this crate's grapheme reader (§4.C).
pub fn is_line_break_codepoint(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}')
        || matches!(c.general_category(), GeneralCategory::LineSeparator | GeneralCategory::ParagraphSeparator)
}

/// The exact Unicode General Category of `c`, plus `SEP_LINE_EXT` when `c`
/// is one of the extra line-breaking codepoints above.
pub fn category_of(c: char) -> Category {
    let mut cat = gc_to_category(c.general_category());
    if is_line_break_codepoint(c) {
        cat = cat.union(Category::SEP_LINE_EXT);
    }
    cat
}
