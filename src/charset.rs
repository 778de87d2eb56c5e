use std::collections::HashMap;
use std::fmt::Write as _;

use unicode_segmentation::UnicodeSegmentation;

use crate::condense::{condense, decondense, Replacer, COMMON_REPLACERS};

/// How a charset interprets its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetKind {
    /// Input characters are expanded to 8-digit binary before translation.
    Binary,
    /// Input characters are translated one-for-one.
    Literal,
}

/// Whether a binary charset condenses the digit stream before translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetMode {
    Normal,
    Efficient,
}

/// Errors raised while constructing a charset from a symbol table.
///
/// These are fatal configuration errors: a malformed table is rejected
/// immediately and never partially applied.
#[derive(Debug, PartialEq, Eq)]
pub enum CharsetError {
    /// A glyph is empty or spans more than one grapheme cluster
    GlyphNotSingle { token: String, glyph: String },
    /// Two tokens map to the same output glyph
    DuplicateGlyph { glyph: String },
    /// The same token appears twice in the table
    DuplicateToken { token: String },
    /// A token is not part of this charset kind's symbol set
    UnknownToken { token: String },
    /// A required token is absent from the table
    MissingToken { token: String },
}

impl std::fmt::Display for CharsetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharsetError::GlyphNotSingle { token, glyph } => {
                write!(f, "glyph {:?} for token {:?} is not a single character", glyph, token)
            }
            CharsetError::DuplicateGlyph { glyph } => {
                write!(f, "glyph {:?} is already assigned in this charset", glyph)
            }
            CharsetError::DuplicateToken { token } => {
                write!(f, "token {:?} appears more than once", token)
            }
            CharsetError::UnknownToken { token } => {
                write!(f, "token {:?} is not valid for this charset kind", token)
            }
            CharsetError::MissingToken { token } => {
                write!(f, "token {:?} is missing from the table", token)
            }
        }
    }
}

impl std::error::Error for CharsetError {}

/// Errors raised while encoding text through a charset.
#[derive(Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The input contains a character with no glyph mapping
    UnmappedSymbol(char),
    /// The input character does not fit the 8-bit binary expansion
    UnencodableChar(char),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::UnmappedSymbol(c) => write!(f, "no glyph mapped for character {:?}", c),
            EncodeError::UnencodableChar(c) => {
                write!(f, "character {:?} is outside the 8-bit range", c)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Errors raised while decoding a glyph string back to text.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contains a glyph that is not part of this charset
    UnknownGlyph(String),
    /// The recovered symbol stream is not a valid binary digit group
    InvalidBinary(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnknownGlyph(g) => write!(f, "glyph {:?} is not in this charset", g),
            DecodeError::InvalidBinary(s) => write!(f, "invalid binary group {:?}", s),
        }
    }
}

impl std::error::Error for DecodeError {}

/// A bidirectional mapping between a fixed symbol set and output glyphs.
///
/// Immutable after construction and safe to share between threads. The
/// forward and inverse maps are mutual inverses by construction: every
/// source symbol maps to exactly one glyph and no glyph is assigned twice.
#[derive(Debug, Clone)]
pub struct Charset {
    name: String,
    aliases: Vec<String>,
    kind: CharsetKind,
    mode: CharsetMode,
    forward: HashMap<char, String>,
    inverse: HashMap<String, char>,
    replacers: [Replacer; 2],
    max_glyph_len: usize,
}

/// Tokens accepted by a plain binary charset.
const BINARY_TOKENS: &[&str] = &["0", "1"];

/// Tokens accepted by an efficient binary charset: digits for run counters
/// and substitution tokens, the directory separators, and the two
/// common-replacer slots.
const EFFICIENT_TOKENS: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", ":",
    "commonReplacer1", "commonReplacer2",
];

/// Tokens accepted by a hex literal charset.
const LITERAL_TOKENS: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "a", "b", "c", "d", "e", "f",
];

impl Charset {
    /// Builds a plain binary charset from a `{"0": glyph, "1": glyph}` table.
    pub fn binary(name: &str, aliases: &[&str], table: &[(&str, &str)]) -> Result<Self, CharsetError> {
        Self::build(name, aliases, CharsetKind::Binary, CharsetMode::Normal, BINARY_TOKENS, table)
    }

    /// Builds an efficient binary charset. The table must cover the digits
    /// `0`-`9`, the directory separators `.` and `:`, and the two
    /// `commonReplacerN` slots.
    pub fn efficient_binary(
        name: &str,
        aliases: &[&str],
        table: &[(&str, &str)],
    ) -> Result<Self, CharsetError> {
        Self::build(name, aliases, CharsetKind::Binary, CharsetMode::Efficient, EFFICIENT_TOKENS, table)
    }

    /// Builds a literal charset covering the lowercase hex digits.
    pub fn literal(name: &str, aliases: &[&str], table: &[(&str, &str)]) -> Result<Self, CharsetError> {
        Self::build(name, aliases, CharsetKind::Literal, CharsetMode::Normal, LITERAL_TOKENS, table)
    }

    fn build(
        name: &str,
        aliases: &[&str],
        kind: CharsetKind,
        mode: CharsetMode,
        expected: &[&str],
        table: &[(&str, &str)],
    ) -> Result<Self, CharsetError> {
        let replacers = COMMON_REPLACERS;
        let mut forward = HashMap::with_capacity(table.len());
        let mut inverse = HashMap::with_capacity(table.len());
        let mut max_glyph_len = 0;

        for &(token, glyph) in table {
            if !expected.contains(&token) {
                return Err(CharsetError::UnknownToken { token: token.to_string() });
            }
            if glyph.is_empty() || glyph.graphemes(true).count() != 1 {
                return Err(CharsetError::GlyphNotSingle {
                    token: token.to_string(),
                    glyph: glyph.to_string(),
                });
            }
            let symbol = Self::token_symbol(token, &replacers);
            if forward.contains_key(&symbol) {
                return Err(CharsetError::DuplicateToken { token: token.to_string() });
            }
            if inverse.contains_key(glyph) {
                return Err(CharsetError::DuplicateGlyph { glyph: glyph.to_string() });
            }
            forward.insert(symbol, glyph.to_string());
            inverse.insert(glyph.to_string(), symbol);
            max_glyph_len = max_glyph_len.max(glyph.len());
        }

        for &token in expected {
            let symbol = Self::token_symbol(token, &replacers);
            if !forward.contains_key(&symbol) {
                return Err(CharsetError::MissingToken { token: token.to_string() });
            }
        }

        Ok(Charset {
            name: name.trim().to_lowercase(),
            aliases: aliases.iter().map(|a| a.trim().to_lowercase()).collect(),
            kind,
            mode,
            forward,
            inverse,
            replacers,
            max_glyph_len,
        })
    }

    /// Maps a table token to the internal single-character symbol it stands
    /// for. The `commonReplacerN` tokens stand for the replacer placeholder
    /// characters that appear in condensed text.
    fn token_symbol(token: &str, replacers: &[Replacer; 2]) -> char {
        match token {
            "commonReplacer1" => replacers[0].1,
            "commonReplacer2" => replacers[1].1,
            _ => token.chars().next().unwrap_or('\0'),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn kind(&self) -> CharsetKind {
        self.kind
    }

    pub fn mode(&self) -> CharsetMode {
        self.mode
    }

    /// True when `name` matches this charset's name or one of its aliases,
    /// case-insensitively.
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.name == name || self.aliases.iter().any(|a| *a == name)
    }

    /// Encodes `text` into this charset's glyphs.
    ///
    /// Literal charsets translate each character directly; callers must
    /// restrict input to the mapped symbol set (lowercase hex for the
    /// built-in). Binary charsets expand each character's code point to
    /// 8-digit binary first, condensing when the mode is efficient.
    pub fn encode(&self, text: &str) -> Result<String, EncodeError> {
        match self.kind {
            CharsetKind::Literal => self.translate(text),
            CharsetKind::Binary => {
                let mut bits = String::with_capacity(text.len() * 8);
                for c in text.chars() {
                    let code = c as u32;
                    if code > 0xFF {
                        return Err(EncodeError::UnencodableChar(c));
                    }
                    let _ = write!(bits, "{:08b}", code);
                }
                let staged = match self.mode {
                    CharsetMode::Efficient => condense(&bits, &self.replacers),
                    CharsetMode::Normal => bits,
                };
                self.translate(&staged)
            }
        }
    }

    /// Decodes a glyph string produced by [`encode`](Self::encode).
    ///
    /// Binary charsets regroup the recovered digit stream into complete
    /// 8-digit chunks; a trailing partial chunk is dropped, which absorbs
    /// the condenser's duplicated final bit.
    pub fn decode(&self, text: &str) -> Result<String, DecodeError> {
        let symbols = self.untranslate(text)?;
        match self.kind {
            CharsetKind::Literal => Ok(symbols),
            CharsetKind::Binary => {
                let bits = match self.mode {
                    CharsetMode::Efficient => decondense(&symbols, &self.replacers),
                    CharsetMode::Normal => symbols,
                };
                let digits: Vec<char> = bits.chars().collect();
                let mut out = String::with_capacity(digits.len() / 8);
                for chunk in digits.chunks_exact(8) {
                    let group: String = chunk.iter().collect();
                    let code = u8::from_str_radix(&group, 2)
                        .map_err(|_| DecodeError::InvalidBinary(group.clone()))?;
                    out.push(code as char);
                }
                Ok(out)
            }
        }
    }

    /// Reports whether every glyph in `text` belongs to this charset. Used
    /// to detect which charset produced a given blob.
    pub fn valid_chars(&self, text: &str) -> bool {
        self.untranslate(text).is_ok()
    }

    fn translate(&self, symbols: &str) -> Result<String, EncodeError> {
        let mut out = String::with_capacity(symbols.len() * 4);
        for c in symbols.chars() {
            let glyph = self
                .forward
                .get(&c)
                .ok_or(EncodeError::UnmappedSymbol(c))?;
            out.push_str(glyph);
        }
        Ok(out)
    }

    /// Tokenizes a glyph string back into source symbols by greedy longest
    /// match, so multi-codepoint glyphs decode unambiguously.
    fn untranslate(&self, text: &str) -> Result<String, DecodeError> {
        let mut out = String::with_capacity(text.len() / 2);
        let mut rest = text;
        while !rest.is_empty() {
            let limit = self.max_glyph_len.min(rest.len());
            let mut matched = None;
            for end in (1..=limit).rev() {
                if !rest.is_char_boundary(end) {
                    continue;
                }
                if let Some(&symbol) = self.inverse.get(&rest[..end]) {
                    matched = Some((symbol, end));
                    break;
                }
            }
            match matched {
                Some((symbol, end)) => {
                    out.push(symbol);
                    rest = &rest[end..];
                }
                None => {
                    let glyph = rest.graphemes(true).next().unwrap_or(rest);
                    return Err(DecodeError::UnknownGlyph(glyph.to_string()));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emoji_binary() -> Charset {
        Charset::binary("TestBinary", &["tb"], &[("0", "🤡"), ("1", "🤓")]).unwrap()
    }

    fn ascii_efficient() -> Charset {
        Charset::efficient_binary(
            "TestEfficient",
            &["te"],
            &[
                ("0", "A"),
                ("1", "B"),
                ("2", "C"),
                ("3", "D"),
                ("4", "E"),
                ("5", "F"),
                ("6", "G"),
                ("7", "H"),
                ("8", "I"),
                ("9", "J"),
                (".", "K"),
                (":", "L"),
                ("commonReplacer1", "M"),
                ("commonReplacer2", "N"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn binary_roundtrip() {
        let charset = emoji_binary();
        let encoded = charset.encode("hi").unwrap();
        assert_eq!(encoded.chars().count(), 16);
        assert_eq!(charset.decode(&encoded).unwrap(), "hi");
    }

    #[test]
    fn efficient_roundtrip() {
        let charset = ascii_efficient();
        let encoded = charset.encode("deadbeef00").unwrap();
        assert_eq!(charset.decode(&encoded).unwrap(), "deadbeef00");
    }

    fn emoji_literal() -> Charset {
        Charset::literal(
            "TestLiteral",
            &[],
            &[
                ("0", "🤡"), ("1", "🤓"), ("2", "🫁"), ("3", "🤯"),
                ("4", "📮"), ("5", "🐄"), ("6", "🥌"), ("7", "💩"),
                ("8", "🤠"), ("9", "🥴"), ("a", "🥸"), ("b", "🥛"),
                ("c", "🗿"), ("d", "🤨"), ("e", "😐"), ("f", "😏"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn literal_roundtrip() {
        let charset = emoji_literal();
        let encoded = charset.encode("c0ffee").unwrap();
        assert_eq!(charset.decode(&encoded).unwrap(), "c0ffee");
    }

    #[test]
    fn literal_rejects_unmapped_input() {
        // Literal charsets translate one-for-one: no binary expansion to
        // hide behind, so a character outside the hex table is an error.
        let charset = emoji_literal();
        assert_eq!(
            charset.encode("nope").unwrap_err(),
            EncodeError::UnmappedSymbol('n')
        );
        assert!(charset.encode("c0ffee").is_ok());
    }

    #[test]
    fn wide_chars_are_rejected_for_binary_expansion() {
        let charset = emoji_binary();
        assert_eq!(
            charset.encode("é€").unwrap_err(),
            EncodeError::UnencodableChar('€')
        );
    }

    #[test]
    fn decode_rejects_foreign_glyphs() {
        let charset = emoji_binary();
        assert_eq!(
            charset.decode("🤡🤖").unwrap_err(),
            DecodeError::UnknownGlyph("🤖".to_string())
        );
    }

    #[test]
    fn valid_chars_distinguishes_charsets() {
        let charset = emoji_binary();
        let encoded = charset.encode("yo").unwrap();
        assert!(charset.valid_chars(&encoded));
        assert!(!charset.valid_chars("plain text"));
        assert!(!ascii_efficient().valid_chars(&encoded));
    }

    #[test]
    fn construction_rejects_duplicate_glyph() {
        let err = Charset::binary("x", &[], &[("0", "🤡"), ("1", "🤡")]).unwrap_err();
        assert_eq!(err, CharsetError::DuplicateGlyph { glyph: "🤡".to_string() });
    }

    #[test]
    fn construction_rejects_multi_grapheme_glyph() {
        let err = Charset::binary("x", &[], &[("0", "ab"), ("1", "🤓")]).unwrap_err();
        assert!(matches!(err, CharsetError::GlyphNotSingle { .. }));
    }

    #[test]
    fn construction_accepts_multi_codepoint_grapheme() {
        // A ZWJ emoji sequence is several codepoints but one glyph.
        let charset =
            Charset::binary("x", &[], &[("0", "👨‍👩‍👦"), ("1", "🤓")]).unwrap();
        let encoded = charset.encode("A").unwrap();
        assert_eq!(charset.decode(&encoded).unwrap(), "A");
    }

    #[test]
    fn construction_rejects_missing_and_unknown_tokens() {
        assert_eq!(
            Charset::binary("x", &[], &[("0", "🤡")]).unwrap_err(),
            CharsetError::MissingToken { token: "1".to_string() }
        );
        assert_eq!(
            Charset::binary("x", &[], &[("0", "🤡"), ("1", "🤓"), ("q", "🥴")]).unwrap_err(),
            CharsetError::UnknownToken { token: "q".to_string() }
        );
    }

    #[test]
    fn names_and_aliases_are_normalized() {
        let charset = Charset::binary(" TestBinary ", &[" TB "], &[("0", "🤡"), ("1", "🤓")]).unwrap();
        assert_eq!(charset.name(), "testbinary");
        assert!(charset.answers_to("testbinary"));
        assert!(charset.answers_to("tb"));
        assert!(charset.answers_to("  TB "));
        assert!(!charset.answers_to("other"));
    }
}
