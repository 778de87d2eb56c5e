use std::collections::HashMap;

use crate::charset::Charset;

/// The built-in two-glyph binary charset.
pub fn default_binary() -> Charset {
    Charset::binary(
        "default-binary",
        &["binary", "db"],
        &[("0", "\u{1F921}"), ("1", "\u{1F913}")],
    )
    .expect("built-in binary charset table is valid")
}

/// The built-in efficient binary charset, the library-wide default.
///
/// Every token carries a distinct glyph; `commonReplacer1` must not share
/// `3`'s glyph or the inverse map stops being bijective.
pub fn default_efficient_binary() -> Charset {
    Charset::efficient_binary(
        "default-efficient-binary",
        &["eb", "efficient-binary"],
        &[
            ("0", "\u{1F921}"), // 🤡
            ("1", "\u{1F913}"), // 🤓
            ("2", "\u{1FAC1}"), // 🫁
            ("3", "\u{1F92F}"), // 🤯
            ("4", "\u{1F4EE}"), // 📮
            ("5", "\u{1F404}"), // 🐄
            ("6", "\u{1F5FF}"), // 🗿
            ("7", "\u{1F4A9}"), // 💩
            ("8", "\u{1F920}"), // 🤠
            ("9", "\u{1F974}"), // 🥴
            (".", "\u{1F610}"), // 😐
            (":", "\u{1F60F}"), // 😏
            ("commonReplacer1", "\u{1F92B}"), // 🤫
            ("commonReplacer2", "\u{1F95B}"), // 🥛
        ],
    )
    .expect("built-in efficient binary charset table is valid")
}

/// The built-in hex literal charset.
pub fn default_literal() -> Charset {
    Charset::literal(
        "default-literal",
        &["literal", "hex"],
        &[
            ("0", "\u{1F921}"), // 🤡
            ("1", "\u{1F913}"), // 🤓
            ("2", "\u{1FAC1}"), // 🫁
            ("3", "\u{1F92F}"), // 🤯
            ("4", "\u{1F4EE}"), // 📮
            ("5", "\u{1F404}"), // 🐄
            ("6", "\u{1F94C}"), // 🥌
            ("7", "\u{1F4A9}"), // 💩
            ("8", "\u{1F920}"), // 🤠
            ("9", "\u{1F974}"), // 🥴
            ("a", "\u{1F978}"), // 🥸
            ("b", "\u{1F95B}"), // 🥛
            ("c", "\u{1F5FF}"), // 🗿
            ("d", "\u{1F928}"), // 🤨
            ("e", "\u{1F610}"), // 😐
            ("f", "\u{1F60F}"), // 😏
        ],
    )
    .expect("built-in literal charset table is valid")
}

/// Holds charsets and resolves them by name or alias.
///
/// A plain value: construct once at startup and pass by reference. Immutable
/// lookups are safe to share; wrap the registry in a mutex if concurrent
/// `add`/`remove` is needed.
#[derive(Debug, Clone)]
pub struct CharsetRegistry {
    charsets: HashMap<String, Charset>,
}

impl CharsetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        CharsetRegistry {
            charsets: HashMap::new(),
        }
    }

    /// A registry pre-loaded with the three built-in charsets.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add(default_binary());
        registry.add(default_efficient_binary());
        registry.add(default_literal());
        registry
    }

    /// Looks up a charset by name or alias, case-insensitively and ignoring
    /// surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&Charset> {
        let normalized = name.trim().to_lowercase();
        if let Some(charset) = self.charsets.get(&normalized) {
            return Some(charset);
        }
        self.charsets.values().find(|c| c.answers_to(&normalized))
    }

    /// Registers a charset under its own name, replacing any previous entry
    /// with that name.
    pub fn add(&mut self, charset: Charset) {
        self.charsets.insert(charset.name().to_string(), charset);
    }

    /// Removes a charset by name. Returns whether an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.charsets.remove(&name.trim().to_lowercase()).is_some()
    }

    /// Registered charset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.charsets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CharsetRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
