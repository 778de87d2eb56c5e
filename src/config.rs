use std::collections::BTreeMap;

use serde::Deserialize;

use crate::charset::{Charset, CharsetError};

/// Charset kind names accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharsetKindSpec {
    Binary,
    EfficientBinary,
    HexLiteral,
}

impl CharsetKindSpec {
    /// Parses a kind name, tolerating case and separator variations.
    pub fn from_str(s: &str) -> Result<Self, CharsetConfigError> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "binary" => Ok(CharsetKindSpec::Binary),
            "efficientbinary" | "eb" => Ok(CharsetKindSpec::EfficientBinary),
            "hexliteral" | "literal" | "hex" => Ok(CharsetKindSpec::HexLiteral),
            _ => Err(CharsetConfigError::UnknownKind(s.to_string())),
        }
    }
}

/// Errors raised while building a charset from caller-supplied JSON.
#[derive(Debug)]
pub enum CharsetConfigError {
    /// The kind name is not one of binary / efficientBinary / hexLiteral
    UnknownKind(String),
    /// The payload is not a flat JSON object of token to glyph
    Json(serde_json::Error),
    /// The table failed charset construction validation
    Charset(CharsetError),
}

impl std::fmt::Display for CharsetConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharsetConfigError::UnknownKind(kind) => {
                write!(f, "unknown charset kind {:?}", kind)
            }
            CharsetConfigError::Json(err) => write!(f, "malformed charset table: {err}"),
            CharsetConfigError::Charset(err) => write!(f, "invalid charset table: {err}"),
        }
    }
}

impl std::error::Error for CharsetConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CharsetConfigError::Json(err) => Some(err),
            CharsetConfigError::Charset(err) => Some(err),
            CharsetConfigError::UnknownKind(_) => None,
        }
    }
}

impl From<serde_json::Error> for CharsetConfigError {
    fn from(err: serde_json::Error) -> Self {
        CharsetConfigError::Json(err)
    }
}

impl From<CharsetError> for CharsetConfigError {
    fn from(err: CharsetError) -> Self {
        CharsetConfigError::Charset(err)
    }
}

/// Builds a charset from an untrusted flat JSON table.
///
/// The wire format is a single JSON object whose keys are the symbol tokens
/// of the kind (`"0"`-`"9"`, `"a"`-`"f"`, `"."`, `":"`, `"commonReplacerN"`)
/// and whose values are the output glyphs. Validation is identical to
/// direct construction: malformed tables are rejected before any use.
pub fn charset_from_json(
    kind: &str,
    name: &str,
    aliases: &[&str],
    json: &str,
) -> Result<Charset, CharsetConfigError> {
    let kind = CharsetKindSpec::from_str(kind)?;
    let table: BTreeMap<String, String> = serde_json::from_str(json)?;
    let pairs: Vec<(&str, &str)> = table
        .iter()
        .map(|(token, glyph)| (token.as_str(), glyph.as_str()))
        .collect();
    let charset = match kind {
        CharsetKindSpec::Binary => Charset::binary(name, aliases, &pairs)?,
        CharsetKindSpec::EfficientBinary => Charset::efficient_binary(name, aliases, &pairs)?,
        CharsetKindSpec::HexLiteral => Charset::literal(name, aliases, &pairs)?,
    };
    Ok(charset)
}
