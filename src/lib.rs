//! Symmetric text encryption with themed glyph charsets.
//!
//! A message is encrypted with AES-CBC (key scrypt-stretched from a
//! passphrase, IV reduced from an arbitrary string) and the hex ciphertext
//! is re-encoded into a charset of printable glyphs, optionally through a
//! run-length "condensing" compaction. The whole pipeline is deterministic
//! and invertible.
//!
//! ```
//! use glyphcrypt::{encrypt, decrypt, CharsetRegistry, CryptRequest};
//!
//! let registry = CharsetRegistry::with_defaults();
//! let request = CryptRequest::new("hello", "testkey", "1234567890123456");
//! let sealed = encrypt(&request, &registry).unwrap();
//! let opened = decrypt(&CryptRequest::new(&sealed, "testkey", "1234567890123456"), &registry).unwrap();
//! assert_eq!(opened, "hello");
//! ```

mod charset;
mod cipher;
mod client;
mod condense;
mod config;
mod pattern;
mod registry;

pub use charset::{Charset, CharsetError, CharsetKind, CharsetMode, DecodeError, EncodeError};
pub use cipher::{aes_decrypt, aes_encrypt, KeyLength, DEFAULT_SALT};
pub use client::{Codec, CodecOptions};
pub use condense::{condense, decondense, COMMON_REPLACERS};
pub use config::{charset_from_json, CharsetConfigError, CharsetKindSpec};
pub use pattern::find_patterns;
pub use registry::{default_binary, default_efficient_binary, default_literal, CharsetRegistry};

/// Algorithm applied when a request does not name one.
pub const DEFAULT_ALGORITHM: &str = "aes192";

/// Charset looked up when a request does not name one.
pub const DEFAULT_CHARSET: &str = "eb";

/// Parameters for one encrypt or decrypt operation. `salt`, `algorithm`,
/// and `charset` fall back to the library defaults when absent.
#[derive(Debug, Clone)]
pub struct CryptRequest<'a> {
    pub message: &'a str,
    pub key: &'a str,
    pub iv: &'a str,
    pub salt: Option<&'a str>,
    pub algorithm: Option<&'a str>,
    pub charset: Option<&'a str>,
}

impl<'a> CryptRequest<'a> {
    /// A request with library defaults for salt, algorithm, and charset.
    pub fn new(message: &'a str, key: &'a str, iv: &'a str) -> Self {
        CryptRequest {
            message,
            key,
            iv,
            salt: None,
            algorithm: None,
            charset: None,
        }
    }
}

/// Configuration errors surfaced by the orchestrator. Cryptographic
/// failures are not represented here: those are swallowed at the cipher
/// boundary and show up as an empty result string.
#[derive(Debug)]
pub enum CryptError {
    /// No registered charset answers to the requested name
    UnknownCharset(String),
    /// The algorithm name does not resolve to a supported key length
    UnsupportedAlgorithm(String),
    /// The charset could not encode the ciphertext
    Encode(EncodeError),
    /// The message is not a glyph string of the requested charset
    Decode(DecodeError),
}

impl std::fmt::Display for CryptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CryptError::UnknownCharset(name) => write!(f, "unknown charset {:?}", name),
            CryptError::UnsupportedAlgorithm(name) => {
                write!(f, "unsupported algorithm {:?}", name)
            }
            CryptError::Encode(err) => write!(f, "encoding failed: {err}"),
            CryptError::Decode(err) => write!(f, "decoding failed: {err}"),
        }
    }
}

impl std::error::Error for CryptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CryptError::Encode(err) => Some(err),
            CryptError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EncodeError> for CryptError {
    fn from(err: EncodeError) -> Self {
        CryptError::Encode(err)
    }
}

impl From<DecodeError> for CryptError {
    fn from(err: DecodeError) -> Self {
        CryptError::Decode(err)
    }
}

fn resolve<'r>(
    registry: &'r CharsetRegistry,
    requested: Option<&str>,
) -> Result<&'r Charset, CryptError> {
    let name = requested.unwrap_or(DEFAULT_CHARSET);
    registry
        .get(name)
        .ok_or_else(|| CryptError::UnknownCharset(name.to_string()))
}

fn key_length(requested: Option<&str>) -> Result<KeyLength, CryptError> {
    let name = requested.unwrap_or(DEFAULT_ALGORITHM);
    KeyLength::from_algorithm(name)
        .ok_or_else(|| CryptError::UnsupportedAlgorithm(name.to_string()))
}

/// Encrypts a message and re-encodes the ciphertext as a glyph string.
///
/// Charset and algorithm resolution failures are fatal; a cryptographic
/// failure inside the cipher yields the encoding of an empty ciphertext
/// (the cipher boundary never propagates errors).
pub fn encrypt(request: &CryptRequest, registry: &CharsetRegistry) -> Result<String, CryptError> {
    let charset = resolve(registry, request.charset)?;
    encrypt_with(request, charset)
}

/// Decodes a glyph string back to hex ciphertext and decrypts it.
///
/// Returns an empty string when decryption fails (wrong key, wrong IV,
/// tampered ciphertext); the conditions are indistinguishable by design.
pub fn decrypt(request: &CryptRequest, registry: &CharsetRegistry) -> Result<String, CryptError> {
    let charset = resolve(registry, request.charset)?;
    decrypt_with(request, charset)
}

/// [`encrypt`] with a charset instance instead of a registry name; the
/// request's `charset` field is ignored.
pub fn encrypt_with(request: &CryptRequest, charset: &Charset) -> Result<String, CryptError> {
    let key_length = key_length(request.algorithm)?;
    let ciphertext = aes_encrypt(
        request.message,
        request.key,
        request.iv,
        key_length,
        request.salt.unwrap_or(DEFAULT_SALT),
        true,
    );
    Ok(charset.encode(&ciphertext)?)
}

/// [`decrypt`] with a charset instance instead of a registry name.
pub fn decrypt_with(request: &CryptRequest, charset: &Charset) -> Result<String, CryptError> {
    let key_length = key_length(request.algorithm)?;
    let ciphertext = charset.decode(request.message)?;
    Ok(aes_decrypt(
        &ciphertext,
        request.key,
        request.iv,
        key_length,
        request.salt.unwrap_or(DEFAULT_SALT),
        true,
    ))
}
