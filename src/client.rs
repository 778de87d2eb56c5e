use crate::{decrypt, encrypt, CryptError, CryptRequest, CharsetRegistry};
use crate::{DEFAULT_ALGORITHM, DEFAULT_CHARSET, DEFAULT_SALT};

/// Options for constructing a [`Codec`]. Only `key` and `iv` are required.
#[derive(Debug, Clone)]
pub struct CodecOptions {
    pub key: String,
    pub iv: String,
    pub salt: Option<String>,
    pub algorithm: Option<String>,
    pub charset: Option<String>,
}

impl CodecOptions {
    pub fn new(key: impl Into<String>, iv: impl Into<String>) -> Self {
        CodecOptions {
            key: key.into(),
            iv: iv.into(),
            salt: None,
            algorithm: None,
            charset: None,
        }
    }
}

/// A configured encrypt/decrypt client carrying per-instance defaults.
///
/// The key is module-private and reachable only through [`Codec::key`]; it
/// is never serialized or exposed as a field.
#[derive(Debug, Clone)]
pub struct Codec {
    key: String,
    iv: String,
    salt: String,
    algorithm: String,
    charset: String,
}

impl Codec {
    pub fn new(options: CodecOptions) -> Self {
        Codec {
            key: options.key,
            iv: options.iv,
            salt: options.salt.unwrap_or_else(|| DEFAULT_SALT.to_string()),
            algorithm: options
                .algorithm
                .unwrap_or_else(|| DEFAULT_ALGORITHM.to_string()),
            charset: options.charset.unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
        }
    }

    /// Encrypts `message` with this client's parameters.
    pub fn encrypt(&self, message: &str, registry: &CharsetRegistry) -> Result<String, CryptError> {
        encrypt(&self.request(message), registry)
    }

    /// Decrypts a glyph string produced with this client's parameters.
    pub fn decrypt(&self, message: &str, registry: &CharsetRegistry) -> Result<String, CryptError> {
        decrypt(&self.request(message), registry)
    }

    fn request<'a>(&'a self, message: &'a str) -> CryptRequest<'a> {
        CryptRequest {
            message,
            key: &self.key,
            iv: &self.iv,
            salt: Some(&self.salt),
            algorithm: Some(&self.algorithm),
            charset: Some(&self.charset),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn iv(&self) -> &str {
        &self.iv
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }
}
