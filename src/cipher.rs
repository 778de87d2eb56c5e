use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use scrypt::Params;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Fixed salt applied when the caller does not supply one.
pub const DEFAULT_SALT: &str = "pepper";

/// AES key sizes supported by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyLength {
    Bits128,
    #[default]
    Bits192,
    Bits256,
}

impl KeyLength {
    /// Resolves an algorithm name to a key length by extracting the digits
    /// from it, so `"aes192"`, `"AES-192"`, and `"192"` all resolve alike.
    pub fn from_algorithm(algorithm: &str) -> Option<Self> {
        let digits: String = algorithm.chars().filter(char::is_ascii_digit).collect();
        match digits.as_str() {
            "128" => Some(KeyLength::Bits128),
            "192" => Some(KeyLength::Bits192),
            "256" => Some(KeyLength::Bits256),
            _ => None,
        }
    }

    /// Derived key size in bytes.
    pub fn key_bytes(self) -> usize {
        match self {
            KeyLength::Bits128 => 16,
            KeyLength::Bits192 => 24,
            KeyLength::Bits256 => 32,
        }
    }
}

#[derive(Debug)]
enum CipherError {
    KeyDerivation,
    InvalidKeyOrIv,
    InvalidHex,
    BadPadding,
    InvalidUtf8,
}

impl std::fmt::Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::KeyDerivation => write!(f, "key derivation failed"),
            CipherError::InvalidKeyOrIv => write!(f, "invalid key or iv length"),
            CipherError::InvalidHex => write!(f, "ciphertext is not valid hex"),
            CipherError::BadPadding => write!(f, "padding check failed"),
            CipherError::InvalidUtf8 => write!(f, "decrypted bytes are not valid utf-8"),
        }
    }
}

/// Stretches an arbitrary-length passphrase into a fixed-size key.
///
/// Parameters are scrypt with log2(N)=14, r=8, p=1: deliberately slow, and
/// the defaults of the implementation this adapter is interoperable with.
fn derive_key(key: &str, salt: &str, key_length: KeyLength) -> Result<Vec<u8>, CipherError> {
    let params = Params::new(14, 8, 1, key_length.key_bytes())
        .map_err(|_| CipherError::KeyDerivation)?;
    let mut out = vec![0u8; key_length.key_bytes()];
    scrypt::scrypt(key.as_bytes(), salt.as_bytes(), &params, &mut out)
        .map_err(|_| CipherError::KeyDerivation)?;
    Ok(out)
}

/// Reduces an arbitrary string to exactly 16 IV bytes by cyclic repetition;
/// an empty string yields an all-zero IV.
fn fill_iv(iv: &str) -> [u8; 16] {
    let mut out = [0u8; 16];
    let bytes = iv.as_bytes();
    if !bytes.is_empty() {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = bytes[i % bytes.len()];
        }
    }
    out
}

fn try_encrypt(
    text: &str,
    key: &str,
    iv: &str,
    key_length: KeyLength,
    salt: &str,
) -> Result<String, CipherError> {
    let key = derive_key(key, salt, key_length)?;
    let iv = fill_iv(iv);
    let ciphertext = match key_length {
        KeyLength::Bits128 => Aes128CbcEnc::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidKeyOrIv)?
            .encrypt_padded_vec_mut::<Pkcs7>(text.as_bytes()),
        KeyLength::Bits192 => Aes192CbcEnc::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidKeyOrIv)?
            .encrypt_padded_vec_mut::<Pkcs7>(text.as_bytes()),
        KeyLength::Bits256 => Aes256CbcEnc::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidKeyOrIv)?
            .encrypt_padded_vec_mut::<Pkcs7>(text.as_bytes()),
    };
    Ok(hex::encode(ciphertext))
}

fn try_decrypt(
    hex_text: &str,
    key: &str,
    iv: &str,
    key_length: KeyLength,
    salt: &str,
) -> Result<String, CipherError> {
    let ciphertext = hex::decode(hex_text).map_err(|_| CipherError::InvalidHex)?;
    let key = derive_key(key, salt, key_length)?;
    let iv = fill_iv(iv);
    let plaintext = match key_length {
        KeyLength::Bits128 => Aes128CbcDec::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidKeyOrIv)?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CipherError::BadPadding)?,
        KeyLength::Bits192 => Aes192CbcDec::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidKeyOrIv)?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CipherError::BadPadding)?,
        KeyLength::Bits256 => Aes256CbcDec::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidKeyOrIv)?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CipherError::BadPadding)?,
    };
    String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
}

/// Encrypts `text` with AES-CBC and returns lowercase hex ciphertext.
///
/// The key is scrypt-stretched from `(key, salt)`; the IV string is reduced
/// to 16 bytes by repetition/truncation. Any cryptographic failure returns
/// an empty string instead of propagating; `diagnostics` surfaces the
/// swallowed cause through the `log` facade.
///
/// CBC provides confidentiality only. There is no integrity protection:
/// tampered ciphertext decrypts to an empty string or to wrong plaintext,
/// never to a detectable authentication error.
pub fn aes_encrypt(
    text: &str,
    key: &str,
    iv: &str,
    key_length: KeyLength,
    salt: &str,
    diagnostics: bool,
) -> String {
    match try_encrypt(text, key, iv, key_length, salt) {
        Ok(hex_text) => hex_text,
        Err(err) => {
            if diagnostics {
                log::warn!("encryption failed: {err}");
            }
            String::new()
        }
    }
}

/// Mirror of [`aes_encrypt`]: decrypts lowercase hex ciphertext back to
/// text. Wrong key, wrong IV, malformed hex, and corrupted ciphertext all
/// surface as an empty string, indistinguishable from one another.
pub fn aes_decrypt(
    hex_text: &str,
    key: &str,
    iv: &str,
    key_length: KeyLength,
    salt: &str,
    diagnostics: bool,
) -> String {
    match try_decrypt(hex_text, key, iv, key_length, salt) {
        Ok(text) => text,
        Err(err) => {
            if diagnostics {
                log::warn!("decryption failed: {err}");
            }
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_key_lengths() {
        for key_length in [KeyLength::Bits128, KeyLength::Bits192, KeyLength::Bits256] {
            let ciphertext = aes_encrypt("hello", "testkey", "1234567890123456", key_length, DEFAULT_SALT, false);
            assert!(!ciphertext.is_empty());
            assert!(ciphertext.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            let plaintext = aes_decrypt(&ciphertext, "testkey", "1234567890123456", key_length, DEFAULT_SALT, false);
            assert_eq!(plaintext, "hello");
        }
    }

    #[test]
    fn encryption_is_deterministic() {
        let a = aes_encrypt("same input", "k", "iv", KeyLength::Bits192, DEFAULT_SALT, false);
        let b = aes_encrypt("same input", "k", "iv", KeyLength::Bits192, DEFAULT_SALT, false);
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_key_yields_empty_string() {
        let ciphertext = aes_encrypt("secret", "right", "iv", KeyLength::Bits128, DEFAULT_SALT, false);
        assert_eq!(aes_decrypt(&ciphertext, "wrong", "iv", KeyLength::Bits128, DEFAULT_SALT, false), "");
    }

    #[test]
    fn invalid_hex_yields_empty_string() {
        assert_eq!(aes_decrypt("not-valid-hex", "k", "iv", KeyLength::Bits192, DEFAULT_SALT, false), "");
    }

    #[test]
    fn iv_fill_repeats_and_truncates() {
        assert_eq!(fill_iv(""), [0u8; 16]);
        assert_eq!(fill_iv("ab"), *b"abababababababab");
        assert_eq!(fill_iv("12345678901234567890"), *b"1234567890123456");
    }

    #[test]
    fn long_iv_matches_its_16_byte_prefix() {
        let short = aes_encrypt("msg", "k", "1234567890123456", KeyLength::Bits128, DEFAULT_SALT, false);
        let long = aes_encrypt("msg", "k", "12345678901234569999", KeyLength::Bits128, DEFAULT_SALT, false);
        assert_eq!(short, long);
    }

    #[test]
    fn algorithm_names_resolve_by_digits() {
        assert_eq!(KeyLength::from_algorithm("aes192"), Some(KeyLength::Bits192));
        assert_eq!(KeyLength::from_algorithm("AES-256-CBC"), Some(KeyLength::Bits256));
        assert_eq!(KeyLength::from_algorithm("128"), Some(KeyLength::Bits128));
        assert_eq!(KeyLength::from_algorithm("aes512"), None);
        assert_eq!(KeyLength::from_algorithm("des"), None);
    }

    #[test]
    fn salt_changes_ciphertext() {
        let a = aes_encrypt("msg", "k", "iv", KeyLength::Bits128, "pepper", false);
        let b = aes_encrypt("msg", "k", "iv", KeyLength::Bits128, "paprika", false);
        assert_ne!(a, b);
    }
}
