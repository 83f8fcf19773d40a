//! Format-preserving encryption of text values
//!
//! Keys and tweaks travel base64-encoded in templates. The key is decoded
//! into a [`SecretVec`] and numeral buffers are zeroized on drop.

pub mod ff1;
pub mod profile;

pub use ff1::Ff1;
pub use profile::CipherProfile;

use crate::domain::AnonymizeError;
use base64::{engine::general_purpose, Engine as _};
use secrecy::{ExposeSecret, SecretVec};
use zeroize::Zeroizing;

/// Maximum decoded tweak length in bytes
pub const MAX_TWEAK_LEN: usize = 8;

/// Decode a base64 AES key (16, 24 or 32 bytes)
pub fn decode_key(key_b64: &str) -> Result<SecretVec<u8>, AnonymizeError> {
    let bytes = Zeroizing::new(
        general_purpose::STANDARD
            .decode(key_b64.trim())
            .map_err(|e| AnonymizeError::InvalidKey(format!("key is not valid base64: {e}")))?,
    );

    match bytes.len() {
        16 | 24 | 32 => Ok(SecretVec::new(bytes.to_vec())),
        n => Err(AnonymizeError::InvalidKey(format!(
            "key must decode to 16, 24 or 32 bytes, got {n}"
        ))),
    }
}

/// Decode a base64 tweak of at most [`MAX_TWEAK_LEN`] bytes
///
/// An empty string is an empty tweak.
pub fn decode_tweak(tweak_b64: &str) -> Result<Vec<u8>, AnonymizeError> {
    let bytes = general_purpose::STANDARD
        .decode(tweak_b64.trim())
        .map_err(|e| AnonymizeError::InvalidTweak(format!("tweak is not valid base64: {e}")))?;

    if bytes.len() > MAX_TWEAK_LEN {
        return Err(AnonymizeError::InvalidTweak(format!(
            "tweak must be at most {MAX_TWEAK_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Encipher or decipher every run of profile characters in `value`
///
/// Characters between runs are copied unchanged, so separators and
/// punctuation keep their positions.
pub fn transform_runs(
    value: &str,
    cipher: &Ff1,
    tweak: &[u8],
    profile: CipherProfile,
    decrypt: bool,
) -> Result<String, AnonymizeError> {
    let mut out = String::with_capacity(value.len());
    let mut last = 0;

    for run in profile.runs().find_iter(value) {
        out.push_str(&value[last..run.start()]);

        let numerals = Zeroizing::new(profile.to_numerals(run.as_str())?);
        let transformed = Zeroizing::new(if decrypt {
            cipher.decrypt(tweak, &numerals)?
        } else {
            cipher.encrypt(tweak, &numerals)?
        });
        out.push_str(&profile.from_numerals(&transformed)?);

        last = run.end();
    }
    out.push_str(&value[last..]);

    Ok(out)
}

/// Encrypt (or decrypt) `value` with a base64 key and tweak
pub fn fpe_cipher(
    value: &str,
    key_b64: &str,
    tweak_b64: &str,
    decrypt: bool,
    profile: CipherProfile,
) -> Result<String, AnonymizeError> {
    let key = decode_key(key_b64)?;
    let tweak = decode_tweak(tweak_b64)?;
    let cipher = Ff1::new(key.expose_secret(), profile.radix())?;

    transform_runs(value, &cipher, &tweak, profile, decrypt)
}
