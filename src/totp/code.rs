//! One-time code computation per RFC 4226 (HOTP) and RFC 6238 (TOTP).

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use rand::{CryptoRng, Rng};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::{Error, Result};

/// Secret size for newly provisioned accounts, 160 bits.
pub const SECRET_BYTES: usize = 20;

/// HMAC hash function named by an otpauth URI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Case-insensitive parse of the spellings seen in provisioning URIs.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "SHA1" | "SHA-1" => Some(Self::Sha1),
            "SHA256" | "SHA-256" => Some(Self::Sha256),
            "SHA512" | "SHA-512" => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn uri_name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

/// Code parameters carried by a provisioning URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotpParams {
    pub algorithm: Algorithm,
    pub digits: u32,
    pub period: u64,
}

impl Default for TotpParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha1,
            digits: 6,
            period: 30,
        }
    }
}

/// A computed code plus the seconds left in its time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpCode {
    pub code: String,
    pub remaining: u64,
}

/// Decode a base32 secret: uppercase, strip spaces and hyphens, re-pad
/// to a multiple of 8, then decode. The error echoes the secret as the
/// user typed it.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    let cleaned = secret.to_uppercase().replace([' ', '-'], "");
    let padded = pad_base32(&cleaned);
    base32::decode(base32::Alphabet::Rfc4648 { padding: true }, &padded)
        .or_else(|| base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &cleaned))
        .ok_or_else(|| Error::InvalidSecret(secret.to_string()))
}

/// Encode raw key bytes as unpadded uppercase base32, the form
/// authenticator apps expect.
pub fn encode_secret(bytes: &[u8]) -> String {
    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, bytes)
}

/// Produce a fresh base32 secret for a new account.
pub fn generate_secret<R: Rng + CryptoRng>(rng: &mut R) -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rng.fill_bytes(&mut bytes);
    encode_secret(&bytes)
}

fn pad_base32(s: &str) -> String {
    let remainder = s.len() % 8;
    if remainder == 0 {
        s.to_string()
    } else {
        format!("{}{}", s, "=".repeat(8 - remainder))
    }
}

/// HOTP for raw key bytes and an explicit counter.
pub fn hotp_raw(key: &[u8], counter: u64, digits: u32, algorithm: Algorithm) -> String {
    let mac = compute_hmac(key, &counter.to_be_bytes(), algorithm);
    truncate(&mac, digits)
}

fn compute_hmac(key: &[u8], data: &[u8], algorithm: Algorithm) -> Vec<u8> {
    match algorithm {
        Algorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Dynamic truncation per RFC 4226 section 5.3.
fn truncate(mac: &[u8], digits: u32) -> String {
    let offset = (mac[mac.len() - 1] & 0x0f) as usize;
    let binary = ((mac[offset] as u32 & 0x7f) << 24)
        | ((mac[offset + 1] as u32) << 16)
        | ((mac[offset + 2] as u32) << 8)
        | (mac[offset + 3] as u32);
    let code = binary % 10u32.pow(digits);
    format!("{:0>width$}", code, width = digits as usize)
}

/// Compute the code for the time step containing `unix_seconds`, moved
/// by `step_offset` steps. `remaining` always describes the current
/// step, not the offset one.
pub fn code_at(
    secret: &str,
    params: &TotpParams,
    step_offset: u64,
    unix_seconds: u64,
) -> Result<TotpCode> {
    let key = decode_secret(secret)?;
    let counter = unix_seconds / params.period + step_offset;
    let remaining = params.period - unix_seconds % params.period;
    Ok(TotpCode {
        code: hotp_raw(&key, counter, params.digits, params.algorithm),
        remaining,
    })
}

/// Current and next code from one clock reading, so the pair can never
/// straddle a step boundary.
pub fn current_and_next(secret: &str, params: &TotpParams) -> Result<(TotpCode, TotpCode)> {
    let now = unix_now();
    let current = code_at(secret, params, 0, now)?;
    let next = code_at(secret, params, 1, now)?;
    Ok((current, next))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
