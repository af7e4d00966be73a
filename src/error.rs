//! Crate-wide error type and result alias.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Character set is empty after applying filters")]
    EmptyCharset,

    /// The batch attempt ceiling was hit before `requested` passwords
    /// passed policy validation.
    #[error("Could only generate {generated} of {requested} passwords after {attempts} attempts")]
    GenerationExhausted {
        generated: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("Unknown template '{name}'. Available: {available}")]
    UnknownTemplate { name: String, available: String },

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Invalid base32 TOTP secret: '{0}'")]
    InvalidSecret(String),

    #[error("Not a valid otpauth TOTP URI: {0}")]
    InvalidUri(String),

    #[error("No secret found in otpauth URI")]
    MissingSecret,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("QR code error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Keychain error: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("Vault error: {0}")]
    Vault(String),

    #[error("AWS Secrets Manager error: {0}")]
    Aws(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
