//! Character set building for password generation.

use clap::ValueEnum;

use crate::error::{Error, Result};

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";

/// Default special characters offered to the strong class.
pub const DEFAULT_SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Visually similar characters removed by `--no-similar`.
pub const SIMILAR: &str = "il1Lo0O";

/// Password class selected with `-t/--type`.
///
/// `Pronounce` and `ApiKey` have their own synthesis paths and never
/// consult the charset builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PasswordClass {
    Strong,
    Alpha,
    Alphanum,
    Numeric,
    Pronounce,
    Custom,
    #[value(name = "api-key")]
    ApiKey,
}

impl PasswordClass {
    /// True for classes whose candidates go through policy validation.
    pub fn is_validated(self) -> bool {
        !matches!(self, PasswordClass::Pronounce | PasswordClass::ApiKey)
    }
}

/// Build the character pool for a password class: union the base classes,
/// drop excluded characters, then drop the similar set if requested.
///
/// Fails when the filters leave nothing to sample from.
pub fn build(
    class: PasswordClass,
    special_chars: &str,
    exclude_chars: &str,
    no_similar: bool,
    custom_charset: &str,
) -> Result<Vec<char>> {
    let mut chars: Vec<char> = Vec::new();

    match class {
        PasswordClass::Strong => {
            chars.extend(LOWERCASE.chars());
            chars.extend(UPPERCASE.chars());
            chars.extend(DIGITS.chars());
            chars.extend(special_chars.chars());
        }
        PasswordClass::Alpha => {
            chars.extend(LOWERCASE.chars());
            chars.extend(UPPERCASE.chars());
        }
        PasswordClass::Alphanum => {
            chars.extend(LOWERCASE.chars());
            chars.extend(UPPERCASE.chars());
            chars.extend(DIGITS.chars());
        }
        PasswordClass::Numeric => {
            chars.extend(DIGITS.chars());
        }
        PasswordClass::Custom => {
            chars.extend(custom_charset.chars());
        }
        // No alphabet of their own; callers must not ask for one.
        PasswordClass::Pronounce | PasswordClass::ApiKey => {}
    }

    if !exclude_chars.is_empty() {
        chars.retain(|c| !exclude_chars.contains(*c));
    }

    if no_similar {
        chars.retain(|c| !SIMILAR.contains(*c));
    }

    if chars.is_empty() {
        return Err(Error::EmptyCharset);
    }

    Ok(chars)
}
