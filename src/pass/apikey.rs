//! API key synthesis in common wire formats.

use base64::{Engine as _, engine::general_purpose};
use clap::ValueEnum;
use rand::{CryptoRng, Rng};
use uuid::Uuid;

use crate::pass::charset::{DIGITS, LOWERCASE, UPPERCASE};
use crate::pass::generate;

/// Output format selected with `--api-format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiKeyFormat {
    Uuid,
    #[value(name = "uuid-hex")]
    UuidHex,
    Base64,
    Hex,
    #[value(name = "url-safe")]
    UrlSafe,
    Alphanum,
}

/// Generate one API key. UUID formats have a fixed size; the others
/// honor `length`, except `hex` which rounds down to an even count.
pub fn generate<R: Rng + CryptoRng>(rng: &mut R, length: usize, format: ApiKeyFormat) -> String {
    match format {
        ApiKeyFormat::Uuid => Uuid::new_v4().to_string(),
        ApiKeyFormat::UuidHex => Uuid::new_v4().simple().to_string(),
        ApiKeyFormat::Base64 => {
            let mut bytes = vec![0u8; length * 3 / 4];
            rng.fill_bytes(&mut bytes);
            let mut encoded = general_purpose::STANDARD.encode(&bytes);
            encoded.truncate(length);
            encoded
        }
        ApiKeyFormat::Hex => {
            let mut bytes = vec![0u8; length / 2];
            rng.fill_bytes(&mut bytes);
            hex::encode(&bytes)
        }
        ApiKeyFormat::UrlSafe => {
            let mut bytes = vec![0u8; length];
            rng.fill_bytes(&mut bytes);
            let mut encoded = general_purpose::URL_SAFE_NO_PAD.encode(&bytes);
            encoded.truncate(length);
            encoded
        }
        ApiKeyFormat::Alphanum => {
            let charset: Vec<char> = LOWERCASE
                .chars()
                .chain(UPPERCASE.chars())
                .chain(DIGITS.chars())
                .collect();
            generate::sample(rng, &charset, length)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn uuid_has_canonical_shape() {
        let key = generate(&mut thread_rng(), 0, ApiKeyFormat::Uuid);
        assert_eq!(key.len(), 36);
        let hyphens: Vec<usize> = key
            .char_indices()
            .filter(|(_, c)| *c == '-')
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hyphens, vec![8, 13, 18, 23]);
    }

    #[test]
    fn uuid_hex_is_32_hex_chars() {
        let key = generate(&mut thread_rng(), 0, ApiKeyFormat::UuidHex);
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!key.contains('-'));
    }

    #[test]
    fn hex_rounds_odd_lengths_down() {
        let key = generate(&mut thread_rng(), 17, ApiKeyFormat::Hex);
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn base64_is_truncated_to_length() {
        let key = generate(&mut thread_rng(), 30, ApiKeyFormat::Base64);
        assert_eq!(key.len(), 30);
        assert!(!key.contains('='));
    }

    #[test]
    fn url_safe_avoids_reserved_chars() {
        let key = generate(&mut thread_rng(), 40, ApiKeyFormat::UrlSafe);
        assert_eq!(key.len(), 40);
        assert!(
            key.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn alphanum_samples_letters_and_digits_only() {
        let key = generate(&mut thread_rng(), 64, ApiKeyFormat::Alphanum);
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
