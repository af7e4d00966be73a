//! Password synthesis and the policy-bounded batch loop.

use rand::{CryptoRng, Rng};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::pass::apikey::{self, ApiKeyFormat};
use crate::pass::charset::{self, PasswordClass};
use crate::pass::policy::PolicyConstraint;

/// Attempt ceiling shared by one whole batch.
pub const MAX_ATTEMPTS: usize = 1000;

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 256;

const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";
const VOWELS: &str = "aeiou";

/// One batch request, as it stands after template resolution.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub length: usize,
    pub count: usize,
    pub class: PasswordClass,
    pub special_chars: String,
    pub exclude_chars: String,
    pub no_similar: bool,
    pub policy: PolicyConstraint,
    pub custom_charset: String,
    pub api_format: ApiKeyFormat,
}

/// Sample `length` characters uniformly from `charset`.
///
/// `gen_range` rejection-samples, so no index is favored no matter the
/// charset size. Callers must pass a non-empty charset.
pub fn sample<R: Rng + CryptoRng>(rng: &mut R, charset: &[char], length: usize) -> String {
    (0..length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect()
}

/// Alternate consonants and vowels, uppercasing roughly a third of the
/// consonants. Passwords of 10 or more characters get a two-digit pair
/// spliced at a random interior position, then are cut back to `length`.
pub fn pronounceable<R: Rng + CryptoRng>(rng: &mut R, length: usize) -> String {
    let consonants: Vec<char> = CONSONANTS.chars().collect();
    let vowels: Vec<char> = VOWELS.chars().collect();

    let mut password = String::with_capacity(length + 2);
    let mut use_consonant = true;

    while password.len() < length {
        let ch = if use_consonant {
            let c = consonants[rng.gen_range(0..consonants.len())];
            if rng.gen_range(0..3) == 0 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        } else {
            vowels[rng.gen_range(0..vowels.len())]
        };
        password.push(ch);
        use_consonant = !use_consonant;
    }

    if length >= 10 {
        let position = rng.gen_range(1..length - 1);
        let number = format!("{:02}", rng.gen_range(0..100));
        password.insert_str(position, &number);
        password.truncate(length);
    }

    password
}

/// Generate `request.count` passwords, discarding validated-class
/// candidates that miss the policy minimums. The attempt ceiling covers
/// the whole batch, so an unsatisfiable policy fails after
/// [`MAX_ATTEMPTS`] rather than spinning forever.
pub fn generate_batch<R: Rng + CryptoRng>(
    rng: &mut R,
    request: &GenerateRequest,
) -> Result<Vec<String>> {
    // Pronounceable and API-key synthesis carry their own alphabets.
    let charset = if request.class.is_validated() {
        charset::build(
            request.class,
            &request.special_chars,
            &request.exclude_chars,
            request.no_similar,
            &request.custom_charset,
        )?
    } else {
        Vec::new()
    };

    let mut passwords: Vec<String> = Vec::with_capacity(request.count);
    let mut attempts = 0;

    while passwords.len() < request.count && attempts < MAX_ATTEMPTS {
        attempts += 1;

        let mut candidate = match request.class {
            PasswordClass::Pronounce => pronounceable(rng, request.length),
            PasswordClass::ApiKey => apikey::generate(rng, request.length, request.api_format),
            _ => sample(rng, &charset, request.length),
        };

        // Pronounceable and API-key output is accepted as produced.
        if !request.class.is_validated() || request.policy.satisfied_by(&candidate) {
            passwords.push(candidate);
        } else {
            candidate.zeroize();
        }
    }

    if passwords.len() < request.count {
        let generated = passwords.len();
        for mut p in passwords {
            p.zeroize();
        }
        return Err(Error::GenerationExhausted {
            generated,
            requested: request.count,
            attempts: MAX_ATTEMPTS,
        });
    }

    Ok(passwords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn request(class: PasswordClass) -> GenerateRequest {
        GenerateRequest {
            length: 16,
            count: 1,
            class,
            special_chars: charset::DEFAULT_SPECIAL.to_string(),
            exclude_chars: String::new(),
            no_similar: false,
            policy: PolicyConstraint::new(0, 0, 0, 0),
            custom_charset: String::new(),
            api_format: ApiKeyFormat::Alphanum,
        }
    }

    #[test]
    fn sample_honors_length_and_charset() {
        let charset: Vec<char> = "ab".chars().collect();
        let password = sample(&mut thread_rng(), &charset, 32);
        assert_eq!(password.len(), 32);
        assert!(password.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn pronounceable_is_exact_length() {
        for length in [8, 9, 10, 11, 16, 25] {
            let password = pronounceable(&mut thread_rng(), length);
            assert_eq!(password.len(), length);
        }
    }

    #[test]
    fn short_pronounceable_alternates_consonants_and_vowels() {
        let consonants = "bcdfghjklmnpqrstvwxyz";
        let vowels = "aeiou";
        // Below 10 chars there is no digit splice to break the pattern.
        for _ in 0..20 {
            let password = pronounceable(&mut thread_rng(), 9);
            for (i, c) in password.chars().enumerate() {
                let lower = c.to_ascii_lowercase();
                if i % 2 == 0 {
                    assert!(consonants.contains(lower), "{password}: position {i}");
                } else {
                    assert!(vowels.contains(lower), "{password}: position {i}");
                }
            }
        }
    }

    #[test]
    fn long_pronounceable_contains_spliced_digits() {
        let password = pronounceable(&mut thread_rng(), 16);
        assert_eq!(password.len(), 16);
        assert_eq!(password.chars().filter(|c| c.is_ascii_digit()).count(), 2);
        // The splice lands strictly inside the password.
        assert!(!password.starts_with(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn batch_returns_requested_count() {
        let mut req = request(PasswordClass::Strong);
        req.count = 5;
        let passwords = generate_batch(&mut thread_rng(), &req).unwrap();
        assert_eq!(passwords.len(), 5);
        assert!(passwords.iter().all(|p| p.len() == 16));
    }

    #[test]
    fn batch_enforces_policy_minimums() {
        let mut req = request(PasswordClass::Strong);
        req.count = 3;
        req.policy = PolicyConstraint::new(2, 2, 2, 2);
        let passwords = generate_batch(&mut thread_rng(), &req).unwrap();
        for p in &passwords {
            assert!(req.policy.satisfied_by(p), "{p}");
        }
    }

    #[test]
    fn impossible_policy_exhausts_after_shared_ceiling() {
        // Numeric charset can never produce an uppercase letter.
        let mut req = request(PasswordClass::Numeric);
        req.special_chars = String::new();
        req.policy = PolicyConstraint::new(1, 0, 0, 0);
        let err = generate_batch(&mut thread_rng(), &req).unwrap_err();
        match err {
            Error::GenerationExhausted {
                generated,
                requested,
                attempts,
            } => {
                assert_eq!(generated, 0);
                assert_eq!(requested, 1);
                assert_eq!(attempts, MAX_ATTEMPTS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_charset_fails_before_any_attempt() {
        let mut req = request(PasswordClass::Custom);
        req.custom_charset = String::new();
        let err = generate_batch(&mut thread_rng(), &req).unwrap_err();
        assert!(matches!(err, Error::EmptyCharset));
    }

    #[test]
    fn api_keys_skip_policy_validation() {
        // A policy no alphanumeric key can meet still yields keys.
        let mut req = request(PasswordClass::ApiKey);
        req.policy = PolicyConstraint::new(0, 0, 0, 4);
        req.count = 2;
        let keys = generate_batch(&mut thread_rng(), &req).unwrap();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn pronounceable_skips_policy_validation() {
        // Pronounceable output never contains specials; the minimum
        // must not apply to it.
        let mut req = request(PasswordClass::Pronounce);
        req.policy = PolicyConstraint::new(0, 0, 0, 1);
        req.count = 2;
        let passwords = generate_batch(&mut thread_rng(), &req).unwrap();
        assert_eq!(passwords.len(), 2);
        assert!(passwords.iter().all(|p| p.len() == 16));
    }
}
