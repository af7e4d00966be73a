//! Password strength scoring and entropy estimation.
//!
//! Both are functions of the string alone. Entropy is estimated from the
//! character classes *observed* in the password (26/26/10/32), not from
//! the charset it was generated over, so restricted custom alphabets are
//! deliberately overstated and partial alphabets understated. The scoring
//! bands depend on this behavior; do not "correct" it.

/// Score awarded for the reported maximum; long four-class passwords can
/// exceed it (length 20 with all classes scores 90).
pub const MAX_SCORE: i32 = 80;

/// Ascending three-character runs penalized by the scorer.
const SEQUENTIAL_RUNS: [&str; 13] = [
    "012", "123", "234", "345", "456", "567", "678", "789", "890", "abc", "bcd", "cde", "def",
];

/// Strength bands in score order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_score(score: i32) -> Self {
        if score >= 70 {
            Strength::VeryStrong
        } else if score >= 50 {
            Strength::Strong
        } else if score >= 30 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        }
    }
}

/// Which character classes appear in a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterTypes {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub special: bool,
}

impl CharacterTypes {
    pub fn of(password: &str) -> Self {
        Self {
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            digits: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }
}

/// Full analysis of one password, for verbose output.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub password: String,
    pub length: usize,
    pub score: i32,
    pub strength: Strength,
    pub max_score: i32,
    pub entropy_bits: f64,
    pub character_types: CharacterTypes,
}

/// Score a password: up to 40 points for length tiers, up to 50 for
/// character variety, minus 10 each for consecutive repeats and for
/// ascending runs.
pub fn score(password: &str) -> (i32, Strength) {
    let length = password.chars().count();
    let mut score = 0i32;

    if length >= 8 {
        score += 10;
    }
    if length >= 12 {
        score += 10;
    }
    if length >= 16 {
        score += 10;
    }
    if length >= 20 {
        score += 10;
    }

    let types = CharacterTypes::of(password);
    if types.lowercase {
        score += 10;
    }
    if types.uppercase {
        score += 10;
    }
    if types.digits {
        score += 10;
    }
    if types.special {
        score += 20;
    }

    if has_triple_repeat(password) {
        score -= 10;
    }
    if has_sequential_run(password) {
        score -= 10;
    }

    (score, Strength::from_score(score))
}

/// Estimated entropy in bits from observed character classes.
pub fn entropy_bits(password: &str) -> f64 {
    let types = CharacterTypes::of(password);
    let mut charset_size = 0u32;
    if types.lowercase {
        charset_size += 26;
    }
    if types.uppercase {
        charset_size += 26;
    }
    if types.digits {
        charset_size += 10;
    }
    if types.special {
        charset_size += 32;
    }

    if charset_size == 0 {
        return 0.0;
    }

    password.chars().count() as f64 * (charset_size as f64).log2()
}

pub fn analyze(password: &str) -> Analysis {
    let (score, strength) = score(password);
    let entropy = entropy_bits(password);

    Analysis {
        password: password.to_string(),
        length: password.chars().count(),
        score,
        strength,
        max_score: MAX_SCORE,
        entropy_bits: (entropy * 100.0).round() / 100.0,
        character_types: CharacterTypes::of(password),
    }
}

fn has_triple_repeat(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn has_sequential_run(password: &str) -> bool {
    SEQUENTIAL_RUNS.iter().any(|run| password.contains(run))
}
