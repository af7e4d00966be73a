//! Minimum character-class requirements for generated passwords.

/// Per-category minimum counts a candidate must satisfy.
///
/// Validation is by character *category*, not by membership in the
/// generation charset: any non-alphanumeric character counts toward
/// `min_special`, whether or not it was in the special set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyConstraint {
    pub min_upper: usize,
    pub min_lower: usize,
    pub min_digit: usize,
    pub min_special: usize,
}

impl PolicyConstraint {
    pub fn new(min_upper: usize, min_lower: usize, min_digit: usize, min_special: usize) -> Self {
        Self {
            min_upper,
            min_lower,
            min_digit,
            min_special,
        }
    }

    /// True when every category count in `candidate` meets its minimum.
    pub fn satisfied_by(&self, candidate: &str) -> bool {
        let mut upper = 0usize;
        let mut lower = 0usize;
        let mut digit = 0usize;
        let mut special = 0usize;

        for c in candidate.chars() {
            if c.is_uppercase() {
                upper += 1;
            }
            if c.is_lowercase() {
                lower += 1;
            }
            if c.is_numeric() {
                digit += 1;
            }
            if !c.is_alphanumeric() {
                special += 1;
            }
        }

        upper >= self.min_upper
            && lower >= self.min_lower
            && digit >= self.min_digit
            && special >= self.min_special
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_accepts_anything() {
        let policy = PolicyConstraint::default();
        assert!(policy.satisfied_by(""));
        assert!(policy.satisfied_by("aaaa"));
    }

    #[test]
    fn counts_each_category() {
        let policy = PolicyConstraint::new(1, 1, 1, 1);
        assert!(policy.satisfied_by("Ab3$"));
        assert!(!policy.satisfied_by("ab3$")); // no uppercase
        assert!(!policy.satisfied_by("AB3$")); // no lowercase
        assert!(!policy.satisfied_by("Abc$")); // no digit
        assert!(!policy.satisfied_by("Ab34")); // no special
    }

    #[test]
    fn special_means_not_alphanumeric() {
        // A space is neither letter nor digit, so it counts as special.
        let policy = PolicyConstraint::new(0, 0, 0, 1);
        assert!(policy.satisfied_by("abc def"));
        assert!(policy.satisfied_by("x-y"));
        assert!(!policy.satisfied_by("abcdef"));
    }

    #[test]
    fn digits_count_by_category_not_ascii_range() {
        // U+0663 is a decimal digit: it satisfies min_digit and is not
        // special.
        let digits = PolicyConstraint::new(0, 0, 1, 0);
        assert!(digits.satisfied_by("abc\u{0663}def"));
        let special = PolicyConstraint::new(0, 0, 0, 1);
        assert!(!special.satisfied_by("abc\u{0663}def"));
    }

    #[test]
    fn minimums_above_length_reject() {
        let policy = PolicyConstraint::new(5, 0, 0, 0);
        assert!(!policy.satisfied_by("ABCD"));
        assert!(policy.satisfied_by("ABCDE"));
    }
}
