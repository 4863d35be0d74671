//! Candidate generation - alphabets, search-space accounting and enumeration
//!
//! Candidates are produced in base-N counting order over the alphabet, with the
//! rightmost position varying fastest.

mod alphabet;
mod generator;
mod space;

pub use alphabet::Alphabet;
pub use generator::CandidateGenerator;
pub use space::{format_count, SearchSpace, SpaceSize};

/// Character class that can be enabled in a [`crate::types::CharsetSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Digits (0-9)
    Digits,
    /// Lowercase letters (a-z)
    Lowercase,
    /// Uppercase letters (A-Z)
    Uppercase,
    /// ASCII punctuation
    Special,
}

impl CharClass {
    /// Classes in alphabet order
    pub const ALL: [CharClass; 4] = [
        CharClass::Digits,
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Special,
    ];

    pub fn chars(&self) -> &'static str {
        match self {
            CharClass::Digits => "0123456789",
            CharClass::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            CharClass::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharClass::Special => "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
        }
    }

    pub fn size(&self) -> usize {
        self.chars().len()
    }
}

impl std::fmt::Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharClass::Digits => write!(f, "digits"),
            CharClass::Lowercase => write!(f, "lowercase"),
            CharClass::Uppercase => write!(f, "uppercase"),
            CharClass::Special => write!(f, "special"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_sizes() {
        assert_eq!(CharClass::Digits.size(), 10);
        assert_eq!(CharClass::Lowercase.size(), 26);
        assert_eq!(CharClass::Uppercase.size(), 26);
        assert_eq!(CharClass::Special.size(), 32);
    }

    #[test]
    fn test_special_is_ascii_punctuation() {
        assert!(CharClass::Special.chars().chars().all(|c| c.is_ascii_punctuation()));
    }
}
