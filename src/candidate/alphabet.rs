//! Alphabet construction from enabled character classes

use super::CharClass;
use crate::error::{Result, ZipForceError};
use crate::types::CharsetSpec;

/// Ordered, non-empty set of characters eligible for every candidate position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Concatenate the enabled classes in digits, lowercase, uppercase, special order
    pub fn from_spec(spec: &CharsetSpec) -> Result<Self> {
        if !spec.any() {
            return Err(ZipForceError::config(
                "At least one character type must be selected",
            ));
        }

        let enabled = [spec.digits, spec.lowercase, spec.uppercase, spec.special];
        let chars = CharClass::ALL
            .iter()
            .zip(enabled)
            .filter(|(_, on)| *on)
            .flat_map(|(class, _)| class.chars().chars())
            .collect();

        Ok(Self { chars })
    }

    /// Build an alphabet from an explicit character list.
    ///
    /// Repeated characters are dropped, keeping the first occurrence.
    pub fn from_chars(chars: &str) -> Result<Self> {
        let mut unique: Vec<char> = Vec::with_capacity(chars.len());
        for c in chars.chars() {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        if unique.is_empty() {
            return Err(ZipForceError::config("Alphabet cannot be empty"));
        }

        Ok(Self { chars: unique })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
