//! Fixed-length candidate generator

use std::iter::FusedIterator;

use super::{Alphabet, SearchSpace};

/// Generator for every string of `length` characters over an alphabet.
///
/// Candidates come out in counting order: the rightmost position varies
/// fastest and the alphabet order is the digit order. The sequence stops after
/// `min(alphabet_size ^ length, max_attempts)` items.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    chars: Vec<char>,
    length: usize,
    space: SearchSpace,
    /// Alphabet index of every position, leftmost first
    positions: Vec<usize>,
    emitted: u64,
    exhausted: bool,
}

impl CandidateGenerator {
    /// Create a new generator for candidates of given length
    pub fn new(alphabet: &Alphabet, length: usize, max_attempts: Option<u64>) -> Self {
        let chars = alphabet.chars().to_vec();
        let space = SearchSpace::new(chars.len(), length, max_attempts);
        let exhausted = (chars.is_empty() && length > 0) || max_attempts == Some(0);

        Self {
            chars,
            length,
            space,
            positions: vec![0; length],
            emitted: 0,
            exhausted,
        }
    }

    /// Search space covered by this generator
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of candidates produced so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Check if generator is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Rewind to the first candidate
    pub fn reset(&mut self) {
        let max_attempts = self.space.max_attempts;
        self.positions.iter_mut().for_each(|p| *p = 0);
        self.emitted = 0;
        self.exhausted = (self.chars.is_empty() && self.length > 0) || max_attempts == Some(0);
    }

    /// Generate the candidate at a specific index of the uncapped sequence
    pub fn candidate_at(&self, index: u128) -> Option<String> {
        if let Some(total) = self.space.total.exact() {
            if index >= total {
                return None;
            }
        }

        let base = self.chars.len() as u128;
        let mut result = vec![' '; self.length];
        let mut n = index;

        for i in (0..self.length).rev() {
            result[i] = self.chars[(n % base) as usize];
            n /= base;
        }

        Some(result.into_iter().collect())
    }

    /// Generate next batch of candidates
    pub fn next_batch(&mut self, count: usize) -> Vec<String> {
        self.by_ref().take(count).collect()
    }

    fn current(&self) -> String {
        self.positions.iter().map(|&p| self.chars[p]).collect()
    }

    /// Step the positions like an odometer; returns false once every position wrapped.
    fn advance(&mut self) -> bool {
        for pos in self.positions.iter_mut().rev() {
            *pos += 1;
            if *pos < self.chars.len() {
                return true;
            }
            *pos = 0;
        }
        false
    }
}

impl Iterator for CandidateGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let candidate = self.current();
        self.emitted += 1;

        let capped = self.space.max_attempts.is_some_and(|cap| self.emitted >= cap);
        if capped || !self.advance() {
            self.exhausted = true;
        }

        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let remaining = self
            .space
            .effective
            .exact()
            .map(|total| total - self.emitted as u128)
            .and_then(|n| usize::try_from(n).ok());
        match remaining {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for CandidateGenerator {}
