//! Search-space accounting without materializing candidates

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of candidates, or a sentinel when it does not fit in a `u128`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceSize {
    Exact(u128),
    TooLarge,
}

impl SpaceSize {
    /// Clamp to an attempt cap
    pub fn capped(self, cap: Option<u64>) -> Self {
        match (self, cap) {
            (_, None) => self,
            (SpaceSize::TooLarge, Some(cap)) => SpaceSize::Exact(cap as u128),
            (SpaceSize::Exact(n), Some(cap)) => SpaceSize::Exact(n.min(cap as u128)),
        }
    }

    pub fn exact(&self) -> Option<u128> {
        match self {
            SpaceSize::Exact(n) => Some(*n),
            SpaceSize::TooLarge => None,
        }
    }

    /// The size as a `u64`, if it fits
    pub fn as_u64(&self) -> Option<u64> {
        self.exact().and_then(|n| u64::try_from(n).ok())
    }
}

impl std::fmt::Display for SpaceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaceSize::Exact(n) => write!(f, "{}", format_count(*n)),
            SpaceSize::TooLarge => write!(f, "too large to enumerate"),
        }
    }
}

/// Size of the space of fixed-length strings over an alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpace {
    pub alphabet_size: usize,
    pub length: usize,
    pub max_attempts: Option<u64>,
    /// alphabet_size ^ length
    pub total: SpaceSize,
    /// `total` clamped to `max_attempts`
    pub effective: SpaceSize,
}

impl SearchSpace {
    pub fn new(alphabet_size: usize, length: usize, max_attempts: Option<u64>) -> Self {
        let total = u32::try_from(length)
            .ok()
            .and_then(|exp| (alphabet_size as u128).checked_pow(exp))
            .map_or(SpaceSize::TooLarge, SpaceSize::Exact);

        Self {
            alphabet_size,
            length,
            max_attempts,
            total,
            effective: total.capped(max_attempts),
        }
    }

    /// True when the cap cuts the space short
    pub fn is_capped(&self) -> bool {
        self.total != self.effective
    }

    /// Time to test the whole effective space at `attempts_per_second`
    pub fn estimated_duration(&self, attempts_per_second: f64) -> Option<Duration> {
        if attempts_per_second <= 0.0 {
            return None;
        }
        let count = self.effective.exact()?;
        let secs = count as f64 / attempts_per_second;
        if secs.is_finite() && secs < u64::MAX as f64 {
            Some(Duration::from_secs_f64(secs))
        } else {
            None
        }
    }
}

/// Format a number with commas as the thousands separator.
pub fn format_count(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
