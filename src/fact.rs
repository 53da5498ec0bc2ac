use rand::Rng;

use crate::chant;
use crate::error::{Error, Result};

/// One operand of the times table, always in 1..=9.
/// Deserializing goes through [`Factor::new`], so the range holds there too.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Factor(u8);

impl Factor {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 9;

    pub fn new(value: u32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Error::InvalidFactor(value));
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }

    /// Uniform draw over 1..=9.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=9))
    }

    pub fn all() -> impl Iterator<Item = Factor> {
        (1..=9).map(Factor)
    }
}

impl TryFrom<u32> for Factor {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Factor::new(value)
    }
}

impl From<Factor> for u32 {
    fn from(factor: Factor) -> Self {
        factor.get()
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single cell of the grid, as shown by the explainer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MultiplicationFact {
    pub a: Factor,
    pub b: Factor,
    pub result: u32,
    pub chinese_text: String,
}

impl MultiplicationFact {
    pub fn new(a: Factor, b: Factor) -> Self {
        Self {
            a,
            b,
            result: a.get() * b.get(),
            chinese_text: chant::chant(a, b),
        }
    }
}

const PICK_SEPARATORS: [char; 5] = ['×', 'x', 'X', '*', ' '];

/// Reads a grid pick such as "3x4", "3 × 4" or "3*4".
/// Anything but exactly two factors in 1..=9 is rejected.
pub fn parse_pick(text: &str) -> Option<(Factor, Factor)> {
    let parts = text
        .trim()
        .split(|c: char| PICK_SEPARATORS.contains(&c))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();

    if parts.len() != 2 {
        return None;
    }

    let a = Factor::new(parts[0].parse().ok()?).ok()?;
    let b = Factor::new(parts[1].parse().ok()?).ok()?;
    Some((a, b))
}
