use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::utils::letters::{LetterDistribution, LetterTiles};

/// How a letter is picked when drawing from the bag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Every distinct letter still in the bag is equally likely,
    /// no matter how many of its tiles remain
    #[default]
    UniformLetters,
    /// Each remaining tile is equally likely
    WeightedTiles,
}

impl std::str::FromStr for DrawPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uniform" | "uniform_letters" => Ok(DrawPolicy::UniformLetters),
            "weighted" | "weighted_tiles" => Ok(DrawPolicy::WeightedTiles),
            other => Err(format!("unknown draw policy '{}'", other)),
        }
    }
}

/// Undrawn tiles of one game. A letter whose last tile is drawn is removed
/// from the map rather than kept with a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bag(BTreeMap<char, LetterTiles>);

impl Bag {
    /// Fresh bag holding every tile of the distribution
    pub fn from_distribution(distribution: &LetterDistribution) -> Self {
        Self(
            distribution
                .iter()
                .filter(|(_, entry)| entry.tiles > 0)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tiles left across all letters
    pub fn tile_count(&self) -> u32 {
        self.0.values().map(|entry| entry.tiles).sum()
    }

    /// Take one tile out of the bag. Returns `None` once the bag is empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R, policy: DrawPolicy) -> Option<char> {
        let letter = match policy {
            DrawPolicy::UniformLetters => self.pick_uniform_letter(rng)?,
            DrawPolicy::WeightedTiles => self.pick_weighted_tile(rng)?,
        };

        if let Some(entry) = self.0.get_mut(&letter) {
            if entry.tiles > 1 {
                entry.tiles -= 1;
            } else {
                self.0.remove(&letter);
            }
        }

        Some(letter)
    }

    fn pick_uniform_letter<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
        if self.0.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.0.len());
        self.0.keys().nth(index).copied()
    }

    fn pick_weighted_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
        let total = self.tile_count();
        if total == 0 {
            return None;
        }

        let mut target = rng.random_range(0..total);
        for (letter, entry) in &self.0 {
            if target < entry.tiles {
                return Some(*letter);
            }
            target -= entry.tiles;
        }

        None
    }
}
