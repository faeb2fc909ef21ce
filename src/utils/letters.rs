use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Letter table bundled with the binary
const STANDARD_LETTERS: &str = include_str!("../../resources/letters.json");

/// Standard English distribution (no blanks), parsed once per process
pub static STANDARD_DISTRIBUTION: Lazy<LetterDistribution> = Lazy::new(|| {
    LetterDistribution::from_json(STANDARD_LETTERS).expect("bundled letters.json must be valid")
});

/// Tile count and point value for a single letter.
///
/// The same shape is used for the immutable distribution and for a game's
/// live bag, where `tiles` is the number still undrawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LetterTiles {
    pub tiles: u32,
    pub points: u32,
}

#[derive(Debug, Deserialize)]
struct LettersFile {
    letters: BTreeMap<char, LetterTiles>,
}

/// Immutable letter -> {tiles, points} table that seeds every bag and
/// provides point values to the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDistribution {
    letters: BTreeMap<char, LetterTiles>,
}

impl LetterDistribution {
    /// The distribution bundled in `resources/letters.json`
    pub fn standard() -> &'static LetterDistribution {
        &STANDARD_DISTRIBUTION
    }

    /// Parse a distribution from `{"letters": {"A": {"tiles": 9, "points": 1}, ...}}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: LettersFile =
            serde_json::from_str(json).context("letters file is not valid JSON")?;

        if file.letters.is_empty() {
            anyhow::bail!("letters file contains no letters");
        }
        // Submitted moves are upper-cased, so lowercase keys could never be played
        if let Some(letter) = file.letters.keys().find(|c| !c.is_uppercase()) {
            anyhow::bail!("letters file key '{}' is not an uppercase letter", letter);
        }

        Ok(Self {
            letters: file.letters,
        })
    }

    /// Load a distribution from a file on disk
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read letters file {}", path.display()))?;
        let distribution = Self::from_json(&content)?;

        tracing::info!(
            "Loaded {} letters ({} tiles) from {}",
            distribution.letters.len(),
            distribution.total_tiles(),
            path.display()
        );

        Ok(distribution)
    }

    /// Point value of a letter, if the letter is part of the distribution
    pub fn points(&self, letter: char) -> Option<u32> {
        self.letters.get(&letter).map(|entry| entry.points)
    }

    /// Total number of tiles across all letters
    pub fn total_tiles(&self) -> u32 {
        self.letters.values().map(|entry| entry.tiles).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterTiles)> + '_ {
        self.letters.iter().map(|(letter, entry)| (*letter, *entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_letter_values() {
        let letters = LetterDistribution::standard();
        assert_eq!(letters.points('E'), Some(1));
        assert_eq!(letters.points('Q'), Some(10));
        assert_eq!(letters.points('X'), Some(8));
        assert_eq!(letters.points('D'), Some(2));
        assert_eq!(letters.points('?'), None);
    }

    #[test]
    fn test_standard_distribution_size() {
        let letters = LetterDistribution::standard();
        assert_eq!(letters.iter().count(), 26);
        // 100 tiles in a standard set, minus the two blanks
        assert_eq!(letters.total_tiles(), 98);
    }

    #[test]
    fn test_from_json_rejects_multi_character_keys() {
        let json = r#"{"letters": {"AB": {"tiles": 1, "points": 1}}}"#;
        assert!(LetterDistribution::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_empty_table() {
        assert!(LetterDistribution::from_json(r#"{"letters": {}}"#).is_err());
        assert!(LetterDistribution::from_json(r#"{"letters": {"1": {"tiles": 1, "points": 1}}}"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_lowercase_keys() {
        let json = r#"{"letters": {"a": {"tiles": 20, "points": 1}}}"#;
        let err = LetterDistribution::from_json(json).unwrap_err();
        assert!(err.to_string().contains("'a'"));

        let json = r#"{"letters": {"A": {"tiles": 9, "points": 1}, "b": {"tiles": 2, "points": 3}}}"#;
        assert!(LetterDistribution::from_json(json).is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let result = LetterDistribution::load("./does-not-exist/letters.json").await;
        assert!(result.is_err());
    }
}
