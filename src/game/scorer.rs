use crate::utils::letters::LetterDistribution;

/// Points for each word of a move and their total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    /// Points per formed word, same order as the words
    pub word_scores: Vec<u32>,
    /// Sum of all word scores
    pub total: u32,
}

pub struct Scorer;

impl Scorer {
    /// Score every word formed by a move.
    ///
    /// Scoring rules:
    /// - Each letter is worth its point value from the distribution
    /// - A word is worth the sum of its letters
    /// - A move is worth the sum of its words
    ///
    /// Values always come from the distribution, never the live bag, so a
    /// letter keeps its value after its last tile is drawn.
    pub fn score_words(words: &[String], letters: &LetterDistribution) -> ScoreResult {
        let word_scores: Vec<u32> = words
            .iter()
            .map(|word| Self::word_score(word, letters))
            .collect();
        let total = word_scores.iter().sum();

        ScoreResult { word_scores, total }
    }

    fn word_score(word: &str, letters: &LetterDistribution) -> u32 {
        word.chars()
            .map(|letter| letters.points(letter).unwrap_or(0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_score_calculation() {
        let letters = LetterDistribution::standard();
        // C(3) + A(1) + T(1) = 5
        assert_eq!(Scorer::score_words(&["CAT".to_string()], letters).total, 5);
    }

    #[test]
    fn test_multiple_words_are_summed() {
        let letters = LetterDistribution::standard();
        let words = vec!["AT".to_string(), "BE".to_string(), "TE".to_string()];

        // AT = 2, BE = 3 + 1, TE = 2
        let result = Scorer::score_words(&words, letters);
        assert_eq!(result.word_scores, vec![2, 4, 2]);
        assert_eq!(result.total, 8);
    }

    #[test]
    fn test_high_value_letters() {
        let letters = LetterDistribution::standard();
        // Q(10) + I(1) = 11, Z(10) + A(1) = 11
        let words = vec!["QI".to_string(), "ZA".to_string()];
        assert_eq!(Scorer::score_words(&words, letters).total, 22);
    }

    #[test]
    fn test_unknown_letters_score_nothing() {
        let letters = LetterDistribution::standard();
        let result = Scorer::score_words(&["A?".to_string()], letters);
        assert_eq!(result.word_scores, vec![1]);
    }

    #[test]
    fn test_custom_distribution() {
        let json = r#"{"letters": {"A": {"tiles": 0, "points": 7}}}"#;
        let letters = LetterDistribution::from_json(json).unwrap();
        // Point values hold even for letters with no tiles left
        assert_eq!(Scorer::score_words(&["AA".to_string()], &letters).total, 14);
    }
}
