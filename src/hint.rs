//! Hint generation.
//!
//! A hint is a short contiguous substring of a randomly chosen word. The set
//! of valid guesses for a hint is every word in the list containing it,
//! subject to the variant's length rule.

use crate::error::GameError;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;
use std::ops::RangeInclusive;

/// Game flavour: hint length, valid-word rule and countdown bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Two-letter hints, 10-20 second rounds, any word containing the hint.
    Classic,
    /// Two- or three-letter hints, 7-15 second rounds, valid words must be
    /// longer than the hint.
    #[default]
    Mixed,
}

impl Variant {
    #[must_use]
    pub fn hint_lengths(self) -> &'static [usize] {
        match self {
            Self::Classic => &[2],
            Self::Mixed => &[2, 3],
        }
    }

    #[must_use]
    pub fn round_seconds(self) -> RangeInclusive<u32> {
        match self {
            Self::Classic => 10..=20,
            Self::Mixed => 7..=15,
        }
    }

    /// Whether a word of `word_len` chars can be a valid guess for a hint of
    /// `hint_len` chars (containment is checked separately).
    #[must_use]
    pub fn admits(self, word_len: usize, hint_len: usize) -> bool {
        match self {
            Self::Classic => word_len >= hint_len,
            Self::Mixed => word_len > hint_len,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

/// The hint for one round together with its accepted answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    pub text: String,
    /// Word the hint was cut from. Always present in `valid_words`.
    pub source: String,
    pub valid_words: Vec<String>,
}

impl Hint {
    /// Case-insensitive membership test; surrounding whitespace is ignored.
    #[must_use]
    pub fn accepts(&self, guess: &str) -> bool {
        let guess = guess.trim().to_lowercase();
        !guess.is_empty() && self.valid_words.iter().any(|w| *w == guess)
    }
}

/// Pick a random hint from `words`.
///
/// Words that could not be valid for the chosen hint length are filtered out
/// up front, so this always terminates. If nothing qualifies for the chosen
/// length the variant's other lengths are tried before giving up.
///
/// # Errors
///
/// `EmptyWordList` for an empty list, `NoEligibleWords` when no word is long
/// enough for any of the variant's hint lengths.
pub fn pick_hint<R: Rng>(
    words: &[String],
    variant: Variant,
    rng: &mut R,
) -> Result<Hint, GameError> {
    if words.is_empty() {
        return Err(GameError::EmptyWordList);
    }

    let lengths = variant.hint_lengths();
    let preferred = *lengths.choose(rng).ok_or(GameError::NoEligibleWords { variant })?;
    let order = std::iter::once(preferred).chain(lengths.iter().copied().filter(|&l| l != preferred));

    for hint_len in order {
        let candidates: Vec<&String> = words
            .iter()
            .filter(|w| variant.admits(w.chars().count(), hint_len))
            .collect();
        let Some(source) = candidates.choose(rng) else {
            log::debug!("No {variant} candidates for hint length {hint_len}");
            continue;
        };

        let chars: Vec<char> = source.chars().collect();
        let start = rng.random_range(0..=chars.len() - hint_len);
        let text: String = chars[start..start + hint_len].iter().collect();
        let valid_words = valid_words_for(words, &text, variant);
        log::debug!(
            "Hint '{text}' from '{source}' with {} valid words",
            valid_words.len()
        );

        return Ok(Hint {
            text,
            source: (*source).clone(),
            valid_words,
        });
    }

    Err(GameError::NoEligibleWords { variant })
}

/// Every word in `words` (in list order) that contains `hint` and satisfies
/// the variant's length rule.
#[must_use]
pub fn valid_words_for(words: &[String], hint: &str, variant: Variant) -> Vec<String> {
    let hint_len = hint.chars().count();
    words
        .iter()
        .filter(|w| variant.admits(w.chars().count(), hint_len) && w.contains(hint))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_valid_words_example() {
        let list = words(&["apple", "maple", "grape"]);
        let valid = valid_words_for(&list, "ap", Variant::Classic);
        assert_eq!(valid, list);
        let valid = valid_words_for(&list, "ap", Variant::Mixed);
        assert_eq!(valid, list);
    }

    #[test]
    fn test_valid_words_excludes_non_matching() {
        let list = words(&["apple", "banana", "grape"]);
        let valid = valid_words_for(&list, "an", Variant::Classic);
        assert_eq!(valid, vec!["banana"]);
    }

    #[test]
    fn test_mixed_requires_strictly_longer_words() {
        let list = words(&["at", "cat", "atom"]);
        assert_eq!(valid_words_for(&list, "at", Variant::Classic), list);
        assert_eq!(valid_words_for(&list, "at", Variant::Mixed), vec!["cat", "atom"]);
    }

    #[test]
    fn test_hint_is_substring_of_source_and_source_is_valid() {
        let list = words(&["apple", "maple", "grape", "banana", "cherry", "kiwi", "fig"]);
        let mut rng = StdRng::seed_from_u64(7);
        for variant in [Variant::Classic, Variant::Mixed] {
            for _ in 0..200 {
                let hint = pick_hint(&list, variant, &mut rng).unwrap();
                assert!(variant.hint_lengths().contains(&hint.text.chars().count()));
                assert!(hint.source.contains(&hint.text));
                assert!(hint.valid_words.contains(&hint.source));
                assert!(hint.valid_words.iter().all(|w| list.contains(w)));
                assert!(hint.valid_words.iter().all(|w| w.contains(&hint.text)));
            }
        }
    }

    #[test]
    fn test_mixed_uses_both_hint_lengths() {
        let list = words(&["strawberry", "blueberry", "pineapple"]);
        let mut rng = StdRng::seed_from_u64(42);
        let lengths: Vec<usize> = (0..100)
            .map(|_| pick_hint(&list, Variant::Mixed, &mut rng).unwrap().text.len())
            .collect();
        assert!(lengths.contains(&2));
        assert!(lengths.contains(&3));
    }

    #[test]
    fn test_short_words_never_chosen_as_source() {
        let list = words(&["a", "b", "on", "tree"]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let hint = pick_hint(&list, Variant::Mixed, &mut rng).unwrap();
            assert_eq!(hint.source, "tree");
        }
    }

    #[test]
    fn test_falls_back_to_shorter_hint_length() {
        // Only a three-letter word: a 3-letter hint cannot be strictly shorter,
        // so every hint must be 2 letters long.
        let list = words(&["cat"]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let hint = pick_hint(&list, Variant::Mixed, &mut rng).unwrap();
            assert_eq!(hint.text.len(), 2);
            assert_eq!(hint.valid_words, vec!["cat"]);
        }
    }

    #[test]
    fn test_pathological_list_terminates_with_error() {
        let list = words(&["a", "i", "o"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pick_hint(&list, Variant::Classic, &mut rng),
            Err(GameError::NoEligibleWords {
                variant: Variant::Classic
            })
        ));
        let list = words(&["at", "on"]);
        assert!(matches!(
            pick_hint(&list, Variant::Mixed, &mut rng),
            Err(GameError::NoEligibleWords { .. })
        ));
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pick_hint(&[], Variant::Mixed, &mut rng),
            Err(GameError::EmptyWordList)
        ));
    }

    #[test]
    fn test_multibyte_words_are_sliced_on_char_boundaries() {
        let list = words(&["café", "naïve"]);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let hint = pick_hint(&list, Variant::Classic, &mut rng).unwrap();
            assert_eq!(hint.text.chars().count(), 2);
            assert!(hint.source.contains(&hint.text));
        }
    }

    #[test]
    fn test_accepts_is_case_insensitive() {
        let hint = Hint {
            text: "ap".to_string(),
            source: "apple".to_string(),
            valid_words: words(&["apple", "maple", "grape"]),
        };
        assert!(hint.accepts("Apple"));
        assert!(hint.accepts("MAPLE"));
        assert!(hint.accepts("  grape \n"));
        assert!(!hint.accepts("banana"));
        assert!(!hint.accepts(""));
    }

    #[test]
    fn test_variant_defaults() {
        assert_eq!(Variant::default(), Variant::Mixed);
        assert_eq!(Variant::Classic.round_seconds(), 10..=20);
        assert_eq!(Variant::Mixed.round_seconds(), 7..=15);
        assert_eq!(Variant::Classic.to_string(), "classic");
    }
}
