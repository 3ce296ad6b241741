//! Memory items and the per-round sequence.

use crate::config::ItemType;
use crate::trial::StimulusGenerator;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Word pool for word and mixed levels.
pub const WORDS: [&str; 12] = [
    "CAT", "DOG", "SUN", "MOON", "TREE", "BOOK", "DOOR", "FISH", "BIRD", "STAR", "DESK", "LAMP",
];

fn letter<R: Rng + ?Sized>(rng: &mut R) -> String {
    char::from(b'A' + rng.gen_range(0..26u8)).to_string()
}

fn word<R: Rng + ?Sized>(rng: &mut R) -> String {
    WORDS[rng.gen_range(0..WORDS.len())].to_string()
}

/// Draws items from the pool a level asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryItemGenerator {
    item_type: ItemType,
}

impl MemoryItemGenerator {
    pub fn new(item_type: ItemType) -> Self {
        Self { item_type }
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }
}

impl StimulusGenerator for MemoryItemGenerator {
    type Stimulus = String;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.item_type {
            ItemType::Letters => letter(rng),
            ItemType::Words => word(rng),
            ItemType::Mixed => {
                if rng.gen_bool(0.5) {
                    letter(rng)
                } else {
                    word(rng)
                }
            }
        }
    }
}

/// Items memorized so far this round, in display order.
///
/// Append-only while the round runs; cleared when the next round starts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySequence(Vec<String>);

impl MemorySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.0.push(item.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Positional, case-insensitive comparison against recalled tokens.
    pub fn matches<T: AsRef<str>>(&self, tokens: &[T]) -> bool {
        self.0.len() == tokens.len()
            && self
                .0
                .iter()
                .zip(tokens)
                .all(|(item, token)| item.eq_ignore_ascii_case(token.as_ref()))
    }
}

impl<S: Into<String>> FromIterator<S> for MemorySequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn letters_cover_the_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let generator = MemoryItemGenerator::new(ItemType::Letters);
        let seen: HashSet<String> = (0..3000).map(|_| generator.generate(&mut rng)).collect();

        assert_eq!(seen.len(), 26);
        assert!(seen.iter().all(|s| s.len() == 1 && s.chars().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn words_come_from_the_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let generator = MemoryItemGenerator::new(ItemType::Words);
        for _ in 0..200 {
            assert!(WORDS.contains(&generator.generate(&mut rng).as_str()));
        }
    }

    #[test]
    fn mixed_draws_from_both_pools() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let generator = MemoryItemGenerator::new(ItemType::Mixed);
        let items: Vec<String> = (0..400).map(|_| generator.generate(&mut rng)).collect();

        let words = items.iter().filter(|i| WORDS.contains(&i.as_str())).count();
        let letters = items.iter().filter(|i| i.len() == 1).count();
        assert_eq!(words + letters, items.len());
        assert!(words > 100 && letters > 100);
    }

    #[test]
    fn sequence_matches_positionally() {
        let sequence: MemorySequence = ["A", "CAT", "B"].into_iter().collect();

        assert!(sequence.matches(&["a", "cat", "B"]));
        assert!(!sequence.matches(&["A", "B", "CAT"]));
        assert!(!sequence.matches(&["A", "CAT"]));
        assert!(!sequence.matches::<&str>(&[]));
    }
}
