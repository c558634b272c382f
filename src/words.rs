use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Word Source Trait
// ============================================================================

/// Supplies labels for upcoming tiles.
pub trait WordSource {
    fn next_word(&mut self) -> String;
}

/// Draws single characters uniformly from a pool built out of the phrase
/// dictionary, so every phrase stays spellable.
pub struct RandomWordSource {
    pool: Vec<char>,
    rng: StdRng,
}

impl RandomWordSource {
    pub fn from_phrases<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self::with_rng(phrases, StdRng::from_entropy())
    }

    pub fn seeded<S: AsRef<str>>(phrases: &[S], seed: u64) -> Self {
        Self::with_rng(phrases, StdRng::seed_from_u64(seed))
    }

    fn with_rng<S: AsRef<str>>(phrases: &[S], rng: StdRng) -> Self {
        let pool = phrases
            .iter()
            .flat_map(|phrase| phrase.as_ref().chars())
            .collect();
        Self { pool, rng }
    }
}

impl WordSource for RandomWordSource {
    fn next_word(&mut self) -> String {
        if self.pool.is_empty() {
            return String::new();
        }
        let index = self.rng.gen_range(0..self.pool.len());
        self.pool[index].to_string()
    }
}

/// Replays a fixed list of words, wrapping around at the end.
pub struct SequenceWordSource {
    words: Vec<String>,
    index: usize,
}

impl SequenceWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }
}

impl WordSource for SequenceWordSource {
    fn next_word(&mut self) -> String {
        if self.words.is_empty() {
            return String::new();
        }
        let word = self.words[self.index % self.words.len()].clone();
        self.index += 1;
        word
    }
}
