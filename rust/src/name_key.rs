//! Integer keys derived from personal names.
//!
//! The tree only needs a totally ordered key; this module turns a name
//! written in the Ukrainian alphabet into one. The first three letters are
//! read as base-100 digits (alphabet position, 0 for anything else) and the
//! capped name length is appended as a final decimal digit, so names sort
//! roughly alphabetically by their first three letters.

use std::collections::HashMap;

/// The Ukrainian alphabet in collation order; a letter's code is its position plus one.
pub const UKRAINIAN_ALPHABET: &str = "АБВГҐДЕЄЖЗИІЇЙКЛМНОПРСТУФХЦЧШЩЬЮЯ";

/// Number of leading letters that contribute to a key.
const PREFIX_LETTERS: usize = 3;

/// Radix for each prefix letter.
const LETTER_BASE: u64 = 100;

/// Longest length that still changes the trailing digit.
const MAX_LENGTH_DIGIT: usize = 9;

/// Maps names to integer keys.
#[derive(Debug, Clone)]
pub struct NameHasher {
    char_map: HashMap<char, u64>,
}

impl Default for NameHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl NameHasher {
    pub fn new() -> Self {
        let char_map = UKRAINIAN_ALPHABET.chars().zip(1..).collect();
        Self { char_map }
    }

    /// Alphabet code of an (upper-case) letter, 0 when it is not in the alphabet.
    pub fn letter_code(&self, letter: char) -> u64 {
        self.char_map.get(&letter).copied().unwrap_or(0)
    }

    /// Derive the key for `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::NameHasher;
    ///
    /// let hasher = NameHasher::new();
    /// assert_eq!(hasher.hash_name("Заєць"), 1_001_085);
    /// assert_eq!(hasher.hash_name("заєць"), hasher.hash_name("ЗАЄЦЬ"));
    /// assert_eq!(hasher.hash_name(""), 0);
    /// ```
    pub fn hash_name(&self, name: &str) -> u64 {
        let upper = name.to_uppercase();
        let mut letters = upper.chars();

        let prefix = (0..PREFIX_LETTERS).fold(0, |hash, _| {
            hash * LETTER_BASE + letters.next().map_or(0, |c| self.letter_code(c))
        });

        let length = upper.chars().count().min(MAX_LENGTH_DIGIT) as u64;
        prefix * 10 + length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_codes() {
        let hasher = NameHasher::new();
        assert_eq!(UKRAINIAN_ALPHABET.chars().count(), 33);
        assert_eq!(hasher.letter_code('А'), 1);
        assert_eq!(hasher.letter_code('Ґ'), 5);
        assert_eq!(hasher.letter_code('Я'), 33);
        assert_eq!(hasher.letter_code('Q'), 0);
    }

    #[test]
    fn test_sample_names() {
        let hasher = NameHasher::new();
        assert_eq!(hasher.hash_name("Зайченко"), 1_001_148);
        assert_eq!(hasher.hash_name("Заєць"), 1_001_085);
        assert_eq!(hasher.hash_name("Курча"), 1_524_215);
        assert_eq!(hasher.hash_name("Андрій"), 118_066);
        assert_eq!(hasher.hash_name("Іван"), 1_203_014);
        assert_eq!(hasher.hash_name("Ігор"), 1_204_194);
        assert_eq!(hasher.hash_name("Оксана"), 1_915_226);
    }

    #[test]
    fn test_short_and_long_names() {
        let hasher = NameHasher::new();
        // "Я": 33 followed by two empty positions, length 1
        assert_eq!(hasher.hash_name("Я"), 3_300_001);
        // length digit saturates at 9
        assert_eq!(hasher.hash_name("Олександрович") % 10, 9);
    }

    #[test]
    fn test_unknown_letters_count_as_zero() {
        let hasher = NameHasher::new();
        assert_eq!(hasher.hash_name("Bob"), 3);
        assert_eq!(hasher.hash_name("Аb"), 100_002);
    }
}
