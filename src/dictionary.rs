//! Word table shared by every compress/decompress call.

use crate::error::{Error, Result};
use ahash::AHashMap as HashMap;
use std::collections::BTreeSet;
use std::io::Read;

/// Bundled English word list, one word per line, most frequent first.
const BUILTIN_WORDS: &str = include_str!("../resources/words-en.txt");

/// Largest table a `u16` index can address.
const MAX_ENTRIES: usize = u16::MAX as usize + 1;

/// Ordered word table with its reverse lookup.
///
/// Indices are dense and follow the order of the word list. Immutable once
/// built, so a single instance can be shared by reference across threads.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Words in index order
    words: Vec<String>,

    /// Maps a word to the index of its first occurrence
    index: HashMap<String, u16>,
}

impl Dictionary {
    /// Builds a dictionary from a newline-separated word list.
    ///
    /// Lines are trimmed and empty lines skipped. A word listed twice keeps
    /// the index of its first occurrence.
    pub fn from_word_list(list: &str) -> Result<Self> {
        let words: Vec<String> = list
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_owned)
            .collect();

        if words.len() > MAX_ENTRIES {
            return Err(Error::DictionaryTooLarge(words.len()));
        }

        let mut index = HashMap::with_capacity(words.len());
        let mut duplicates = 0usize;
        for (i, word) in words.iter().enumerate() {
            // Bounded by MAX_ENTRIES above
            let id = i as u16;
            if index.contains_key(word.as_str()) {
                duplicates += 1;
            } else {
                index.insert(word.clone(), id);
            }
        }

        tracing::debug!(entries = words.len(), duplicates, "loaded dictionary");

        Ok(Self { words, index })
    }

    /// Appends words not yet in the table, keeping every existing index.
    ///
    /// Words are trimmed; empty and already known words are skipped. Fails
    /// without modifying anything if the result would exceed the index range.
    pub fn with_words<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || self.contains(word) || added.iter().any(|w| w == word) {
                continue;
            }
            added.push(word.to_owned());
        }

        let total = self.words.len() + added.len();
        if total > MAX_ENTRIES {
            return Err(Error::DictionaryTooLarge(total));
        }

        for word in added {
            // Bounded by MAX_ENTRIES above
            let id = self.words.len() as u16;
            self.index.insert(word.clone(), id);
            self.words.push(word);
        }

        tracing::debug!(entries = self.words.len(), "extended dictionary");
        Ok(self)
    }

    /// Builds a dictionary from any reader producing a UTF-8 word list.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut list = String::new();
        reader.read_to_string(&mut list)?;
        Self::from_word_list(&list)
    }

    /// Returns the bundled English dictionary.
    pub fn builtin() -> Self {
        Self::from_word_list(BUILTIN_WORDS).expect("bundled word list fits the index range")
    }

    /// Returns the index of `word`, if present.
    pub fn lookup(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Returns true if `word` is in the table.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Returns the word at `index`, or `None` if it is out of range.
    pub fn resolve(&self, index: u32) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the words in index order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Collects the words of `text` that the table does not cover.
    ///
    /// Words are split on whitespace, stripped of surrounding ASCII
    /// punctuation and lowercased. Tokens made only of punctuation are ignored.
    pub fn unknown_words(&self, text: &str) -> BTreeSet<String> {
        text.split_whitespace()
            .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .filter(|word| !self.contains(word))
            .collect()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_indices() {
        let dict = Dictionary::from_word_list("the\ncat\nsat\n").unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.lookup("the"), Some(0));
        assert_eq!(dict.lookup("cat"), Some(1));
        assert_eq!(dict.lookup("sat"), Some(2));
        assert_eq!(dict.resolve(1), Some("cat"));
    }

    #[test]
    fn test_skips_blank_lines_and_trims() {
        let dict = Dictionary::from_word_list("  the \r\n\n\ncat\t\n").unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.lookup("the"), Some(0));
        assert_eq!(dict.lookup("cat"), Some(1));
        assert_eq!(dict.lookup(""), None);
    }

    #[test]
    fn test_duplicate_keeps_first_index() {
        let dict = Dictionary::from_word_list("a\nb\na\n").unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.lookup("a"), Some(0));
        assert_eq!(dict.resolve(2), Some("a"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dict = Dictionary::from_word_list("cat").unwrap();
        assert_eq!(dict.lookup("Cat"), None);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let dict = Dictionary::from_word_list("cat").unwrap();
        assert_eq!(dict.resolve(1), None);
        assert_eq!(dict.resolve(u32::MAX), None);
    }

    #[test]
    fn test_with_words_appends_unknown() {
        let dict = Dictionary::from_word_list("the\ncat\n").unwrap();
        let unknown = dict.unknown_words("The cat chased the mouse, the mouse hid.");
        let dict = dict.with_words(&unknown).unwrap();

        assert_eq!(dict.lookup("the"), Some(0));
        assert_eq!(dict.lookup("cat"), Some(1));
        assert_eq!(dict.len(), 5);
        // BTreeSet order: chased, hid, mouse
        assert_eq!(dict.lookup("chased"), Some(2));
        assert_eq!(dict.lookup("hid"), Some(3));
        assert_eq!(dict.lookup("mouse"), Some(4));
        assert!(dict.unknown_words("the mouse hid").is_empty());
    }

    #[test]
    fn test_with_words_skips_known_and_blank() {
        let dict = Dictionary::from_word_list("cat")
            .unwrap()
            .with_words([" cat ", "", "dog", "dog"])
            .unwrap();
        assert_eq!(dict.words().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn test_with_words_too_large() {
        let list: String = (0..MAX_ENTRIES).map(|i| format!("w{i}\n")).collect();
        let dict = Dictionary::from_word_list(&list).unwrap();
        assert!(matches!(
            dict.with_words(["extra"]),
            Err(Error::DictionaryTooLarge(n)) if n == MAX_ENTRIES + 1
        ));
    }

    #[test]
    fn test_too_large() {
        let list: String = (0..=MAX_ENTRIES).map(|i| format!("w{i}\n")).collect();
        assert!(matches!(
            Dictionary::from_word_list(&list),
            Err(Error::DictionaryTooLarge(n)) if n == MAX_ENTRIES + 1
        ));
    }

    #[test]
    fn test_from_reader() {
        let dict = Dictionary::from_reader("yes\nno\n".as_bytes()).unwrap();
        assert_eq!(dict.lookup("no"), Some(1));
    }

    #[test]
    fn test_builtin_has_common_words() {
        let dict = Dictionary::builtin();
        assert!(!dict.is_empty());
        assert_eq!(dict.lookup("the"), Some(0));
        for word in ["cat", "sat", "stop", "yes", "hello", "world"] {
            assert!(dict.contains(word), "missing {word}");
        }
        assert!(dict.words().all(|w| w == w.to_lowercase()));
    }

    #[test]
    fn test_unknown_words() {
        let dict = Dictionary::from_word_list("the\ncat\n").unwrap();
        let unknown = dict.unknown_words("The cat, the DOG... and \"Mouse\"! --");
        let expected: Vec<&str> = vec!["and", "dog", "mouse"];
        assert_eq!(unknown.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }
}
