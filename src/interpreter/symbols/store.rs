use std::collections::HashMap;

/// A name-keyed lookup table.
///
/// Keys are unique and non-empty. Besides exact lookup the store answers
/// longest-prefix queries, which the tokenizer uses to split runs such as
/// `arcsin` from `arc...` style prefixes or `pi` from `p...`.
///
/// There is no removal: a store only grows while a configuration is being
/// built and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct SymbolStore<V> {
    entries: HashMap<String, V>,
    /// Byte length of the longest key, bounding prefix searches.
    longest: usize,
}

impl<V> Default for SymbolStore<V> {
    fn default() -> Self {
        Self { entries: HashMap::new(),
               longest: 0, }
    }
}

impl<V> SymbolStore<V> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entry` under `key`, replacing any previous entry.
    ///
    /// Returns `false` and stores nothing when `key` is empty.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::symbols::SymbolStore;
    ///
    /// let mut store = SymbolStore::new();
    /// assert!(store.insert("pi", 3.0));
    /// assert!(store.insert("pi", std::f64::consts::PI));
    /// assert!(!store.insert("", 0.0));
    /// assert_eq!(store.len(), 1);
    /// assert_eq!(store.get("pi"), Some(&std::f64::consts::PI));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, entry: V) -> bool {
        let key = key.into();
        if key.is_empty() {
            return false;
        }
        self.longest = self.longest.max(key.len());
        self.entries.insert(key, entry);
        true
    }

    /// Looks up an entry by its exact name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Looks up an entry by its exact name for in-place updates.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Whether `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the registered names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Finds the longest registered name that `text` starts with.
    ///
    /// Returns the matched prefix of `text` together with its entry.
    ///
    /// # Example
    /// ```
    /// use zplot::interpreter::symbols::SymbolStore;
    ///
    /// let mut store = SymbolStore::new();
    /// store.insert("a", 1);
    /// store.insert("arc", 2);
    /// store.insert("arcsin", 3);
    ///
    /// assert_eq!(store.longest_prefix("arcsin(z)"), Some(("arcsin", &3)));
    /// assert_eq!(store.longest_prefix("arcs"), Some(("arc", &2)));
    /// assert_eq!(store.longest_prefix("b"), None);
    /// ```
    #[must_use]
    pub fn longest_prefix<'t>(&self, text: &'t str) -> Option<(&'t str, &V)> {
        let mut best = None;
        for (start, ch) in text.char_indices() {
            let end = start + ch.len_utf8();
            if end > self.longest {
                break;
            }
            let candidate = &text[..end];
            if let Some(entry) = self.entries.get(candidate) {
                best = Some((candidate, entry));
            }
        }
        best
    }
}
