//! Explicit element-to-animator mapping owned by whoever manages the page.

use crate::error::Result;

/// Keys are compared with `PartialEq`; DOM handles have no stable hash.
#[derive(Debug)]
pub struct Registry<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: PartialEq, V> Registry<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Binds `key` unless its text is blank or it is already bound.
    ///
    /// Returns whether a new value was created.
    pub fn bind_with<F>(&mut self, key: K, text: &str, create: F) -> Result<bool>
    where
        F: FnOnce(&K) -> Result<V>,
    {
        if text.trim().is_empty() || self.contains(&key) {
            return Ok(false);
        }
        let value = create(&key)?;
        self.entries.push((key, value));
        Ok(true)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (K, V)> + '_ {
        self.entries.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RippleError;

    #[test]
    fn binds_once_per_key() {
        let mut reg: Registry<&str, usize> = Registry::new();
        assert_eq!(reg.bind_with("title", "Hello", |_| Ok(1)), Ok(true));
        assert_eq!(reg.bind_with("title", "Hello", |_| Ok(2)), Ok(false));
        assert_eq!(reg.get(&"title"), Some(&1));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn skips_blank_text_without_calling_factory() {
        let mut reg: Registry<&str, usize> = Registry::new();
        let bound = reg.bind_with("empty", "  \n", |_| panic!("factory must not run"));
        assert_eq!(bound, Ok(false));
        assert!(reg.is_empty());
    }

    #[test]
    fn factory_errors_leave_registry_untouched() {
        let mut reg: Registry<&str, usize> = Registry::new();
        let err = reg.bind_with("x", "text", |_| Err(RippleError::EmptyPalette));
        assert_eq!(err, Err(RippleError::EmptyPalette));
        assert!(!reg.contains(&"x"));
    }

    #[test]
    fn remove_and_drain() {
        let mut reg: Registry<u8, char> = Registry::new();
        reg.bind_with(1, "a", |_| Ok('a')).unwrap();
        reg.bind_with(2, "b", |_| Ok('b')).unwrap();
        if let Some(v) = reg.get_mut(&2) {
            *v = 'B';
        }
        assert_eq!(reg.remove(&1), Some('a'));
        assert_eq!(reg.remove(&1), None);
        assert_eq!(reg.drain().collect::<Vec<_>>(), vec![(2, 'B')]);
        assert!(reg.is_empty());
    }
}
