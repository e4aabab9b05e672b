use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// The number of slots a new [`AssociativeArray`] starts with.
pub const DEFAULT_CAPACITY: usize = 16;

/// Returned when a lookup is asked for a key that isn't in the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("key not found")]
pub struct KeyNotFound;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvPair<K, V> {
    pub key: K,
    pub value: V
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KvPair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// A map from `K` to `V` backed by a growable array of pairs.
///
/// Keys only need [`Eq`]: every lookup is a linear scan of the occupied slots.
/// Live pairs always occupy `0..size()` with no gaps and the spare capacity past them is the empty slots.
/// [`Self::remove`] moves the last pair into the freed slot, so slot order stops matching insertion order after the first removal.
/// Capacity never shrinks.
pub struct AssociativeArray<K, V> {
    pairs: Vec<KvPair<K, V>>
}

impl<K, V> AssociativeArray<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity)
        }
    }

    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pairs.capacity()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(self.pairs.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.pairs.iter().map(|pair| &pair.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.pairs.iter().map(|pair| &pair.value)
    }

    /// At least doubles the slot count. Occupied slots keep their indices.
    fn expand(&mut self) {
        let old = self.pairs.capacity();
        self.pairs.reserve_exact(old.max(1));
        log::trace!("Expanded associative array from {old} to {} slots", self.pairs.capacity());
    }
}

impl<K: Eq, V> AssociativeArray<K, V> {
    fn find(&self, key: &K) -> Option<usize> {
        for (i, pair) in self.pairs.iter().enumerate() {
            if pair.key==*key {
                return Some(i);
            }
        }
        None
    }

    /// Associates `value` with `key`.
    ///
    /// An existing pair is overwritten in place and its old value returned.
    /// Otherwise the pair goes into the first empty slot, growing the array first if it's full.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        if let Some(i) = self.find(&key) {
            return Some(std::mem::replace(&mut self.pairs[i].value, value));
        }
        if self.pairs.len()==self.pairs.capacity() {
            self.expand();
        }
        self.pairs.push(KvPair {key, value});
        None
    }

    /// # Errors
    /// If `key` isn't in the array, returns the error [`KeyNotFound`].
    pub fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        self.find(key).map(|i| &self.pairs[i].value).ok_or(KeyNotFound)
    }

    /// # Errors
    /// If `key` isn't in the array, returns the error [`KeyNotFound`].
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, KeyNotFound> {
        let i = self.find(key).ok_or(KeyNotFound)?;
        Ok(&mut self.pairs[i].value)
    }

    pub fn has_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the pair for `key` by moving the last pair into its slot.
    ///
    /// Removing a key that isn't present does nothing and returns [`None`].
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.find(key)?;
        Some(self.pairs.swap_remove(i).value)
    }
}

impl<K, V> Default for AssociativeArray<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The clone gets its own default-capacity storage, filled by [`AssociativeArray::set`] in the source's slot order.
impl<K: Eq + Clone, V: Clone> Clone for AssociativeArray<K, V> {
    fn clone(&self) -> Self {
        let mut ret = Self::new();
        for pair in self.pairs.iter() {
            ret.set(pair.key.clone(), pair.value.clone());
        }
        ret
    }
}

/// `{}` when empty, otherwise `{ k1: v1, k2: v2 }` in slot order.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for AssociativeArray<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pairs.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pair}")?;
        }
        f.write_str(" }")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AssociativeArray<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V> FromIterator<(K, V)> for AssociativeArray<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}

impl<K: Eq, V> Extend<(K, V)> for AssociativeArray<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

pub struct Iter<'a, K, V>(std::slice::Iter<'a, KvPair<K, V>>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|pair| (&pair.key, &pair.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|pair| (&pair.key, &pair.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

pub struct IntoIter<K, V>(std::vec::IntoIter<KvPair<K, V>>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|pair| (pair.key, pair.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<'a, K, V> IntoIterator for &'a AssociativeArray<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for AssociativeArray<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.pairs.into_iter())
    }
}

impl<K: Serialize, V: Serialize> Serialize for AssociativeArray<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for pair in self.pairs.iter() {
            map.serialize_entry(&pair.key, &pair.value)?;
        }
        map.end()
    }
}

struct AssociativeArrayVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K: Deserialize<'de> + Eq, V: Deserialize<'de>> Visitor<'de> for AssociativeArrayVisitor<K, V> {
    type Value = AssociativeArray<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut ret = AssociativeArray::new();
        // Duplicate keys overwrite, same as repeated `set`s.
        while let Some((key, value)) = access.next_entry()? {
            ret.set(key, value);
        }
        Ok(ret)
    }
}

impl<'de, K: Deserialize<'de> + Eq, V: Deserialize<'de>> Deserialize<'de> for AssociativeArray<K, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AssociativeArrayVisitor(PhantomData))
    }
}
