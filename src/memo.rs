/// Single-slot cache: remembers the last key and its value.
///
/// Keys are compared by value, so an equal configuration built separately
/// still hits. Any other key replaces the slot.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq + Clone, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    /// Failed computations leave the previous entry in place.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: &K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some((cached_key, value)) = &self.slot {
            if cached_key == key {
                self.hits += 1;
                return Ok(value.clone());
            }
        }

        let value = compute()?;
        self.misses += 1;
        self.slot = Some((key.clone(), value.clone()));
        Ok(value)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
