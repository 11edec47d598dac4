use std::{
    collections::{HashMap, VecDeque},
    hash::Hash,
};

/// Ёмкость кэша результатов по умолчанию.
pub const DEFAULT_RESULT_CACHE_CAPACITY: usize = 10;

/// Ограниченный кэш результатов, вытесняющий самую старую запись.
///
/// Владеется вызывающим; глобального экземпляра нет.
#[derive(Debug, Clone)]
pub struct ResultCache<K, V> {
    capacity: usize,
    order: VecDeque<K>,
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash + Clone, V> ResultCache<K, V> {
    /// Ёмкость 0 поднимается до 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Вставляет значение. Возвращает вытесненную запись, если кэш был полон.
    ///
    /// Повторная вставка ключа заменяет значение, не меняя его очередь.
    pub fn insert(
        &mut self,
        key: K,
        value: V,
    ) -> Option<(K, V)> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.order
                .pop_front()
                .and_then(|old| self.entries.remove(&old).map(|v| (old, v)))
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    pub fn get(
        &self,
        key: &K,
    ) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(
        &self,
        key: &K,
    ) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(
        &mut self,
        key: &K,
    ) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K: Eq + Hash + Clone, V> Default for ResultCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let mut cache = ResultCache::new(2);

        assert!(cache.insert("a", 1).is_none());
        assert!(cache.insert("b", 2).is_none());
        assert_eq!(cache.insert("c", 3), Some(("a", 1)));

        assert!(!cache.contains(&"a"));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut cache = ResultCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);

        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.insert("c", 3), Some(("a", 10)));
    }

    #[test]
    fn test_default_capacity_and_zero_clamp() {
        let cache: ResultCache<u32, u32> = ResultCache::default();
        assert_eq!(cache.capacity(), DEFAULT_RESULT_CACHE_CAPACITY);

        let mut tiny = ResultCache::new(0);
        assert_eq!(tiny.capacity(), 1);
        tiny.insert(1, "x");
        assert_eq!(tiny.insert(2, "y"), Some((1, "x")));
    }

    #[test]
    fn test_remove() {
        let mut cache = ResultCache::new(3);
        cache.insert(1, 'a');
        cache.insert(2, 'b');

        assert_eq!(cache.remove(&1), Some('a'));
        assert_eq!(cache.remove(&1), None);
        assert!(!cache.is_empty());
    }
}
