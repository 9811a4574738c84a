use std::fmt;

use stackseq_mem::PooledVec;

/// One key and every element that mapped to it, in arrival order.
///
/// The elements live in a pooled buffer owned by the grouping; dropping the
/// grouping returns it.
pub struct Grouping<K, T: Send + 'static> {
    pub(crate) key: K,
    pub(crate) elements: PooledVec<T>,
}

impl<K, T: Send + 'static> Grouping<K, T> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        self.elements.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elements.to_vec()
    }
}

impl<'a, K, T: Send + 'static> IntoIterator for &'a Grouping<K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, T: Send + 'static + fmt::Debug> fmt::Debug for Grouping<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouping")
            .field("key", &self.key)
            .field("elements", &self.elements)
            .finish()
    }
}
