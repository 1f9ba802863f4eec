//! Raw value storage for a single position
//!
//! Writes to the same position accumulate; nothing is ever overwritten or
//! deduplicated.

use serde::{Deserialize, Serialize};

/// One write: the value plus its optional log payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<V, L> {
    pub value: V,
    pub log: Option<L>,
}

/// Every entry written at one position, in write order
#[derive(Debug, Clone)]
pub struct Bucket<V, L> {
    entries: Vec<Entry<V, L>>,
}

impl<V, L> Bucket<V, L> {
    pub fn new() -> Self {
        Bucket {
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, value: V, log: Option<L>) {
        self.entries.push(Entry { value, log });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry<V, L>> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry<V, L>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V, L> Default for Bucket<V, L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_preserves_write_order() {
        let mut bucket = Bucket::new();
        bucket.append(3.0, Some("first"));
        bucket.append(1.0, None);
        bucket.append(3.0, Some("third"));

        let values: Vec<f64> = bucket.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![3.0, 1.0, 3.0]);
        assert_eq!(bucket.entries()[0].log, Some("first"));
        assert_eq!(bucket.entries()[1].log, None);
        assert_eq!(bucket.len(), 3);
    }

    #[test]
    fn test_bucket_keeps_duplicates() {
        let mut bucket: Bucket<i32, ()> = Bucket::default();
        assert!(bucket.is_empty());

        for _ in 0..4 {
            bucket.append(7, None);
        }

        assert_eq!(bucket.len(), 4);
        assert!(bucket.iter().all(|e| e.value == 7));
    }
}
