// src/batch.rs
// Fixed-size paging. Order is whatever the caller supplied; nothing here
// shuffles or sorts.

/// One page worth of items. `index` is 1-based and matches the output file
/// number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch<T> {
    pub index: usize,
    pub items: Vec<T>,
}

impl<T> Batch<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Split `items` into consecutive groups of at most `size`. The last group may
/// be shorter. `size` of 0 is treated as 1.
pub fn batches<T: Clone>(items: &[T], size: usize) -> impl Iterator<Item = Batch<T>> + '_ {
    items
        .chunks(size.max(1))
        .enumerate()
        .map(|(i, chunk)| Batch { index: i + 1, items: chunk.to_vec() })
}

/// Number of batches `len` items will produce.
pub fn batch_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_fifty_by_hundred() {
        let items: Vec<u32> = (0..250).collect();
        let sizes: Vec<usize> = batches(&items, 100).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(batch_count(250, 100), 3);
    }

    #[test]
    fn order_and_indices_preserved() {
        let items = vec!["c", "a", "b", "d", "e"];
        let out: Vec<Batch<&str>> = batches(&items, 2).collect();
        assert_eq!(out[0], Batch { index: 1, items: vec!["c", "a"] });
        assert_eq!(out[1], Batch { index: 2, items: vec!["b", "d"] });
        assert_eq!(out[2], Batch { index: 3, items: vec!["e"] });
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let items: Vec<u8> = vec![0; 200];
        assert_eq!(batches(&items, 100).count(), 2);
    }

    #[test]
    fn empty_input_no_batches() {
        let items: Vec<u8> = Vec::new();
        assert_eq!(batches(&items, 100).count(), 0);
        assert_eq!(batch_count(0, 100), 0);
    }
}
