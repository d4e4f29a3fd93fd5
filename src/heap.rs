// Binary min-heap for the label-setting search. Keys are (distance, vertex) so
// equal distances pop in vertex-id order and every run is reproducible.

use crate::weight::Weight;

#[derive(Copy, Clone, Debug)]
pub(crate) struct HeapItem<W> {
    pub(crate) dist: W,
    pub(crate) node: usize,
}

impl<W: Weight> HeapItem<W> {
    #[inline]
    fn precedes(&self, other: &Self) -> bool {
        self.dist < other.dist || (self.dist == other.dist && self.node < other.node)
    }
}

pub(crate) struct MinHeap<W> {
    data: Vec<HeapItem<W>>,
    pub(crate) pushes: u64,
    pub(crate) pops: u64,
    pub(crate) max_size: u64,
}

impl<W: Weight> MinHeap<W> {
    #[inline]
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self { data: Vec::with_capacity(cap), pushes: 0, pops: 0, max_size: 0 }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub(crate) fn push(&mut self, item: HeapItem<W>) {
        self.data.push(item);
        self.pushes += 1;
        if self.data.len() as u64 > self.max_size {
            self.max_size = self.data.len() as u64;
        }
        self.sift_up(self.data.len() - 1);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<HeapItem<W>> {
        let len = self.data.len();
        if len == 0 {
            return None;
        }
        self.data.swap(0, len - 1);
        let out = self.data.pop();
        self.pops += 1;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        out
    }

    #[inline]
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[idx].precedes(&self.data[parent]) {
                self.data.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn sift_down(&mut self, mut idx: usize) {
        let n = self.data.len();
        loop {
            let left = idx * 2 + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < n && self.data[right].precedes(&self.data[left]) {
                best = right;
            }
            if self.data[best].precedes(&self.data[idx]) {
                self.data.swap(idx, best);
                idx = best;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_key_order_with_vertex_tiebreak() {
        let mut heap = MinHeap::with_capacity(8);
        for (dist, node) in [(5i64, 1usize), (2, 7), (2, 3), (9, 0), (0, 4), (2, 5)] {
            heap.push(HeapItem { dist, node });
        }
        let order: Vec<(i64, usize)> = std::iter::from_fn(|| heap.pop()).map(|h| (h.dist, h.node)).collect();
        assert_eq!(order, vec![(0, 4), (2, 3), (2, 5), (2, 7), (5, 1), (9, 0)]);
        assert_eq!(heap.pushes, 6);
        assert_eq!(heap.pops, 6);
        assert_eq!(heap.max_size, 6);
    }
}
