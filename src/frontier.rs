//! The open set of the search: an indexed binary min-heap keyed by estimated
//! total cost.
//!
//! Entries with equal estimated totals are ordered by when they entered the
//! frontier, earliest first. Lowering the key of an entry keeps its original
//! insertion order, so the selection matches a linear scan over the frontier in
//! insertion order that picks the first strictly smaller cost.
use fxhash::FxHashMap;
use std::cmp::Ordering;

use crate::cell::CellId;
use crate::error::GridError;

#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    estimated_total: f64,
    order: u64,
    cell: CellId,
}

impl FrontierEntry {
    fn cmp_priority(&self, other: &Self) -> Ordering {
        // First orders per estimated total, then by insertion order
        match self.estimated_total.total_cmp(&other.estimated_total) {
            Ordering::Equal => self.order.cmp(&other.order),
            s => s,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: Vec<FrontierEntry>,
    positions: FxHashMap<CellId, usize>,
    next_order: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    pub fn with_capacity(capacity: usize) -> Frontier {
        Frontier {
            heap: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            next_order: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.positions.contains_key(&cell)
    }

    /// Estimated total the cell is currently queued with.
    pub fn priority(&self, cell: CellId) -> Option<f64> {
        self.positions
            .get(&cell)
            .map(|&ix| self.heap[ix].estimated_total)
    }

    /// Adds a cell. Returns [false] without touching the frontier if the cell
    /// is already a member.
    pub fn insert(&mut self, cell: CellId, estimated_total: f64) -> bool {
        if self.contains(cell) {
            return false;
        }
        let ix = self.heap.len();
        self.heap.push(FrontierEntry {
            estimated_total,
            order: self.next_order,
            cell,
        });
        self.next_order += 1;
        self.positions.insert(cell, ix);
        self.sift_up(ix);
        true
    }

    /// Removes a cell by identity. Returns [false] if it was not a member.
    pub fn remove(&mut self, cell: CellId) -> bool {
        match self.positions.get(&cell) {
            Some(&ix) => {
                self.remove_at(ix);
                true
            }
            None => false,
        }
    }

    /// Lowers the priority of a member. Returns [false] if the cell is absent
    /// or the new priority is not lower.
    pub fn decrease_key(&mut self, cell: CellId, estimated_total: f64) -> bool {
        let Some(&ix) = self.positions.get(&cell) else {
            return false;
        };
        if estimated_total >= self.heap[ix].estimated_total {
            return false;
        }
        self.heap[ix].estimated_total = estimated_total;
        self.sift_up(ix);
        true
    }

    pub fn peek_min(&self) -> Option<CellId> {
        self.heap.first().map(|e| e.cell)
    }

    /// Removes and returns the cell with the smallest estimated total.
    pub fn pop_min(&mut self) -> Option<CellId> {
        if self.heap.is_empty() {
            None
        } else {
            Some(self.remove_at(0))
        }
    }

    /// Like [pop_min](Self::pop_min), but treats an empty frontier as an error.
    pub fn extract_min(&mut self) -> Result<CellId, GridError> {
        self.pop_min().ok_or(GridError::EmptyFrontier)
    }

    fn remove_at(&mut self, ix: usize) -> CellId {
        let removed = self.heap.swap_remove(ix).cell;
        self.positions.remove(&removed);
        if ix < self.heap.len() {
            self.positions.insert(self.heap[ix].cell, ix);
            self.sift_down(ix);
            self.sift_up(ix);
        }
        removed
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].cell, a);
        self.positions.insert(self.heap[b].cell, b);
    }

    fn sift_up(&mut self, mut ix: usize) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if self.heap[ix].cmp_priority(&self.heap[parent]) != Ordering::Less {
                break;
            }
            self.swap(ix, parent);
            ix = parent;
        }
    }

    fn sift_down(&mut self, mut ix: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < n && self.heap[left].cmp_priority(&self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < n && self.heap[right].cmp_priority(&self.heap[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.swap(ix, smallest);
            ix = smallest;
        }
    }
}
