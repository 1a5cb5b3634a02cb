//! Levenshtein alignment between two UTF-16 sequences.
//!
//! The full `(m + 1) x (n + 1)` cost table is kept in memory: time and space
//! are both O(m·n). That is fine for editor buffers and is the main cost of
//! building a mapping. An aligner over fixed texts keeps its own table;
//! [`EditDistanceCache`] serves callers that align arbitrary pairs.

/// Row-major Levenshtein cost table for a pair of sequences.
#[derive(Debug, Clone)]
pub struct EditTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl EditTable {
    /// Fills the table: substitution costs 0 for equal units and 1 otherwise,
    /// insertion and deletion cost 1.
    pub fn build(a: &[u16], b: &[u16]) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        log::debug!("building {rows}x{cols} edit distance table");

        let mut cells = vec![0u32; rows * cols];
        for (j, cell) in cells.iter_mut().take(cols).enumerate() {
            *cell = j as u32;
        }
        for i in 1..rows {
            let (done, rest) = cells.split_at_mut(i * cols);
            let prev = &done[(i - 1) * cols..];
            let row = &mut rest[..cols];
            row[0] = i as u32;
            let ai = a[i - 1];
            for j in 1..cols {
                let cost = u32::from(ai != b[j - 1]);
                row[j] = (prev[j] + 1).min(row[j - 1] + 1).min(prev[j - 1] + cost);
            }
        }

        Self { rows, cols, cells }
    }

    fn at(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    /// Total edit distance between the two sequences.
    pub fn distance(&self) -> u32 {
        self.at(self.rows - 1, self.cols - 1)
    }

    /// Walks an optimal path from `(m, n)` back towards `(0, 0)` and returns
    /// the `b` index reached when the path consumes `a[a_pos]`.
    ///
    /// At every cell the diagonal move wins if it is optimal, then deletion,
    /// then insertion. `a` and `b` must be the sequences the table was built from.
    pub fn project(&self, a: &[u16], b: &[u16], a_pos: usize) -> usize {
        if a_pos >= a.len() {
            return b.len();
        }

        let (mut i, mut j) = (a.len(), b.len());
        while i > 0 || j > 0 {
            let here = self.at(i, j);
            if i > 0 && j > 0 {
                let cost = u32::from(a[i - 1] != b[j - 1]);
                if here == self.at(i - 1, j - 1) + cost {
                    if i - 1 == a_pos {
                        return j - 1;
                    }
                    i -= 1;
                    j -= 1;
                    continue;
                }
            }
            if i > 0 && here == self.at(i - 1, j) + 1 {
                if i - 1 == a_pos {
                    return j;
                }
                i -= 1;
                continue;
            }
            if j > 0 && here == self.at(i, j - 1) + 1 {
                j -= 1;
                continue;
            }
            break;
        }
        0
    }
}

#[derive(Debug)]
struct Slot {
    a: Vec<u16>,
    b: Vec<u16>,
    table: EditTable,
}

/// Keeps the table of the most recently aligned pair.
///
/// Repeated queries against the same pair skip the O(m·n) rebuild; a query
/// with a different pair replaces the slot. Pairs are compared by length
/// before contents.
#[derive(Debug, Default)]
pub struct EditDistanceCache {
    slot: Option<Slot>,
}

impl EditDistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects `a_pos` in `a` to a position in `b`.
    ///
    /// Positions at or beyond the end of `a` map to the end of `b`.
    pub fn align_offset(&mut self, a: &[u16], b: &[u16], a_pos: usize) -> usize {
        if a_pos >= a.len() {
            return b.len();
        }
        self.table_for(a, b).project(a, b, a_pos)
    }

    pub fn table_for(&mut self, a: &[u16], b: &[u16]) -> &EditTable {
        if !self.is_cached(a, b) {
            // release the old table before allocating the new one
            self.slot = None;
        }
        let slot = self.slot.get_or_insert_with(|| Slot {
            a: a.to_vec(),
            b: b.to_vec(),
            table: EditTable::build(a, b),
        });
        &slot.table
    }

    pub fn is_cached(&self, a: &[u16], b: &[u16]) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|slot| {
                slot.a.len() == a.len() && slot.b.len() == b.len() && slot.a == a && slot.b == b
            })
    }
}
