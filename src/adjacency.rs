/// Dense N×N edge bitmap. Writes are issued by the engine's commit phase only.
#[derive(Clone, Debug)]
pub struct AdjacencyStore {
    num_entries: usize,
    cells: Vec<bool>,
}

impl AdjacencyStore {
    pub fn new(num_entries: usize) -> Self {
        Self {
            num_entries,
            cells: vec![false; num_entries * num_entries],
        }
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    pub fn get(&self, node: usize, i: usize) -> bool {
        self.cells[self.offset(node, i)]
    }

    pub fn set(&mut self, src: usize, dst: usize) {
        let offset = self.offset(src, dst);
        self.cells[offset] = true;
    }

    pub fn clear(&mut self, node: usize, i: usize) {
        let offset = self.offset(node, i);
        self.cells[offset] = false;
    }

    pub fn row(&self, node: usize) -> &[bool] {
        let start = node * self.num_entries;
        &self.cells[start..start + self.num_entries]
    }

    /// First set cell of `node`'s row at or after `from`.
    pub fn first_from(&self, node: usize, from: usize) -> Option<usize> {
        self.row(node)
            .iter()
            .skip(from)
            .position(|&bit| bit)
            .map(|pos| pos + from)
    }

    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&bit| bit).count()
    }

    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for src in 0..self.num_entries {
            for (dst, &bit) in self.row(src).iter().enumerate() {
                if bit {
                    edges.push((src, dst));
                }
            }
        }
        edges
    }

    pub(crate) fn wipe(&mut self) {
        self.cells.fill(false);
    }

    fn offset(&self, node: usize, i: usize) -> usize {
        node * self.num_entries + i
    }
}

#[cfg(test)]
mod tests {
    use super::AdjacencyStore;

    #[test]
    fn test_set_is_idempotent() {
        let mut store = AdjacencyStore::new(4);
        store.set(1, 2);
        store.set(1, 2);
        assert!(store.get(1, 2));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_first_from_resumes_at_offset() {
        let mut store = AdjacencyStore::new(5);
        store.set(2, 0);
        store.set(2, 3);
        assert_eq!(store.first_from(2, 0), Some(0));
        assert_eq!(store.first_from(2, 1), Some(3));
        assert_eq!(store.first_from(2, 4), None);
        assert_eq!(store.first_from(2, 5), None);
    }

    #[test]
    fn test_clear_removes_single_cell() {
        let mut store = AdjacencyStore::new(3);
        store.set(0, 1);
        store.set(0, 2);
        store.clear(0, 1);
        assert_eq!(store.edges(), vec![(0, 2)]);
    }
}
