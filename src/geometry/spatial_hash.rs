use std::collections::HashMap;

use super::Bounds;

/// Uniform grid bucketing of boxes for neighbour queries
#[derive(Debug)]
pub struct SpatialHash {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell(&self, v: f64) -> i64 {
        (v / self.cell_size).floor() as i64
    }

    /// Register `id` in every cell its box touches
    pub fn insert(&mut self, id: usize, bounds: &Bounds) {
        for key in self.cells_for(bounds) {
            self.cells.entry(key).or_default().push(id);
        }
    }

    /// Ids sharing at least one cell with `bounds`, ascending and deduplicated
    pub fn query(&self, bounds: &Bounds) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .cells_for(bounds)
            .filter_map(|key| self.cells.get(&key))
            .flatten()
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn cells_for(&self, bounds: &Bounds) -> impl Iterator<Item = (i64, i64)> + use<> {
        let (min_x, max_x) = (self.cell(bounds.min_x), self.cell(bounds.max_x));
        let (min_z, max_z) = (self.cell(bounds.min_z), self.cell(bounds.max_z));
        (min_x..=max_x).flat_map(move |x| (min_z..=max_z).map(move |z| (x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, z: f64, half: f64) -> Bounds {
        Bounds {
            min_x: x - half,
            max_x: x + half,
            min_z: z - half,
            max_z: z + half,
        }
    }

    #[test]
    fn test_query_finds_neighbours() {
        let mut hash = SpatialHash::new(50.0);
        hash.insert(0, &square(0.0, 0.0, 10.0));
        hash.insert(1, &square(45.0, 0.0, 10.0));
        hash.insert(2, &square(500.0, 500.0, 10.0));

        let near = hash.query(&square(-30.0, 0.0, 5.0));
        assert_eq!(near, vec![0]);

        let spanning = hash.query(&square(40.0, 0.0, 15.0));
        assert_eq!(spanning, vec![0, 1]);

        assert!(hash.query(&square(-300.0, 0.0, 5.0)).is_empty());
    }
}
