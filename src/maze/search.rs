//! Breadth-first search for the open cells farthest from a starting cell.

use super::grid::{Cell, Grid};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Number of candidates kept when placing the point of interest.
pub const DEFAULT_FARTHEST_COUNT: usize = 5;

/// An open cell together with its walking distance from the search start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestCell {
    /// The reached cell
    pub cell: Cell,
    /// Number of orthogonal steps from the start, at least 1
    pub step: u32,
}

/// Finds up to `k` open cells with the greatest BFS distance from `(start_x, start_z)`.
///
/// Walls and the start cell itself are never reported. Results are ordered by
/// descending distance; cells at the same distance keep the order in which the
/// search discovered them.
///
/// # Arguments
/// * `grid` - Occupancy grid to search
/// * `start_x`, `start_z` - Starting cell; outside the grid yields no results
/// * `k` - Maximum number of results
pub fn farthest_cells(grid: &Grid, start_x: usize, start_z: usize, k: usize) -> Vec<FarthestCell> {
    if grid.get(start_x, start_z).is_none() {
        return Vec::new();
    }

    let width = grid.width();
    // Walls count as visited so the search never enters them.
    let mut visited: Vec<bool> = (0..grid.depth())
        .flat_map(|z| (0..width).map(move |x| (x, z)))
        .map(|(x, z)| !grid.is_open(x, z))
        .collect();
    visited[start_z * width + start_x] = true;

    let start = Cell::new(start_x, start_z);
    let mut queue = VecDeque::from([(start, 0u32)]);
    let mut found = Vec::new();

    while let Some((cell, step)) = queue.pop_front() {
        for next in grid.neighbors(cell, 1) {
            let index = next.z * width + next.x;
            if visited[index] {
                continue;
            }
            visited[index] = true;
            found.push(FarthestCell {
                cell: next,
                step: step + 1,
            });
            queue.push_back((next, step + 1));
        }
    }

    // Stable sort keeps discovery order among equal distances.
    found.sort_by(|a, b| b.step.cmp(&a.step));
    found.truncate(k);
    found
}

/// Picks one of `cells` uniformly at random, or `None` if there are none.
pub fn pick_random<R: Rng + ?Sized>(cells: &[FarthestCell], rng: &mut R) -> Option<FarthestCell> {
    cells.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generator::generate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    /// Plain distance map used to check the search results
    fn reference_distances(grid: &Grid, start: Cell) -> HashMap<Cell, u32> {
        let mut distances = HashMap::from([(start, 0)]);
        let mut frontier = vec![start];
        let mut depth = 0;
        while !frontier.is_empty() {
            depth += 1;
            let mut next_frontier = Vec::new();
            for cell in frontier {
                for next in grid.neighbors(cell, 1) {
                    if grid.is_open(next.x, next.z) && !distances.contains_key(&next) {
                        distances.insert(next, depth);
                        next_frontier.push(next);
                    }
                }
            }
            frontier = next_frontier;
        }
        distances
    }

    #[test]
    fn test_corridor_distances() {
        let grid = Grid::from_ascii("#######\n#     #\n#######\n").expect("valid maze text");
        let results = farthest_cells(&grid, 1, 1, 10);
        let steps: Vec<u32> = results.iter().map(|found| found.step).collect();
        assert_eq!(steps, vec![4, 3, 2, 1]);
        assert_eq!(results[0].cell, Cell::new(5, 1));
    }

    #[test]
    fn test_results_match_reference_bfs() {
        let mut rng = StdRng::seed_from_u64(8);
        let grid = generate(10, 10, 3, &mut rng).expect("valid arguments");
        let start = grid.center();
        let reference = reference_distances(&grid, start);
        let max_depth = reference.values().copied().max().unwrap_or(0);

        let results = farthest_cells(&grid, start.x, start.z, DEFAULT_FARTHEST_COUNT);
        assert_eq!(results.len(), DEFAULT_FARTHEST_COUNT);
        assert_eq!(results[0].step, max_depth);
        for found in &results {
            assert_eq!(reference.get(&found.cell), Some(&found.step));
            assert_ne!(found.cell, start);
        }
        assert!(results.windows(2).all(|pair| pair[0].step >= pair[1].step));

        // Nothing left out is farther than what was kept
        let cutoff = results.last().map(|found| found.step).unwrap_or(0);
        let farther = reference.values().filter(|&&d| d > cutoff).count();
        assert!(farther <= DEFAULT_FARTHEST_COUNT);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        // Both ends of the corridor are one step from the middle
        let grid = Grid::from_ascii("#####\n#   #\n#####\n").expect("valid maze text");
        let results = farthest_cells(&grid, 2, 1, 5);
        let cells: Vec<Cell> = results.iter().map(|found| found.cell).collect();
        // Discovery follows the neighbor order: east before west
        assert_eq!(cells, vec![Cell::new(3, 1), Cell::new(1, 1)]);
    }

    #[test]
    fn test_start_outside_or_isolated() {
        let grid = Grid::from_ascii("###\n# #\n###\n").expect("valid maze text");
        assert!(farthest_cells(&grid, 3, 0, 5).is_empty());
        assert!(farthest_cells(&grid, 1, 1, 5).is_empty());
        assert!(farthest_cells(&grid, 1, 1, 0).is_empty());
    }

    #[test]
    fn test_pick_random() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(pick_random(&[], &mut rng), None);

        let grid = Grid::from_ascii("#######\n#     #\n#######\n").expect("valid maze text");
        let results = farthest_cells(&grid, 1, 1, 3);
        for _ in 0..20 {
            let picked = pick_random(&results, &mut rng).expect("non-empty results");
            assert!(results.contains(&picked));
        }
    }
}
