//! Maze generation using iterative randomized backtracking.
//!
//! The generator carves a perfect maze over the odd cells of a doubled grid and
//! then optionally opens a square clearing around the center. Generation can be
//! driven one step at a time so a caller can animate it, or run to completion
//! with [`generate`].
//!
//! # Examples
//!
//! ```rust
//! use maze_walker::maze::MazeGenerator;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut generator = MazeGenerator::new(10, 10, 3, StdRng::seed_from_u64(7))?;
//!
//! // Generate the maze step by step
//! while !generator.is_complete() {
//!     generator.step();
//! }
//!
//! let grid = generator.finish();
//! assert_eq!(grid.width(), 21);
//! # Ok::<(), maze_walker::maze::MazeError>(())
//! ```

use super::MazeError;
use super::grid::{Cell, Grid, TileState};
use rand::Rng;
use rand::seq::SliceRandom;

/// Largest accepted tile count along either axis.
pub const MAX_TILES: i32 = 4096;

/// Generates a complete maze in one call.
///
/// # Arguments
/// * `tiles_x` - Number of generation cells along x; the grid is `2 * tiles_x + 1` wide
/// * `tiles_z` - Number of generation cells along z; the grid is `2 * tiles_z + 1` deep
/// * `cutout_radius` - Size of the central clearing, `0` for none
/// * `rng` - Random source for the start cell and the carving order
///
/// # Returns
/// The finished grid, or [`MazeError::InvalidArgument`] for negative or oversized inputs.
pub fn generate<R: Rng + ?Sized>(
    tiles_x: i32,
    tiles_z: i32,
    cutout_radius: i32,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    Ok(MazeGenerator::new(tiles_x, tiles_z, cutout_radius, rng)?.finish())
}

/// Incremental backtracking maze generator
pub struct MazeGenerator<R> {
    grid: Grid,
    stack: Vec<Cell>,
    rng: R,
    cutout_radius: usize,
    visited: usize,
    total: usize,
    complete: bool,
}

impl<R: Rng> MazeGenerator<R> {
    /// Creates a generator with every cell walled and the start cell opened.
    pub fn new(tiles_x: i32, tiles_z: i32, cutout_radius: i32, mut rng: R) -> Result<Self, MazeError> {
        let tiles_x = checked_tiles("tiles_x", tiles_x)?;
        let tiles_z = checked_tiles("tiles_z", tiles_z)?;
        let cutout_radius = usize::try_from(cutout_radius).map_err(|_| {
            MazeError::InvalidArgument(format!("cutout radius must be non-negative, got {cutout_radius}"))
        })?;

        let mut grid = Grid::filled(2 * tiles_x + 1, 2 * tiles_z + 1, TileState::Wall);
        let mut stack = Vec::with_capacity(tiles_x * tiles_z);
        let total = tiles_x * tiles_z;

        if total > 0 {
            let start = Cell::new(
                1 + 2 * rng.gen_range(0..tiles_x),
                1 + 2 * rng.gen_range(0..tiles_z),
            );
            grid.set(start.x, start.z, TileState::Open);
            stack.push(start);
        }

        Ok(Self {
            grid,
            stack,
            rng,
            cutout_radius,
            visited: usize::from(total > 0),
            total,
            complete: false,
        })
    }

    /// Performs one step of maze generation.
    ///
    /// A step either carves into an unvisited neighbor of the cell on top of the
    /// stack or backtracks by popping it. The clearing is opened once the stack
    /// drains.
    ///
    /// Returns false once generation has already completed.
    pub fn step(&mut self) -> bool {
        if self.complete {
            return false;
        }

        if let Some(&current) = self.stack.last() {
            let candidates: Vec<Cell> = self
                .grid
                .neighbors(current, 2)
                .filter(|cell| !self.grid.is_open(cell.x, cell.z))
                .collect();

            match candidates.choose(&mut self.rng) {
                Some(&next) => {
                    self.grid.set(
                        (current.x + next.x) / 2,
                        (current.z + next.z) / 2,
                        TileState::Open,
                    );
                    self.grid.set(next.x, next.z, TileState::Open);
                    self.stack.push(next);
                    self.visited += 1;
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        if self.stack.is_empty() {
            self.open_clearing();
            self.complete = true;
            tracing::info!(
                width = self.grid.width(),
                depth = self.grid.depth(),
                open = self.grid.count_open(),
                "maze generated"
            );
        }
        true
    }

    fn open_clearing(&mut self) {
        if self.cutout_radius == 0 {
            return;
        }
        let smallest_side = self.grid.width().min(self.grid.depth());
        let radius = (self.cutout_radius - 1).min((smallest_side - 1) / 2);
        let center = self.grid.center();

        for z in center.z.saturating_sub(radius)..=center.z + radius {
            for x in center.x.saturating_sub(radius)..=center.x + radius {
                self.grid.set(x, z, TileState::Open);
            }
        }
    }

    /// Checks if maze generation is complete
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns the current progress of generation (visited cells, total cells)
    pub fn progress(&self) -> (usize, usize) {
        (self.visited, self.total)
    }

    /// Returns the generation progress as a ratio (0.0 to 1.0)
    pub fn progress_ratio(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.visited as f32 / self.total as f32
        }
    }

    /// The grid as carved so far.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Runs generation to completion and returns the grid.
    pub fn finish(mut self) -> Grid {
        while self.step() {}
        self.grid
    }
}

fn checked_tiles(name: &str, value: i32) -> Result<usize, MazeError> {
    if !(0..=MAX_TILES).contains(&value) {
        return Err(MazeError::InvalidArgument(format!(
            "{name} must be between 0 and {MAX_TILES}, got {value}"
        )));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::search::farthest_cells;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashSet, VecDeque};

    fn reachable_from(grid: &Grid, start: Cell) -> HashSet<Cell> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for next in grid.neighbors(cell, 1) {
                if grid.is_open(next.x, next.z) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn open_edges(grid: &Grid) -> usize {
        grid.open_cells()
            .map(|cell| {
                [(1, 0), (0, 1)]
                    .into_iter()
                    .filter(|(dx, dz)| grid.is_open(cell.x + dx, cell.z + dz))
                    .count()
            })
            .sum()
    }

    /// A maze without a clearing is a spanning tree over its open cells
    #[test]
    fn test_generated_maze_is_perfect() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate(9, 6, 0, &mut rng).expect("valid arguments");

        assert_eq!((grid.width(), grid.depth()), (19, 13));
        let open = grid.count_open();
        assert_eq!(open, 2 * 9 * 6 - 1);

        let start = grid.open_cells().next().expect("maze has open cells");
        assert_eq!(reachable_from(&grid, start).len(), open);
        assert_eq!(open_edges(&grid), open - 1);
    }

    #[test]
    fn test_every_room_is_visited() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate(6, 8, 0, &mut rng).expect("valid arguments");
        for z in (1..grid.depth()).step_by(2) {
            for x in (1..grid.width()).step_by(2) {
                assert!(grid.is_open(x, z), "room ({x}, {z}) was never carved");
            }
        }
        // Borders stay solid
        for x in 0..grid.width() {
            assert!(!grid.is_open(x, 0));
            assert!(!grid.is_open(x, grid.depth() - 1));
        }
    }

    #[test]
    fn test_cutout_opens_central_square() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = generate(7, 7, 3, &mut rng).expect("valid arguments");
        for z in 5..=9 {
            for x in 5..=9 {
                assert!(grid.is_open(x, z), "cell ({x}, {z}) should be cleared");
            }
        }
    }

    #[test]
    fn test_oversized_cutout_opens_whole_grid() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = generate(4, 4, 100, &mut rng).expect("valid arguments");
        assert_eq!(grid.count_open(), 81);
    }

    /// Generate, clear the middle, then search from a passage leading into the clearing
    #[test]
    fn test_generate_and_search_scenario() {
        let mut rng = StdRng::seed_from_u64(2024);
        let grid = generate(7, 7, 3, &mut rng).expect("valid arguments");

        assert_eq!((grid.width(), grid.depth()), (15, 15));
        for z in 5..=9 {
            for x in 5..=9 {
                assert!(grid.is_open(x, z));
            }
        }

        // The maze is connected, so some cell on the ring around the clearing is open
        let ring = (5..=9)
            .flat_map(|i| [(4, i), (10, i), (i, 4), (i, 10)])
            .find(|&(x, z)| grid.is_open(x, z));
        let (start_x, start_z) = ring.expect("a passage into the clearing");

        let results = farthest_cells(&grid, start_x, start_z, 5);
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|found| found.step > 0));
        assert!(results.windows(2).all(|pair| pair[0].step >= pair[1].step));
        assert!(results.iter().all(|found| found.cell != Cell::new(start_x, start_z)));
    }

    #[test]
    fn test_zero_tiles_carve_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = generate(0, 3, 0, &mut rng).expect("zero is accepted");
        assert_eq!((grid.width(), grid.depth()), (1, 7));
        assert_eq!(grid.count_open(), 0);

        let grid = generate(0, 0, 2, &mut rng).expect("zero is accepted");
        assert_eq!((grid.width(), grid.depth()), (1, 1));
        assert!(grid.is_open(0, 0));
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate(-1, 4, 0, &mut rng),
            Err(MazeError::InvalidArgument(_))
        ));
        assert!(matches!(
            generate(4, MAX_TILES + 1, 0, &mut rng),
            Err(MazeError::InvalidArgument(_))
        ));
        assert!(matches!(
            generate(4, 4, -2, &mut rng),
            Err(MazeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_incremental_progress() {
        let mut generator =
            MazeGenerator::new(5, 5, 0, StdRng::seed_from_u64(9)).expect("valid arguments");
        assert_eq!(generator.progress(), (1, 25));
        assert!(!generator.is_complete());

        let mut steps = 0;
        while generator.step() {
            steps += 1;
            let (visited, total) = generator.progress();
            assert!(visited <= total);
        }
        // Each room is pushed once and popped once
        assert_eq!(steps, 2 * 25 - 1);
        assert!(generator.is_complete());
        assert_eq!(generator.progress(), (25, 25));
        assert_eq!(generator.progress_ratio(), 1.0);
        assert!(!generator.step());
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate(8, 8, 3, &mut StdRng::seed_from_u64(77)).expect("valid arguments");
        let b = generate(8, 8, 3, &mut StdRng::seed_from_u64(77)).expect("valid arguments");
        assert_eq!(a, b);
    }

    proptest! {
        // A radius-1 clearing is a single cell and may land on an isolated pillar.
        #[test]
        fn prop_open_cells_are_connected(
            tiles_x in 0i32..10,
            tiles_z in 0i32..10,
            cutout in prop_oneof![Just(0i32), 2i32..6],
            seed: u64,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(tiles_x, tiles_z, cutout, &mut rng).expect("valid arguments");
            if let Some(start) = grid.open_cells().next() {
                prop_assert_eq!(reachable_from(&grid, start).len(), grid.count_open());
            }
            if cutout == 0 && tiles_x > 0 && tiles_z > 0 {
                prop_assert_eq!(open_edges(&grid), grid.count_open() - 1);
            }
        }
    }
}
