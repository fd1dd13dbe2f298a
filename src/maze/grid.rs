//! Occupancy grid shared by the generator, the search and the navigator.

use super::MazeError;
use crate::math::coordinates::Direction;
use chrono::Local;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Represents a cell in the maze grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column index of the cell
    pub x: usize,
    /// Row index of the cell
    pub z: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }
}

/// Walkability of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileState {
    /// Solid wall (`0`)
    Wall = 0,
    /// Open passage (`1`)
    Open = 1,
}

impl TileState {
    /// Whether the player may stand here.
    pub fn is_open(self) -> bool {
        self == TileState::Open
    }
}

/// A 2D occupancy grid addressed by `(x, z)`.
///
/// Cells are stored row-major (`z * width + x`). The grid is rebuilt wholesale
/// when a level resets; the navigator only ever reads it.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    depth: usize,
    cells: Vec<TileState>,
}

impl Grid {
    /// Creates a grid with every cell set to `state`.
    pub fn filled(width: usize, depth: usize, state: TileState) -> Self {
        Self {
            width,
            depth,
            cells: vec![state; width * depth],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn index(&self, x: usize, z: usize) -> Option<usize> {
        (x < self.width && z < self.depth).then(|| z * self.width + x)
    }

    /// State of the cell at `(x, z)`, or `None` outside the grid.
    pub fn get(&self, x: usize, z: usize) -> Option<TileState> {
        self.index(x, z).map(|i| self.cells[i])
    }

    /// Sets the cell at `(x, z)`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, z: usize, state: TileState) {
        if let Some(i) = self.index(x, z) {
            self.cells[i] = state;
        }
    }

    /// Whether the cell exists and is open.
    pub fn is_open(&self, x: usize, z: usize) -> bool {
        self.get(x, z).is_some_and(TileState::is_open)
    }

    /// The cell at the middle of the grid.
    pub fn center(&self) -> Cell {
        Cell::new(
            self.width.saturating_sub(1) / 2,
            self.depth.saturating_sub(1) / 2,
        )
    }

    /// Iterates over rows from `z = 0` upward.
    pub fn rows(&self) -> impl Iterator<Item = &[TileState]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Iterates over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_open())
            .map(|(i, _)| Cell::new(i % self.width, i / self.width))
    }

    /// Number of open cells.
    pub fn count_open(&self) -> usize {
        self.cells.iter().filter(|state| state.is_open()).count()
    }

    /// The in-bounds orthogonal neighbors of `cell`, `distance` cells away.
    pub fn neighbors(&self, cell: Cell, distance: usize) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let (dx, dz) = direction.offset();
            let x = cell.x.checked_add_signed(dx as isize * distance as isize)?;
            let z = cell.z.checked_add_signed(dz as isize * distance as isize)?;
            self.index(x, z).map(|_| Cell::new(x, z))
        })
    }

    /// Renders the grid as text: `#` for walls, a space for open cells.
    ///
    /// # Example Output
    /// ```text
    /// #######
    /// #     #
    /// # ### #
    /// #   # #
    /// ###################
    /// ```
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.depth);
        for row in self.rows() {
            out.extend(row.iter().map(|state| match state {
                TileState::Wall => '#',
                TileState::Open => ' ',
            }));
            out.push('\n');
        }
        out
    }

    /// Parses the text form produced by [`Grid::to_ascii`].
    ///
    /// `#` becomes a wall and any other character an open cell. All rows must have
    /// the same length.
    pub fn from_ascii(text: &str) -> Result<Self, MazeError> {
        let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        let width = match lines.first() {
            Some(first) => first.chars().count(),
            None => {
                return Err(MazeError::Parse {
                    line: 1,
                    reason: "maze text is empty".into(),
                });
            }
        };

        let mut cells = Vec::with_capacity(width * lines.len());
        for (row_idx, line) in lines.iter().enumerate() {
            let row_width = line.chars().count();
            if row_width != width {
                return Err(MazeError::Parse {
                    line: row_idx + 1,
                    reason: format!("expected {width} columns, found {row_width}"),
                });
            }
            cells.extend(line.chars().map(|c| {
                if c == '#' {
                    TileState::Wall
                } else {
                    TileState::Open
                }
            }));
        }

        Ok(Self {
            width,
            depth: lines.len(),
            cells,
        })
    }

    /// Reads a maze previously written by [`Grid::save_to_file`].
    pub fn load_from_file(path: &Path) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path)?;
        Self::from_ascii(&text)
    }

    /// Saves the grid to a timestamped file inside `dir`.
    ///
    /// The file is named after the current local time, for example
    /// `Maze_06-24-25_11-24PM.mz`, and holds the [`Grid::to_ascii`] text. The
    /// directory is created if needed.
    pub fn save_to_file(&self, dir: &Path) -> Result<PathBuf, MazeError> {
        let timestamp = Local::now().format("Maze_%m-%d-%y_%I-%M%p.mz").to_string();
        fs::create_dir_all(dir)?;
        let output_path = dir.join(timestamp);
        fs::write(&output_path, self.to_ascii())?;
        tracing::info!(path = %output_path.display(), "maze saved");
        Ok(output_path)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.width, self.depth)?;
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#####\n#   #\n# # #\n#   #\n#####\n";

    #[test]
    fn test_ascii_parse_and_render() {
        let grid = Grid::from_ascii(SAMPLE).expect("valid maze text");
        assert_eq!((grid.width(), grid.depth()), (5, 5));
        assert!(grid.is_open(1, 1));
        assert!(!grid.is_open(2, 2));
        assert!(!grid.is_open(0, 0));
        assert_eq!(grid.count_open(), 8);
        assert_eq!(grid.to_ascii(), SAMPLE);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = Grid::from_ascii("###\n# \n###\n").unwrap_err();
        match err {
            MazeError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            Grid::from_ascii(""),
            Err(MazeError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::filled(3, 2, TileState::Wall);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        grid.set(10, 10, TileState::Open);
        assert_eq!(grid.count_open(), 0);
    }

    #[test]
    fn test_neighbors_stay_in_bounds() {
        let grid = Grid::filled(5, 5, TileState::Wall);
        let corner: Vec<Cell> = grid.neighbors(Cell::new(0, 0), 2).collect();
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&Cell::new(2, 0)));
        assert!(corner.contains(&Cell::new(0, 2)));

        let middle: Vec<Cell> = grid.neighbors(Cell::new(2, 2), 1).collect();
        assert_eq!(middle.len(), 4);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let grid = Grid::from_ascii(SAMPLE).expect("valid maze text");
        let dir = std::env::temp_dir().join(format!("maze-walker-test-{}", std::process::id()));
        let path = grid.save_to_file(&dir).expect("save succeeds");
        assert!(path.file_name().is_some_and(|name| name.to_string_lossy().starts_with("Maze_")));

        let loaded = Grid::load_from_file(&path).expect("load succeeds");
        assert_eq!(loaded, grid);
        let _ = fs::remove_dir_all(&dir);
    }
}
