//! Toroidal cell grid.
//!
//! Cells are stored as a flat row-major array of bytes: `ALIVE` (255) or
//! `DEAD` (0), the same values the PGM images carry.

use crate::schema::Cell;

/// State byte of a live cell.
pub const ALIVE: u8 = 255;
/// State byte of a dead cell.
pub const DEAD: u8 = 0;

/// Fixed-size grid whose edges wrap around on both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![DEAD; width * height],
        }
    }

    /// Build a grid from row-major cell values. Any value other than
    /// `ALIVE` is stored as `DEAD`.
    ///
    /// Returns `None` if `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Option<Self> {
        if cells.len() != width * height {
            return None;
        }
        let cells = cells.into_iter().map(normalize).collect();
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid with the given cells set alive.
    pub fn with_alive(width: usize, height: usize, alive: &[Cell]) -> Self {
        let mut grid = Self::new(width, height);
        for cell in alive {
            grid.set(cell.x, cell.y, ALIVE);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Convert (x, y) to flat index.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        let idx = self.idx(x, y);
        self.cells[idx] = normalize(value);
    }

    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == ALIVE
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Overwrite whole rows starting at `start_row` with `rows`, which must
    /// hold a multiple of `width` values that fit inside the grid.
    pub fn write_rows(&mut self, start_row: usize, rows: &[u8]) {
        let start = start_row * self.width;
        self.cells[start..start + rows.len()].copy_from_slice(rows);
    }

    /// Count live cells among the 8 neighbours of (x, y).
    ///
    /// Indices wrap: one step before row/column 0 is the last row/column,
    /// one step past the last is 0.
    #[inline]
    pub fn live_neighbours(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width, self.height);
        let mut count = 0;
        for dy in 0..3 {
            let ny = (y + dy + h - 1) % h;
            for dx in 0..3 {
                if dx == 1 && dy == 1 {
                    continue;
                }
                let nx = (x + dx + w - 1) % w;
                if self.cells[ny * w + nx] == ALIVE {
                    count += 1;
                }
            }
        }
        count
    }

    /// Coordinates of every live cell in row-major order.
    pub fn alive_cells(&self) -> Vec<Cell> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Cell::new(x, y)))
            .filter(|c| self.is_alive(c.x, c.y))
            .collect()
    }

    /// Number of live cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == ALIVE).count()
    }
}

#[inline]
fn normalize(value: u8) -> u8 {
    if value == ALIVE { ALIVE } else { DEAD }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_wrap() {
        // (2, 2) is the up-left diagonal neighbour of (0, 0) on a 3x3 torus.
        let grid = Grid::with_alive(3, 3, &[Cell::new(2, 2)]);
        assert_eq!(grid.live_neighbours(0, 0), 1);
    }

    #[test]
    fn test_every_direction_wraps() {
        let w = 5;
        let h = 4;
        let neighbours = [
            Cell::new(w - 1, h - 1),
            Cell::new(0, h - 1),
            Cell::new(1, h - 1),
            Cell::new(w - 1, 0),
            Cell::new(1, 0),
            Cell::new(w - 1, 1),
            Cell::new(0, 1),
            Cell::new(1, 1),
        ];
        let grid = Grid::with_alive(w, h, &neighbours);
        assert_eq!(grid.live_neighbours(0, 0), 8);
    }

    #[test]
    fn test_centre_not_counted() {
        let grid = Grid::with_alive(4, 4, &[Cell::new(1, 1)]);
        assert_eq!(grid.live_neighbours(1, 1), 0);
        assert_eq!(grid.live_neighbours(2, 2), 1);
    }

    #[test]
    fn test_edge_cell_sees_opposite_edge() {
        let grid = Grid::with_alive(6, 6, &[Cell::new(5, 3), Cell::new(0, 5)]);
        // (0, 3): left neighbour wraps to column 5.
        assert_eq!(grid.live_neighbours(0, 3), 1);
        // (0, 0): upward neighbour wraps to row 5.
        assert_eq!(grid.live_neighbours(0, 0), 1);
    }

    #[test]
    fn test_alive_cells_row_major() {
        let grid = Grid::with_alive(4, 3, &[Cell::new(3, 2), Cell::new(0, 1), Cell::new(2, 0)]);
        assert_eq!(
            grid.alive_cells(),
            vec![Cell::new(2, 0), Cell::new(0, 1), Cell::new(3, 2)]
        );
        assert_eq!(grid.alive_count(), 3);
        assert!(grid.is_alive(0, 1));
        assert!(!grid.is_alive(1, 0));
    }

    #[test]
    fn test_from_cells_normalizes() {
        let grid = Grid::from_cells(2, 2, vec![255, 128, 0, 1]).unwrap();
        assert_eq!(grid.cells(), &[ALIVE, DEAD, DEAD, DEAD]);
        assert!(Grid::from_cells(2, 2, vec![0; 3]).is_none());
    }

    #[test]
    fn test_write_rows() {
        let mut grid = Grid::new(3, 3);
        grid.write_rows(1, &[ALIVE, DEAD, ALIVE]);
        assert_eq!(grid.row(1), &[ALIVE, DEAD, ALIVE]);
        assert_eq!(grid.alive_count(), 2);
    }
}
