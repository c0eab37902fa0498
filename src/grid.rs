//! Grid sizing: how many mosaic cells fit the current viewport.

use crate::point::Point;

/// Number of cells the dynamic cell size aims to fit across the viewport
pub const CELLS_ACROSS: f64 = 50.0;

/// Default lower bound for the cell size, in pixels
pub const BASE_CELL_SIZE: f64 = 20.0;

/// Viewport dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }
}

/// Grid layout derived from a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f64,
}

impl GridConfig {
    /// Pixel origin (top-left corner) of the cell at column `x`, row `y`
    pub fn origin(&self, x: usize, y: usize) -> Point {
        Point::new(x as f64 * self.cell_size, y as f64 * self.cell_size)
    }

    /// Cell indices in row-major order (rows outer, columns inner)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |y| (0..cols).map(move |x| (x, y)))
    }
}

/// Computes the grid for `viewport`.
///
/// The cell size grows with the viewport width (`width / 50`) but never drops
/// below `base_cell_size`, which must be positive.
pub fn compute_grid(viewport: Viewport, base_cell_size: f64) -> GridConfig {
    debug_assert!(base_cell_size > 0.0, "base cell size must be positive");

    let width = viewport.width as f64;
    let height = viewport.height as f64;
    let cell_size = base_cell_size.max(width / CELLS_ACROSS);

    GridConfig {
        cols: (width / cell_size).floor() as usize,
        rows: (height / cell_size).floor() as usize,
        cell_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, 100, 20.0, 5, 5)] // base size wins
    #[case(2000, 1000, 40.0, 50, 25)] // width / 50 wins
    #[case(1000, 500, 20.0, 50, 25)] // both bounds agree
    #[case(0, 0, 20.0, 0, 0)] // empty viewport
    #[case(19, 300, 20.0, 0, 15)] // narrower than one cell
    fn test_compute_grid(
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected_cell_size: f64,
        #[case] expected_cols: usize,
        #[case] expected_rows: usize,
    ) {
        let grid = compute_grid(Viewport::new(width, height), BASE_CELL_SIZE);

        assert!((grid.cell_size - expected_cell_size).abs() < 1e-9);
        assert_eq!(grid.cols, expected_cols);
        assert_eq!(grid.rows, expected_rows);
    }

    #[test]
    fn cells_are_row_major() {
        let grid = GridConfig {
            cols: 3,
            rows: 2,
            cell_size: 10.0,
        };
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn empty_grid_yields_no_cells() {
        let grid = compute_grid(Viewport::default(), BASE_CELL_SIZE);
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn origin_scales_with_cell_size() {
        let grid = compute_grid(Viewport::new(100, 100), BASE_CELL_SIZE);
        assert_eq!(grid.origin(0, 0), Point::new(0.0, 0.0));
        assert_eq!(grid.origin(3, 1), Point::new(60.0, 20.0));
    }

    proptest! {
        #[test]
        fn grid_respects_bounds(
            width in 0u32..10_000,
            height in 0u32..10_000,
            base in 1.0f64..200.0,
        ) {
            let grid = compute_grid(Viewport::new(width, height), base);

            prop_assert!(grid.cell_size >= base);
            prop_assert_eq!(grid.cols, (width as f64 / grid.cell_size).floor() as usize);
            prop_assert_eq!(grid.rows, (height as f64 / grid.cell_size).floor() as usize);
        }

        #[test]
        fn compute_grid_is_pure(width in 0u32..5_000, height in 0u32..5_000) {
            let viewport = Viewport::new(width, height);
            prop_assert_eq!(
                compute_grid(viewport, BASE_CELL_SIZE),
                compute_grid(viewport, BASE_CELL_SIZE)
            );
        }
    }
}
