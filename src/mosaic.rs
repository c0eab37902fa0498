//! The mosaic renderer: one full repaint of the grid per animation frame.

use crate::colorizer::{color_at, Hsba, NoiseScale, NoiseSource};
use crate::grid::{compute_grid, GridConfig, Viewport};
use crate::math::oscillation;
use crate::point::Point;
use crate::surface::Surface;
use rand::Rng;

/// How far the center point sways from the true cell center, as a fraction of the cell size
pub const CENTER_SWAY: f64 = 0.1;

pub const TRIANGLES_PER_CELL: usize = 8;

/// One triangle of a cell, with the vertex its fill color is sampled at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point; 3],
    pub sample: Point,
}

impl Triangle {
    fn new(a: Point, b: Point, c: Point, sample: Point) -> Self {
        Triangle {
            vertices: [a, b, c],
            sample,
        }
    }
}

/// Corners, edge midpoints and the swaying center of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subdivision {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
    pub mid_top: Point,
    pub mid_left: Point,
    pub mid_right: Point,
    pub mid_bottom: Point,
    pub center: Point,
}

impl Subdivision {
    /// Subdivides the cell whose top-left corner is `origin`
    pub fn new(origin: Point, size: f64, frame: u64) -> Self {
        let sway = oscillation(frame) * size * CENTER_SWAY;

        let top_left = origin;
        let top_right = origin.offset(size, 0.0);
        let bottom_left = origin.offset(0.0, size);
        let bottom_right = origin.offset(size, size);

        Subdivision {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            mid_top: top_left.midpoint(top_right),
            mid_left: top_left.midpoint(bottom_left),
            mid_right: top_right.midpoint(bottom_right),
            mid_bottom: bottom_left.midpoint(bottom_right),
            center: origin.offset(size / 2.0 + sway, size / 2.0 + sway),
        }
    }

    /// The eight triangles fanning out from the center, in drawing order.
    ///
    /// Each diagonal quadrant of the cell is split in two at its edge midpoint.
    pub fn triangles(&self) -> [Triangle; TRIANGLES_PER_CELL] {
        let Subdivision {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            mid_top,
            mid_left,
            mid_right,
            mid_bottom,
            center,
        } = *self;

        [
            // top quadrant
            Triangle::new(top_left, mid_top, center, top_left),
            Triangle::new(mid_top, top_right, center, mid_top),
            // left quadrant
            Triangle::new(top_left, center, mid_left, mid_left),
            Triangle::new(mid_left, center, bottom_left, center),
            // right quadrant
            Triangle::new(top_right, mid_right, center, mid_right),
            Triangle::new(mid_right, bottom_right, center, mid_right),
            // bottom quadrant
            Triangle::new(bottom_left, center, mid_bottom, bottom_left),
            Triangle::new(mid_bottom, bottom_right, center, bottom_right),
        ]
    }
}

/// Summary of one drawn frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub grid: GridConfig,
    pub triangles: usize,
}

/// Noise-colored triangle mosaic.
///
/// Holds only what is fixed at setup: the noise field, the lower bound on the
/// cell size and the noise scale derived from the setup-time grid.
#[derive(Debug, Clone)]
pub struct Mosaic<N> {
    noise: N,
    noise_scale: NoiseScale,
    base_cell_size: f64,
}

impl<N: NoiseSource> Mosaic<N> {
    /// Creates the canvas for `viewport` and fixes the noise scale.
    ///
    /// The noise scale is not recomputed when the viewport changes later.
    pub fn setup<S: Surface>(
        surface: &mut S,
        viewport: Viewport,
        base_cell_size: f64,
        noise: N,
    ) -> Self {
        let grid = compute_grid(viewport, base_cell_size);
        surface.resize(viewport.width, viewport.height);

        let noise_scale = NoiseScale::from_cell_size(grid.cell_size);
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            cols = grid.cols,
            rows = grid.rows,
            cell_size = grid.cell_size,
            noise_scale = noise_scale.x,
            "mosaic set up"
        );

        Mosaic {
            noise,
            noise_scale,
            base_cell_size,
        }
    }

    pub fn noise_scale(&self) -> NoiseScale {
        self.noise_scale
    }

    pub fn grid(&self, viewport: Viewport) -> GridConfig {
        compute_grid(viewport, self.base_cell_size)
    }

    /// Repaints the whole mosaic for `frame`.
    ///
    /// `rng` feeds the shimmer of the cool hue band.
    pub fn draw<S, R>(&self, surface: &mut S, viewport: Viewport, frame: u64, rng: &mut R) -> FrameStats
    where
        S: Surface,
        R: Rng,
    {
        surface.background(Hsba::WHITE);
        surface.disable_stroke();

        let grid = self.grid(viewport);
        let mut triangles = 0;

        for (x, y) in grid.cells() {
            let cell = Subdivision::new(grid.origin(x, y), grid.cell_size, frame);
            for triangle in cell.triangles() {
                let color = color_at(&self.noise, triangle.sample, frame, self.noise_scale, rng);
                surface.set_fill(color);
                let [a, b, c] = triangle.vertices;
                surface.fill_triangle(a, b, c);
                triangles += 1;
            }
        }

        tracing::trace!(frame, cols = grid.cols, rows = grid.rows, triangles, "frame drawn");
        FrameStats { grid, triangles }
    }
}
