//! Animated mosaic of noise-colored triangles.
//!
//! Each frame the viewport is cut into square cells, every cell is fanned
//! into eight triangles around a swaying center, and each triangle is filled
//! with a color sampled from a coherent noise field that scrolls over time.

pub mod canvas;
pub mod colorizer;
pub mod config;
pub mod error;
pub mod grid;
pub mod math;
pub mod mosaic;
pub mod point;
pub mod state;
pub mod surface;
pub mod terminal;

pub use canvas::Canvas;
pub use colorizer::{color_at, Hsba, NoiseScale, NoiseSource, PerlinNoise};
pub use grid::{compute_grid, GridConfig, Viewport};
pub use mosaic::{FrameStats, Mosaic, Subdivision, Triangle};
pub use point::Point;
pub use surface::{CommandList, DrawCommand, Surface};
