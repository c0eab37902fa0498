//! Drawing capabilities the mosaic needs from its host.

use crate::colorizer::Hsba;
use crate::point::Point;

/// A drawing target in the style of an immediate-mode sketch canvas
pub trait Surface {
    /// (Re)creates the drawing area with the given pixel size
    fn resize(&mut self, width: u32, height: u32);

    /// Paints the whole surface with `color`
    fn background(&mut self, color: Hsba);

    /// Sets the fill used by subsequent triangles
    fn set_fill(&mut self, color: Hsba);

    /// Stops outlining subsequent shapes
    fn disable_stroke(&mut self);

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    Background(Hsba),
    Fill(Hsba),
    NoStroke,
    Triangle([Point; 3]),
}

/// A surface that records every call instead of drawing
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Triangles paired with the fill that was active when each was drawn
    pub fn filled_triangles(&self) -> Vec<([Point; 3], Hsba)> {
        let mut fill = None;
        let mut triangles = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::Fill(color) => fill = Some(*color),
                DrawCommand::Triangle(vertices) => {
                    if let Some(color) = fill {
                        triangles.push((*vertices, color));
                    }
                }
                _ => {}
            }
        }
        triangles
    }
}

impl Surface for CommandList {
    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn background(&mut self, color: Hsba) {
        self.commands.push(DrawCommand::Background(color));
    }

    fn set_fill(&mut self, color: Hsba) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn disable_stroke(&mut self) {
        self.commands.push(DrawCommand::NoStroke);
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) {
        self.commands.push(DrawCommand::Triangle([a, b, c]));
    }
}
