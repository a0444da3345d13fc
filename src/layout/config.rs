//! Configuration for the design canvas

use super::types::Point;

/// Geometry of the free-form editing canvas
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: i32,

    /// Canvas height in pixels
    pub height: i32,

    /// Minimum visible extent kept inside the canvas while dragging.
    /// Applied to every element regardless of its own size.
    pub drag_margin: i32,

    /// Where newly added elements appear
    pub spawn_position: Point,

    /// Offset applied to both axes when duplicating
    pub duplicate_offset: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            drag_margin: 50,
            spawn_position: Point::new(100, 100),
            duplicate_offset: 20,
        }
    }
}

impl CanvasConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the drag margin
    pub fn with_drag_margin(mut self, margin: i32) -> Self {
        self.drag_margin = margin;
        self
    }

    /// Set where new elements spawn
    pub fn with_spawn_position(mut self, at: Point) -> Self {
        self.spawn_position = at;
        self
    }

    /// Clamp a proposed origin into `[0, width - margin] x [0, height - margin]`
    pub fn clamp(&self, p: Point) -> Point {
        let max_x = self.width - self.drag_margin;
        let max_y = self.height - self.drag_margin;
        Point::new(p.x.min(max_x).max(0), p.y.min(max_y).max(0))
    }

    /// Whether an origin lies on the canvas
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x <= self.width && p.y <= self.height
    }
}
