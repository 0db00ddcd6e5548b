//! Axis-aligned rectangles for hit testing

use super::Point2D;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point2D,
    pub max: Point2D,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Point2D::new(x, y),
            max: Point2D::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Get the center of the rectangle
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Grow the rectangle by `amount` on every side (negative shrinks)
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min: Point2D::new(self.min.x - amount, self.min.y - amount),
            max: Point2D::new(self.max.x + amount, self.max.y + amount),
        }
    }

    /// Check if a point is inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Size of the presentation surface the cursor moves across
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // Portrait phone in points
        Self::new(390.0, 844.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point2D::new(0.0, 0.0)));
        assert!(rect.contains(Point2D::new(10.0, 10.0)));
        assert!(!rect.contains(Point2D::new(10.1, 5.0)));
    }

    #[test]
    fn test_inflate() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0).inflate(5.0);
        assert_eq!(rect.min, Point2D::new(5.0, 5.0));
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.center(), Point2D::new(15.0, 15.0));
    }

    #[test]
    fn test_viewport_center() {
        assert_eq!(Viewport::new(200.0, 100.0).center(), Point2D::new(100.0, 50.0));
    }
}
