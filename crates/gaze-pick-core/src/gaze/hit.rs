//! Mapping cursor positions to list items

use crate::spatial::{Point2D, Rect};

/// Geometry collaborator: which item (if any) lies under a point
pub trait HitTest: Send {
    fn hit_test(&self, point: Point2D) -> Option<usize>;
}

impl<F> HitTest for F
where
    F: Fn(Point2D) -> Option<usize> + Send,
{
    fn hit_test(&self, point: Point2D) -> Option<usize> {
        self(point)
    }
}

/// Vertical list of equally tall rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListLayout {
    /// Top-left corner of the first row
    pub origin: Point2D,
    pub row_width: f32,
    pub row_height: f32,
    pub rows: usize,
    /// Extra hit area around every row
    pub padding: f32,
    /// Half the side of the square cursor; the cursor hits a row as soon as
    /// any part of it overlaps
    pub cursor_radius: f32,
}

impl ListLayout {
    pub fn new(origin: Point2D, row_width: f32, row_height: f32, rows: usize) -> Self {
        Self {
            origin,
            row_width,
            row_height,
            rows,
            padding: 0.0,
            cursor_radius: 0.0,
        }
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Treat the cursor as a square of side `2 * radius` centred on the point
    pub fn with_cursor_radius(mut self, radius: f32) -> Self {
        self.cursor_radius = radius;
        self
    }

    /// Visual frame of a row
    pub fn row_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y + index as f32 * self.row_height,
            self.row_width,
            self.row_height,
        )
    }
}

impl HitTest for ListLayout {
    fn hit_test(&self, point: Point2D) -> Option<usize> {
        if self.rows == 0 || self.row_height <= 0.0 || !point.is_finite() {
            return None;
        }

        // Padded rows overlap their neighbours; the row whose body holds the
        // point wins, then the nearest padded row.
        let offset = point.y - self.origin.y;
        let row = (offset / self.row_height).floor();
        let nearest = row.clamp(0.0, (self.rows - 1) as f32) as usize;

        self.row_rect(nearest)
            .inflate(self.padding + self.cursor_radius)
            .contains(point)
            .then_some(nearest)
    }
}

/// Maps the cursor to an item index through the presentation layer's geometry
pub struct HitMapper {
    hit_test: Box<dyn HitTest>,
    item_count: usize,
}

impl HitMapper {
    pub fn new(hit_test: impl HitTest + 'static, item_count: usize) -> Self {
        Self {
            hit_test: Box::new(hit_test),
            item_count,
        }
    }

    /// Item under `position`, or `None` when outside every row.
    ///
    /// Indices past the catalog end are treated as no target.
    pub fn locate(&self, position: Point2D) -> Option<usize> {
        self.hit_test
            .hit_test(position)
            .filter(|&index| index < self.item_count)
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// The catalog changed size
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }
}

impl std::fmt::Debug for HitMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitMapper")
            .field("item_count", &self.item_count)
            .finish_non_exhaustive()
    }
}
