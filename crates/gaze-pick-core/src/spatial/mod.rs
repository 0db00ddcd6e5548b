//! 2D viewport primitives
//!
//! Viewport coordinates grow right (+x) and down (+y), with the origin at the
//! top-left corner of the presentation surface.

mod point2d;
mod rect;

pub use point2d::Point2D;
pub use rect::{Rect, Viewport};
