//! Draggable on-screen rectangles and their startup layout.

use nalgebra::Point2;

use crate::tracker::Rect;

/// Display color, opaque to the interaction logic.
pub type Rgb = [u8; 3];

/// An on-screen box that follows the cursor while the cursor is inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRectangle {
    pub center: Point2<f32>,
    pub size: (f32, f32),
    pub color: Rgb,
}

impl DragRectangle {
    pub fn new(center: Point2<f32>, size: (f32, f32), color: Rgb) -> Self {
        Self {
            center,
            size,
            color,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.size.0, self.size.1)
    }

    /// Strict containment, edges excluded.
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        self.bounds().contains_strict(point)
    }

    /// Snap the center onto `cursor` if the cursor is inside the box.
    pub fn update(&mut self, cursor: Point2<f32>) {
        if self.contains(&cursor) {
            self.center = cursor;
        }
    }
}

/// The three boxes laid out along the top of the frame at startup.
pub fn default_rectangles() -> Vec<DragRectangle> {
    vec![
        DragRectangle::new(Point2::new(100.0, 100.0), (100.0, 100.0), [255, 0, 255]),
        DragRectangle::new(Point2::new(300.0, 100.0), (100.0, 100.0), [255, 255, 0]),
        DragRectangle::new(Point2::new(500.0, 100.0), (100.0, 100.0), [0, 255, 255]),
    ]
}
