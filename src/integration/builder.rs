//! Builder for assembling a `FrameMarkerSet` one marker at a time.

use nalgebra::Point2;

use crate::tracker::{FrameMarkerSet, MarkerCorners, MarkerId, MarkerObservation};

/// Builder that keeps boxes and ids aligned by construction.
#[derive(Debug, Clone, Default)]
pub struct FrameMarkerSetBuilder {
    markers: Vec<MarkerObservation>,
}

impl FrameMarkerSetBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker from its four corners, in detector order.
    pub fn marker(mut self, id: MarkerId, corners: MarkerCorners) -> Self {
        self.markers.push(MarkerObservation::new(id, corners));
        self
    }

    /// Add a marker from flat `[x, y]` corner pairs, as detectors usually emit them.
    pub fn marker_xy(self, id: MarkerId, corners: [[f32; 2]; 4]) -> Self {
        self.marker(id, corners.map(|[x, y]| Point2::new(x, y)))
    }

    /// Add an upright square marker given its top-left corner and side length.
    ///
    /// Corners run clockwise from top-left.
    pub fn square(self, id: MarkerId, x: f32, y: f32, side: f32) -> Self {
        self.marker_xy(
            id,
            [[x, y], [x + side, y], [x + side, y + side], [x, y + side]],
        )
    }

    /// Build the final `FrameMarkerSet`.
    pub fn build(self) -> FrameMarkerSet {
        self.markers.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let set = FrameMarkerSetBuilder::new()
            .square(7, 10.0, 10.0, 100.0)
            .marker_xy(3, [[0.0, 0.0], [0.0, 5.0], [5.0, 5.0], [5.0, 0.0]])
            .build();

        assert_eq!(set.ids(), &[7, 3]);
        assert_eq!(set.boxes()[0][2], Point2::new(110.0, 110.0));
        assert_eq!(set.boxes()[1][1], Point2::new(0.0, 5.0));
    }

    #[test]
    fn test_empty_builder() {
        assert!(FrameMarkerSetBuilder::new().build().is_empty());
    }
}
