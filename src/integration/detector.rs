//! Traits for the marker detector and hand tracker backends.

use crate::interaction::HandLandmarks;
use crate::tracker::FrameMarkerSet;

/// Trait for fiducial marker detection backends.
///
/// Implement this trait to connect any marker detector to the overlay loop.
/// Finding no markers is a normal result, not an error.
///
/// # Example
///
/// ```ignore
/// use aroverlay_rs::{FrameMarkerSet, MarkerSource};
///
/// struct MyArucoDetector {
///     // Your detector here
/// }
///
/// impl MarkerSource for MyArucoDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &[u8], width: u32, height: u32) -> Result<FrameMarkerSet, Self::Error> {
///         Ok(FrameMarkerSet::empty())
///     }
/// }
/// ```
pub trait MarkerSource {
    /// Error type for detection failures.
    type Error;

    /// Detect markers on raw image data.
    ///
    /// # Arguments
    /// * `frame` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        frame: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameMarkerSet, Self::Error>;
}

/// Trait for hand landmark backends.
///
/// Returns the landmarks of every tracked hand, most confident first. An empty
/// list means no hand is in view. The pipeline keeps at most
/// `InteractionConfig::max_hands` of them and drives the loop with the first.
pub trait HandSource {
    type Error;

    fn track(
        &mut self,
        frame: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<HandLandmarks>, Self::Error>;
}

/// Helper trait for converting detector-specific outputs to `FrameMarkerSet`.
pub trait IntoMarkerSet {
    fn into_marker_set(self) -> FrameMarkerSet;
}

impl IntoMarkerSet for FrameMarkerSet {
    fn into_marker_set(self) -> FrameMarkerSet {
        self
    }
}

impl IntoMarkerSet for Vec<crate::tracker::MarkerObservation> {
    fn into_marker_set(self) -> FrameMarkerSet {
        self.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::MarkerObservation;
    use nalgebra::Point2;

    #[test]
    fn test_observations_into_marker_set() {
        let corners = [Point2::new(1.0, 1.0); 4];
        let set = vec![
            MarkerObservation::new(3, corners),
            MarkerObservation::new(3, corners),
        ]
        .into_marker_set();
        // Duplicate ids within a frame are kept as-is.
        assert_eq!(set.ids(), &[3, 3]);
        assert!(set.contains_id(3));
        assert!(!set.contains_id(4));
    }
}
