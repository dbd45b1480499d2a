//! Per-frame marker detections.

use nalgebra::Point2;
use thiserror::Error;

use crate::tracker::rect::Rect;

/// Integer identity decoded from a fiducial marker.
pub type MarkerId = u32;

/// Four corner points of a marker, in the order the detector produced them.
pub type MarkerCorners = [Point2<f32>; 4];

/// Error raised when a detector hands over misaligned sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerSetError {
    #[error("marker set is misaligned: {boxes} boxes but {ids} ids")]
    Misaligned { boxes: usize, ids: usize },
}

/// One detected fiducial in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerObservation {
    /// Decoded marker id
    pub id: MarkerId,
    /// Corner quad, never re-ordered
    pub corners: MarkerCorners,
}

impl MarkerObservation {
    pub fn new(id: MarkerId, corners: MarkerCorners) -> Self {
        Self { id, corners }
    }

    /// Axis-aligned bounds of the corner quad.
    pub fn bounds(&self) -> Rect {
        Rect::enclosing(&self.corners)
    }
}

/// All markers seen in one frame, as two index-aligned sequences.
///
/// The i-th id belongs to the i-th corner quad. Ids are not guaranteed to be
/// unique within a frame. An empty set means "no markers".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameMarkerSet {
    boxes: Vec<MarkerCorners>,
    ids: Vec<MarkerId>,
}

impl FrameMarkerSet {
    /// Build a set from parallel sequences, rejecting mismatched lengths.
    pub fn new(boxes: Vec<MarkerCorners>, ids: Vec<MarkerId>) -> Result<Self, MarkerSetError> {
        if boxes.len() != ids.len() {
            return Err(MarkerSetError::Misaligned {
                boxes: boxes.len(),
                ids: ids.len(),
            });
        }
        Ok(Self { boxes, ids })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn boxes(&self) -> &[MarkerCorners] {
        &self.boxes
    }

    pub fn ids(&self) -> &[MarkerId] {
        &self.ids
    }

    pub fn contains_id(&self, id: MarkerId) -> bool {
        self.ids.contains(&id)
    }

    /// Iterate the set as observations, preserving index order.
    pub fn observations(&self) -> impl Iterator<Item = MarkerObservation> + '_ {
        self.boxes
            .iter()
            .zip(self.ids.iter())
            .map(|(corners, &id)| MarkerObservation::new(id, *corners))
    }
}

impl FromIterator<MarkerObservation> for FrameMarkerSet {
    fn from_iter<I: IntoIterator<Item = MarkerObservation>>(iter: I) -> Self {
        let (boxes, ids) = iter.into_iter().map(|o| (o.corners, o.id)).unzip();
        Self { boxes, ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(offset: f32) -> MarkerCorners {
        [
            Point2::new(offset, offset),
            Point2::new(offset + 100.0, offset),
            Point2::new(offset + 100.0, offset + 100.0),
            Point2::new(offset, offset + 100.0),
        ]
    }

    #[test]
    fn test_misaligned_rejected() {
        let err = FrameMarkerSet::new(vec![quad(0.0)], vec![1, 2]).unwrap_err();
        assert_eq!(err, MarkerSetError::Misaligned { boxes: 1, ids: 2 });
    }

    #[test]
    fn test_observations_keep_alignment() {
        let set = FrameMarkerSet::new(vec![quad(0.0), quad(50.0)], vec![7, 3]).unwrap();
        let obs: Vec<_> = set.observations().collect();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].id, 7);
        assert_eq!(obs[0].corners, quad(0.0));
        assert_eq!(obs[1].id, 3);
        assert_eq!(obs[1].corners, quad(50.0));
    }

    #[test]
    fn test_corner_order_preserved() {
        // Counter-clockwise quad must come back exactly as given.
        let ccw = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
        ];
        let set: FrameMarkerSet = std::iter::once(MarkerObservation::new(4, ccw)).collect();
        assert_eq!(set.boxes()[0], ccw);
        assert_eq!(set.observations().next().unwrap().bounds().to_tlbr(), [0.0, 0.0, 10.0, 10.0]);
    }

    #[test]
    fn test_empty() {
        let set = FrameMarkerSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.observations().count(), 0);
    }
}
