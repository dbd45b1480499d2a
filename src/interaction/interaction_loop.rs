//! Per-frame orchestration of gestures, pinning and marker persistence.

use std::sync::Arc;

use nalgebra::Point2;

use crate::config::{ConfigError, InteractionConfig};
use crate::interaction::cursor::CursorMapper;
use crate::interaction::drag::{DragRectangle, default_rectangles};
use crate::interaction::gesture::{Gesture, HandLandmarks};
use crate::tracker::{FrameMarkerSet, MarkerCache};

/// Everything a renderer needs for one processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Index of the frame this output was computed on
    pub frame_index: u64,
    /// Authoritative markers: fresh, held from cache, or empty
    pub markers: FrameMarkerSet,
    /// Pinned sets in pin order, drawn regardless of `markers`
    pub pinned: Vec<Arc<FrameMarkerSet>>,
    /// Gesture recognised on this frame
    pub gesture: Gesture,
    /// Smoothed cursor, present only in move mode
    pub cursor: Option<Point2<f32>>,
    /// Draggable boxes after this frame's cursor update
    pub rectangles: Vec<DragRectangle>,
}

/// Result of feeding one frame to the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStep {
    /// Frame was fully processed.
    Processed(FrameOutput),
    /// Frame fell between intervals; carries the last processed output, if any.
    Skipped(Option<FrameOutput>),
}

impl FrameStep {
    /// The output carried by this step, if any.
    pub fn output(&self) -> Option<&FrameOutput> {
        match self {
            Self::Processed(output) => Some(output),
            Self::Skipped(output) => output.as_ref(),
        }
    }

    pub fn into_output(self) -> Option<FrameOutput> {
        match self {
            Self::Processed(output) => Some(output),
            Self::Skipped(output) => output,
        }
    }

    /// Whether the frame fell between processing intervals.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Owns all session state: the marker cache, the cursor and the draggable boxes.
#[derive(Debug, Clone)]
pub struct InteractionLoop {
    config: InteractionConfig,
    cache: MarkerCache,
    cursor: CursorMapper,
    rectangles: Vec<DragRectangle>,
    last_output: Option<FrameOutput>,
}

impl Default for InteractionLoop {
    fn default() -> Self {
        Self::build(InteractionConfig::default(), default_rectangles())
    }
}

impl InteractionLoop {
    pub fn new(config: InteractionConfig) -> Result<Self, ConfigError> {
        Self::with_rectangles(config, default_rectangles())
    }

    pub fn with_rectangles(
        config: InteractionConfig,
        rectangles: Vec<DragRectangle>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rectangles))
    }

    fn build(config: InteractionConfig, rectangles: Vec<DragRectangle>) -> Self {
        let cache = MarkerCache::new(config.max_lost_frames).with_pin_policy(config.pin_policy);
        let cursor = CursorMapper::new(
            config.frame_width as f32,
            config.frame_height as f32,
            config.frame_margin,
            config.smoothening,
        );
        Self {
            config,
            cache,
            cursor,
            rectangles,
            last_output: None,
        }
    }

    /// Whether `frame_index` falls on the processing stride.
    pub fn should_process(&self, frame_index: u64) -> bool {
        frame_index % self.config.frame_interval == 0
    }

    /// The step to emit for a frame that is not processed.
    pub fn skipped(&self) -> FrameStep {
        FrameStep::Skipped(self.last_output.clone())
    }

    /// Run one frame through gesture dispatch and the marker cache.
    ///
    /// Frames off the processing stride leave all state untouched and
    /// re-emit the last processed output.
    pub fn process(
        &mut self,
        frame_index: u64,
        observed: FrameMarkerSet,
        hand: Option<&HandLandmarks>,
    ) -> FrameStep {
        if !self.should_process(frame_index) {
            log::trace!("frame {frame_index} skipped");
            return self.skipped();
        }

        let (gesture, cursor) = match hand {
            Some(hand) => self.interact(hand),
            None => (Gesture::NoHand, None),
        };

        let markers = self.cache.update(observed);
        let output = FrameOutput {
            frame_index,
            markers,
            pinned: self.cache.pinned_sets().to_vec(),
            gesture,
            cursor,
            rectangles: self.rectangles.clone(),
        };
        self.last_output = Some(output.clone());
        FrameStep::Processed(output)
    }

    /// Classify `hand` and apply move or click handling.
    pub fn interact(&mut self, hand: &HandLandmarks) -> (Gesture, Option<Point2<f32>>) {
        let gesture = hand.classify();
        let cursor = match gesture {
            Gesture::Move { index_tip } => Some(self.move_cursor(index_tip)),
            Gesture::Click { distance, .. } => {
                self.apply_click(distance);
                None
            }
            Gesture::Idle | Gesture::NoHand => None,
        };
        (gesture, cursor)
    }

    /// Smooth the cursor toward `index_tip` and drag any box under it.
    pub fn move_cursor(&mut self, index_tip: Point2<f32>) -> Point2<f32> {
        let cursor = self.cursor.track(index_tip);
        for rect in &mut self.rectangles {
            rect.update(cursor);
        }
        cursor
    }

    /// Pin the cached markers when `distance` is under the click threshold,
    /// otherwise clear every pin. Returns whether it counted as a click.
    pub fn apply_click(&mut self, distance: f32) -> bool {
        if distance < self.config.click_distance_threshold {
            if let Some(current) = self.cache.cached().cloned() {
                self.cache.pin(&current);
            }
            true
        } else {
            self.cache.clear_pinned();
            false
        }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Get a reference to the marker cache.
    pub fn cache(&self) -> &MarkerCache {
        &self.cache
    }

    /// Draggable boxes in their current positions.
    pub fn rectangles(&self) -> &[DragRectangle] {
        &self.rectangles
    }

    /// Current smoothed cursor position.
    pub fn cursor(&self) -> Point2<f32> {
        self.cursor.position()
    }

    /// Output of the most recent processed frame.
    pub fn last_output(&self) -> Option<&FrameOutput> {
        self.last_output.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::gesture::tests::{closed_hand, raise};
    use crate::interaction::gesture::{INDEX_TIP, MIDDLE_TIP};
    use crate::tracker::{MarkerCorners, MarkerId};

    fn quad(offset: f32) -> MarkerCorners {
        [
            Point2::new(offset, offset),
            Point2::new(offset + 100.0, offset),
            Point2::new(offset + 100.0, offset + 100.0),
            Point2::new(offset, offset + 100.0),
        ]
    }

    fn set(ids: &[MarkerId]) -> FrameMarkerSet {
        let boxes = ids.iter().map(|&id| quad(id as f32 * 10.0)).collect();
        FrameMarkerSet::new(boxes, ids.to_vec()).unwrap()
    }

    fn config() -> InteractionConfig {
        InteractionConfig {
            max_lost_frames: 3,
            frame_interval: 1,
            ..Default::default()
        }
    }

    fn pointing_hand(at: Point2<f32>) -> HandLandmarks {
        let mut pts = closed_hand();
        raise(&mut pts, INDEX_TIP, at);
        HandLandmarks::new(pts)
    }

    fn two_finger_hand(gap: f32) -> HandLandmarks {
        let mut pts = closed_hand();
        raise(&mut pts, INDEX_TIP, Point2::new(300.0, 200.0));
        raise(&mut pts, MIDDLE_TIP, Point2::new(300.0 + gap, 200.0));
        HandLandmarks::new(pts)
    }

    #[test]
    fn test_click_threshold_is_exclusive() {
        let mut lp = InteractionLoop::new(config()).unwrap();
        lp.process(0, set(&[7]), None);

        assert!(lp.apply_click(59.9));
        assert!(lp.cache().is_pinned(7));

        assert!(!lp.apply_click(60.0));
        assert!(lp.cache().pinned_ids().is_empty());
    }

    #[test]
    fn test_click_without_cache_is_noop() {
        let mut lp = InteractionLoop::new(config()).unwrap();
        assert!(lp.apply_click(10.0));
        assert!(lp.cache().pinned_sets().is_empty());
    }

    #[test]
    fn test_click_pins_before_cache_update() {
        let mut lp = InteractionLoop::new(config()).unwrap();
        lp.process(0, set(&[1]), None);

        // The click pins what the cache held going into the frame, not the new detections.
        let step = lp.process(1, set(&[2]), Some(&two_finger_hand(20.0)));
        let output = step.output().unwrap();
        assert!(lp.cache().is_pinned(1));
        assert!(!lp.cache().is_pinned(2));
        assert_eq!(output.markers, set(&[2]));
        assert_eq!(output.pinned.len(), 1);
        assert_eq!(*output.pinned[0], set(&[1]));
    }

    #[test]
    fn test_fingers_apart_clears_every_frame() {
        let mut lp = InteractionLoop::new(config()).unwrap();
        lp.process(0, set(&[4]), Some(&two_finger_hand(10.0)));
        lp.process(1, set(&[4]), Some(&two_finger_hand(10.0)));
        assert!(lp.cache().is_pinned(4));

        let step = lp.process(2, set(&[4]), Some(&two_finger_hand(120.0)));
        assert!(step.output().unwrap().pinned.is_empty());
        assert!(!lp.cache().is_pinned(4));
    }

    #[test]
    fn test_pins_persist_without_hand() {
        let mut lp = InteractionLoop::new(config()).unwrap();
        lp.process(0, set(&[4]), None);
        lp.process(1, FrameMarkerSet::empty(), Some(&two_finger_hand(10.0)));
        for frame in 2..6 {
            let step = lp.process(frame, FrameMarkerSet::empty(), None);
            assert_eq!(step.output().unwrap().pinned.len(), 1);
        }
        assert!(lp.cache().cached().is_none());
    }

    #[test]
    fn test_move_mode_drags_rectangle() {
        let rect = DragRectangle::new(Point2::new(400.0, 300.0), (200.0, 200.0), [0, 0, 255]);
        let cfg = InteractionConfig {
            smoothening: 1.0,
            ..config()
        };
        let mut lp = InteractionLoop::with_rectangles(cfg, vec![rect]).unwrap();

        let step = lp.process(0, FrameMarkerSet::empty(), Some(&pointing_hand(Point2::new(430.0, 320.0))));
        let output = step.output().unwrap();
        // (430, 320) maps to (440, 330) through the 100px margin.
        assert_eq!(output.cursor, Some(Point2::new(440.0, 330.0)));
        assert_eq!(output.gesture, Gesture::Move { index_tip: Point2::new(430.0, 320.0) });
        assert_eq!(lp.rectangles()[0].center, Point2::new(440.0, 330.0));
        assert_eq!(output.rectangles[0].center, Point2::new(440.0, 330.0));
    }

    #[test]
    fn test_move_mode_smoothing_lags() {
        let rect = DragRectangle::new(Point2::new(400.0, 300.0), (100.0, 100.0), [0, 0, 255]);
        let mut lp = InteractionLoop::with_rectangles(config(), vec![rect]).unwrap();

        // Default smoothening of 7 starting from the origin stays far from the box.
        lp.process(0, FrameMarkerSet::empty(), Some(&pointing_hand(Point2::new(400.0, 300.0))));
        assert_eq!(lp.cursor(), Point2::new(400.0 / 7.0, 300.0 / 7.0));
        assert_eq!(lp.rectangles()[0].center, Point2::new(400.0, 300.0));
    }

    #[test]
    fn test_frame_skip_reuses_last_output() {
        let cfg = InteractionConfig {
            frame_interval: 2,
            ..config()
        };
        let mut lp = InteractionLoop::new(cfg).unwrap();

        let first = lp.process(0, set(&[7]), None);
        let skipped = lp.process(1, FrameMarkerSet::empty(), None);
        assert!(skipped.is_skipped());
        assert_eq!(skipped.output(), first.output());
        // Skipped frames never reach the cache.
        assert_eq!(lp.cache().lost_frames(), 0);

        let next = lp.process(2, FrameMarkerSet::empty(), None);
        assert!(!next.is_skipped());
        assert_eq!(next.output().unwrap().frame_index, 2);
        assert_eq!(lp.cache().lost_frames(), 1);
    }

    #[test]
    fn test_skip_before_first_processed_frame() {
        let cfg = InteractionConfig {
            frame_interval: 3,
            ..config()
        };
        let mut lp = InteractionLoop::new(cfg).unwrap();
        assert_eq!(lp.process(1, set(&[1]), None), FrameStep::Skipped(None));
        assert!(lp.cache().cached().is_none());
    }

    #[test]
    fn test_default_loop() {
        let lp = InteractionLoop::default();
        assert_eq!(lp.rectangles().len(), 3);
        assert_eq!(lp.cache().max_lost_frames(), 18);
        assert!(lp.should_process(0));
        assert!(!lp.should_process(1));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = InteractionConfig {
            frame_interval: 0,
            ..Default::default()
        };
        assert!(InteractionLoop::new(cfg).is_err());
    }
}
