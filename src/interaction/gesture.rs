//! Finger-state classification from a 21-point hand skeleton.

use nalgebra::Point2;
use thiserror::Error;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Finger tips ordered thumb, index, middle, ring, pinky.
pub const TIP_IDS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandmarkError {
    #[error("expected 21 hand landmarks, got {0}")]
    WrongCount(usize),
    #[error("landmark index {0} out of range")]
    OutOfRange(usize),
}

/// One tracked hand in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Point2<f32>; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Point2<f32>; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a tracker's flat point list, which must hold exactly 21 entries.
    pub fn from_points(points: &[Point2<f32>]) -> Result<Self, LandmarkError> {
        let points: [Point2<f32>; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;
        Ok(Self { points })
    }

    /// Build from normalized `[0, 1]` coordinates scaled to the frame size.
    pub fn from_normalized(
        points: &[(f32, f32)],
        width: u32,
        height: u32,
    ) -> Result<Self, LandmarkError> {
        let scaled: Vec<Point2<f32>> = points
            .iter()
            .map(|&(x, y)| Point2::new(x * width as f32, y * height as f32))
            .collect();
        Self::from_points(&scaled)
    }

    pub fn point(&self, index: usize) -> Result<Point2<f32>, LandmarkError> {
        self.points
            .get(index)
            .copied()
            .ok_or(LandmarkError::OutOfRange(index))
    }

    pub fn points(&self) -> &[Point2<f32>; LANDMARK_COUNT] {
        &self.points
    }

    pub fn index_tip(&self) -> Point2<f32> {
        self.points[INDEX_TIP]
    }

    pub fn middle_tip(&self) -> Point2<f32> {
        self.points[MIDDLE_TIP]
    }

    /// Which fingers are extended.
    ///
    /// The thumb counts as up when its tip lies to the right of the joint
    /// below it; the other fingers when the tip is above the PIP joint.
    pub fn fingers_up(&self) -> FingerState {
        let mut up = [false; 5];
        let thumb = TIP_IDS[0];
        up[0] = self.points[thumb].x > self.points[thumb - 1].x;
        for (finger, &tip) in TIP_IDS.iter().enumerate().skip(1) {
            up[finger] = self.points[tip].y < self.points[tip - 2].y;
        }
        FingerState(up)
    }

    /// Euclidean distance between two landmarks.
    pub fn distance(&self, a: usize, b: usize) -> Result<f32, LandmarkError> {
        Ok(nalgebra::distance(&self.point(a)?, &self.point(b)?))
    }

    /// Classify this hand into the gestures the overlay loop reacts to.
    pub fn classify(&self) -> Gesture {
        let fingers = self.fingers_up();
        match (fingers.index(), fingers.middle()) {
            (true, false) => Gesture::Move {
                index_tip: self.index_tip(),
            },
            (true, true) => {
                let (a, b) = (self.index_tip(), self.middle_tip());
                Gesture::Click {
                    distance: nalgebra::distance(&a, &b),
                    midpoint: nalgebra::center(&a, &b),
                }
            }
            _ => Gesture::Idle,
        }
    }
}

/// Up/down flags ordered thumb, index, middle, ring, pinky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    pub fn thumb(&self) -> bool {
        self.0[0]
    }

    pub fn index(&self) -> bool {
        self.0[1]
    }

    pub fn middle(&self) -> bool {
        self.0[2]
    }

    pub fn ring(&self) -> bool {
        self.0[3]
    }

    pub fn pinky(&self) -> bool {
        self.0[4]
    }

    /// The 0/1 vector form used by hand trackers.
    pub fn as_bits(&self) -> [u8; 5] {
        self.0.map(u8::from)
    }
}

/// Gesture recognised for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No hand in view.
    #[default]
    NoHand,
    /// Hand visible, but neither move nor click pattern.
    Idle,
    /// Index up, middle down: the index tip drives the cursor.
    Move { index_tip: Point2<f32> },
    /// Index and middle up: `distance` between the two tips decides click vs release.
    Click { distance: f32, midpoint: Point2<f32> },
}
