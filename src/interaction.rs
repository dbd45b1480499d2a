//! Gesture handling and the per-frame interaction loop.
//!
//! Turns hand landmarks into cursor moves and pin/unpin clicks, and drives
//! the marker cache once per processed frame.

mod cursor;
mod drag;
mod gesture;
mod interaction_loop;

pub use cursor::CursorMapper;
pub use drag::{DragRectangle, Rgb, default_rectangles};
pub use gesture::{
    FingerState, Gesture, HandLandmarks, INDEX_TIP, LANDMARK_COUNT, LandmarkError, MIDDLE_TIP,
    PINKY_TIP, RING_TIP, THUMB_TIP, TIP_IDS, WRIST,
};
pub use interaction_loop::{FrameOutput, FrameStep, InteractionLoop};
