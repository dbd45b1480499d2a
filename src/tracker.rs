mod marker;
mod marker_cache;
mod rect;
mod track_state;

pub use marker::{FrameMarkerSet, MarkerCorners, MarkerId, MarkerObservation, MarkerSetError};
pub use marker_cache::{DEFAULT_MAX_LOST_FRAMES, MarkerCache, PinPolicy};
pub use rect::Rect;
pub use track_state::TrackingState;
