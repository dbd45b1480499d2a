//! Marker persistence, gesture pinning and drag interaction for fiducial-marker
//! AR overlays.
//!
//! Detection itself is pluggable: implement [`MarkerSource`] and [`HandSource`]
//! and hand both to an [`OverlayPipeline`], or feed an [`InteractionLoop`]
//! directly with per-frame results.

pub mod config;
pub mod integration;
pub mod interaction;
pub mod tracker;

pub use config::{ConfigError, InteractionConfig};
pub use integration::{
    AssetError, FrameMarkerSetBuilder, HandSource, IntoMarkerSet, MarkerSource, OverlayAssets,
    OverlayImage, OverlayPipeline, PipelineError,
};
pub use interaction::{
    DragRectangle, FingerState, FrameOutput, FrameStep, Gesture, HandLandmarks, InteractionLoop,
};
pub use tracker::{
    FrameMarkerSet, MarkerCache, MarkerId, MarkerObservation, PinPolicy, Rect, TrackingState,
};
