//! Integration module for connecting detection backends with the overlay loop.
//!
//! This module provides traits for plugging in a marker detector and a hand
//! tracker, a pipeline that drives both per frame, and the overlay image
//! store used when compositing.

mod assets;
mod builder;
mod detector;
mod pipeline;

pub use assets::{AssetError, OverlayAssets, OverlayImage};
pub use builder::FrameMarkerSetBuilder;
pub use detector::{HandSource, IntoMarkerSet, MarkerSource};
pub use pipeline::{OverlayPipeline, PipelineError};
