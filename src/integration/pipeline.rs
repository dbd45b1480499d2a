//! OverlayPipeline for combining detection backends with the interaction loop.

use thiserror::Error;

use crate::config::{ConfigError, InteractionConfig};
use crate::interaction::{FrameStep, InteractionLoop};

use super::{HandSource, MarkerSource};

/// A backend failure while processing a frame.
#[derive(Debug, Error)]
pub enum PipelineError<M, H> {
    #[error("marker detection failed: {0}")]
    Markers(M),
    /// The frame still went through the loop without hand input; `step`
    /// holds that result.
    #[error("hand tracking failed: {error}")]
    Hands { error: H, step: FrameStep },
}

/// Bundles a marker detector and a hand tracker with an `InteractionLoop`.
///
/// The pipeline owns the frame counter, so backends only run on frames the
/// loop actually processes.
pub struct OverlayPipeline<M: MarkerSource, H: HandSource> {
    markers: M,
    hands: H,
    interaction: InteractionLoop,
    frame_index: u64,
}

impl<M: MarkerSource, H: HandSource> OverlayPipeline<M, H> {
    /// Create a new pipeline with the given backends and config.
    pub fn new(markers: M, hands: H, config: InteractionConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_loop(markers, hands, InteractionLoop::new(config)?))
    }

    /// Create a new pipeline with the default configuration.
    pub fn with_default_config(markers: M, hands: H) -> Self {
        Self::from_loop(markers, hands, InteractionLoop::default())
    }

    /// Wrap an already configured loop.
    pub fn from_loop(markers: M, hands: H, interaction: InteractionLoop) -> Self {
        Self {
            markers,
            hands,
            interaction,
            frame_index: 0,
        }
    }

    /// Process the next camera frame.
    ///
    /// # Arguments
    /// * `frame` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// The processed or re-emitted output, or a backend error. The frame
    /// counter advances even when a backend fails. A hand tracking failure
    /// still ages the marker cache: the frame is processed with no hand and
    /// the resulting step is carried in `PipelineError::Hands`.
    pub fn process_frame(
        &mut self,
        frame: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameStep, PipelineError<M::Error, H::Error>> {
        let frame_index = self.frame_index;
        self.frame_index += 1;

        if !self.interaction.should_process(frame_index) {
            return Ok(self.interaction.skipped());
        }

        let observed = self
            .markers
            .detect(frame, width, height)
            .map_err(PipelineError::Markers)?;

        match self.hands.track(frame, width, height) {
            Ok(mut hands) => {
                hands.truncate(self.interaction.config().max_hands as usize);
                Ok(self
                    .interaction
                    .process(frame_index, observed, hands.first()))
            }
            Err(error) => {
                log::warn!("hand tracking failed on frame {frame_index}, continuing without hands");
                let step = self.interaction.process(frame_index, observed, None);
                Err(PipelineError::Hands { error, step })
            }
        }
    }

    /// Index the next frame will be processed under.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Get a reference to the interaction loop.
    pub fn interaction(&self) -> &InteractionLoop {
        &self.interaction
    }

    /// Get a mutable reference to the interaction loop.
    pub fn interaction_mut(&mut self) -> &mut InteractionLoop {
        &mut self.interaction
    }

    /// Get a reference to the marker detector.
    pub fn markers(&self) -> &M {
        &self.markers
    }

    /// Get a mutable reference to the marker detector.
    pub fn markers_mut(&mut self) -> &mut M {
        &mut self.markers
    }

    /// Get a reference to the hand tracker.
    pub fn hands(&self) -> &H {
        &self.hands
    }

    /// Get a mutable reference to the hand tracker.
    pub fn hands_mut(&mut self) -> &mut H {
        &mut self.hands
    }
}
