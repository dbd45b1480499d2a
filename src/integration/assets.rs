//! Overlay images keyed by marker id, loaded once at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ndarray::Array3;
use thiserror::Error;

use crate::interaction::FrameOutput;
use crate::tracker::{MarkerId, MarkerObservation};

/// RGB overlay buffer laid out as (height, width, channel).
pub type OverlayImage = Array3<u8>;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read overlay directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no overlay images found in {0}")]
    Empty(PathBuf),
}

/// Why a single file was left out of the asset map.
#[derive(Debug, Error)]
enum SkipReason {
    #[error("file stem is not a marker id")]
    NotAnId,
    #[error(transparent)]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

#[derive(Debug, Clone, Default)]
pub struct OverlayAssets {
    images: HashMap<MarkerId, OverlayImage>,
}

impl OverlayAssets {
    /// Load every `<id>.<ext>` image from `dir`.
    ///
    /// Files that are not named after an id or fail to decode are skipped
    /// with a warning. An unreadable directory or one with no usable images
    /// is an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|source| AssetError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut images = HashMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| AssetError::Directory {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            if !path.is_file() {
                continue;
            }
            match load_image(&path) {
                Ok((id, image)) => {
                    images.insert(id, image);
                }
                Err(reason) => log::warn!("skipping overlay {}: {reason}", path.display()),
            }
        }

        if images.is_empty() {
            return Err(AssetError::Empty(dir.to_path_buf()));
        }
        log::info!("loaded {} overlay images from {}", images.len(), dir.display());
        Ok(Self { images })
    }

    pub fn from_images(images: HashMap<MarkerId, OverlayImage>) -> Self {
        Self { images }
    }

    pub fn get(&self, id: MarkerId) -> Option<&OverlayImage> {
        self.images.get(&id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Markers to composite for `output`, authoritative set first, then every
    /// pinned set in pin order. Markers without an image are left out.
    pub fn overlays<'a>(
        &'a self,
        output: &'a FrameOutput,
    ) -> impl Iterator<Item = (MarkerObservation, &'a OverlayImage)> + 'a {
        std::iter::once(&output.markers)
            .chain(output.pinned.iter().map(|set| &**set))
            .flat_map(|set| set.observations())
            .filter_map(|obs| self.get(obs.id).map(|image| (obs, image)))
    }
}

fn load_image(path: &Path) -> Result<(MarkerId, OverlayImage), SkipReason> {
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse::<MarkerId>().ok())
        .ok_or(SkipReason::NotAnId)?;

    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let buffer = Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())?;
    Ok((id, buffer))
}
