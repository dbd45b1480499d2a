//! Marker persistence across detection dropouts, plus the pinned-marker set.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

use crate::tracker::marker::{FrameMarkerSet, MarkerId};
use crate::tracker::track_state::TrackingState;

/// Default number of consecutive empty frames before the cache is dropped.
pub const DEFAULT_MAX_LOST_FRAMES: u32 = 18;

/// How many entries a single `pin` call appends when it brings several new ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPolicy {
    /// Append the whole set once for every newly pinned id.
    #[default]
    PerNewId,
    /// Append the whole set once per call that pinned at least one new id.
    PerCall,
}

#[derive(Debug, Clone)]
pub struct MarkerCache {
    cached_set: Option<FrameMarkerSet>,
    lost_frames: u32,
    max_lost_frames: u32,
    pinned_sets: Vec<Arc<FrameMarkerSet>>,
    pinned_ids: HashSet<MarkerId>,
    pin_policy: PinPolicy,
}

impl Default for MarkerCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOST_FRAMES)
    }
}

impl MarkerCache {
    pub fn new(max_lost_frames: u32) -> Self {
        Self {
            cached_set: None,
            lost_frames: 0,
            max_lost_frames,
            pinned_sets: Vec::new(),
            pinned_ids: HashSet::new(),
            pin_policy: PinPolicy::default(),
        }
    }

    pub fn with_pin_policy(mut self, pin_policy: PinPolicy) -> Self {
        self.pin_policy = pin_policy;
        self
    }

    /// Feed this frame's detections and get the authoritative marker set back.
    ///
    /// A non-empty input replaces the cache and is returned as-is. An empty
    /// input counts as a lost frame: the cached set keeps being returned until
    /// `max_lost_frames` consecutive losses, and on that exact frame the cache
    /// is dropped and the empty input is returned.
    pub fn update(&mut self, observed: FrameMarkerSet) -> FrameMarkerSet {
        if !observed.is_empty() {
            self.lost_frames = 0;
            self.cached_set = Some(observed.clone());
            return observed;
        }

        self.lost_frames = self.lost_frames.saturating_add(1);
        if self.lost_frames >= self.max_lost_frames && self.cached_set.take().is_some() {
            log::debug!("marker cache expired after {} lost frames", self.lost_frames);
        }

        match &self.cached_set {
            Some(cached) => cached.clone(),
            None => observed,
        }
    }

    /// Pin every id of `current` that is not pinned yet.
    pub fn pin(&mut self, current: &FrameMarkerSet) {
        let mut shared: Option<Arc<FrameMarkerSet>> = None;
        let mut appended = false;

        for &id in current.ids() {
            if !self.pinned_ids.insert(id) {
                continue;
            }
            log::debug!("pinned marker {id}");

            let set = shared.get_or_insert_with(|| Arc::new(current.clone()));
            match self.pin_policy {
                PinPolicy::PerNewId => self.pinned_sets.push(Arc::clone(set)),
                PinPolicy::PerCall if !appended => {
                    self.pinned_sets.push(Arc::clone(set));
                    appended = true;
                }
                PinPolicy::PerCall => {}
            }
        }
    }

    /// Drop every pin. Safe to call when nothing is pinned.
    pub fn clear_pinned(&mut self) {
        if !self.pinned_ids.is_empty() {
            log::debug!("cleared {} pinned markers", self.pinned_ids.len());
        }
        self.pinned_sets.clear();
        self.pinned_ids.clear();
    }

    /// Last known-good marker set, if it is still within tolerance.
    pub fn cached(&self) -> Option<&FrameMarkerSet> {
        self.cached_set.as_ref()
    }

    /// Consecutive empty frames since the last non-empty one.
    pub fn lost_frames(&self) -> u32 {
        self.lost_frames
    }

    /// Lost-frame tolerance this cache was built with.
    pub fn max_lost_frames(&self) -> u32 {
        self.max_lost_frames
    }

    /// Get the pin policy.
    pub fn pin_policy(&self) -> PinPolicy {
        self.pin_policy
    }

    /// Pinned sets in insertion order.
    pub fn pinned_sets(&self) -> &[Arc<FrameMarkerSet>] {
        &self.pinned_sets
    }

    /// Every id pinned since the last clear.
    pub fn pinned_ids(&self) -> &HashSet<MarkerId> {
        &self.pinned_ids
    }

    /// Whether `id` is currently pinned.
    pub fn is_pinned(&self, id: MarkerId) -> bool {
        self.pinned_ids.contains(&id)
    }

    /// Summarize the cache as a `TrackingState`.
    pub fn tracking_state(&self) -> TrackingState {
        match (&self.cached_set, self.lost_frames) {
            (Some(_), 0) => TrackingState::Fresh,
            (Some(_), _) => TrackingState::Held,
            (None, lost) if lost > 0 && lost >= self.max_lost_frames => TrackingState::Expired,
            (None, _) => TrackingState::Empty,
        }
    }
}
