/// Tracking state of the marker cache, independent of what is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// Nothing has been cached yet
    #[default]
    Empty,
    /// Last update carried at least one marker
    Fresh,
    /// Markers missing, still reporting the cached set
    Held,
    /// No markers for the whole tolerance window
    Expired,
}

impl TrackingState {
    /// Whether the cache is currently reporting markers.
    pub fn is_reporting(&self) -> bool {
        matches!(self, Self::Fresh | Self::Held)
    }
}
