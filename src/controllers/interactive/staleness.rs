//! Decides whether a camera move is worth a recompute.

use crate::core::data::camera::CameraState;

/// The camera coordinates a computation was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub zoom: f32,
    pub x: f32,
    pub y: f32,
}

impl CameraSnapshot {
    #[must_use]
    pub fn of(camera: &CameraState) -> Self {
        Self {
            zoom: camera.zoom,
            x: camera.x,
            y: camera.y,
        }
    }

    #[must_use]
    fn l1_distance(&self, other: &Self) -> f32 {
        (self.zoom - other.zoom).abs() + (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StalenessPolicy {
    /// Above this zoom every frame differs visibly; always recompute.
    pub high_zoom_threshold: f32,
    /// Below this L1 camera delta the view is visually unchanged.
    pub min_l1_delta: f32,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            high_zoom_threshold: 250.0,
            min_l1_delta: 0.001,
        }
    }
}

impl StalenessPolicy {
    /// `true` when a new computation is warranted.
    ///
    /// Unconditional with no prior computation or past the high-zoom
    /// threshold; otherwise only when the camera moved by more than the
    /// epsilon since the last computed snapshot.
    #[must_use]
    pub fn should_recompute(&self, last: Option<&CameraSnapshot>, current: &CameraSnapshot) -> bool {
        let Some(last) = last else {
            return true;
        };

        if current.zoom >= self.high_zoom_threshold {
            return true;
        }

        last.l1_distance(current) >= self.min_l1_delta
    }
}
