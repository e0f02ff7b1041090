use crate::core::data::camera::CameraState;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    InvalidSize { width: f32, height: f32 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "viewport size must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for ViewportError {}

/// A rectangular region of the complex plane.
///
/// Derived fresh from the camera every update and never mutated in place.
/// Invariant: `x_max > x_min` and `y_max > y_min`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
}

impl Viewport {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Result<Self, ViewportError> {
        let width = x_max - x_min;
        let height = y_max - y_min;

        if width <= 0.0 || height <= 0.0 {
            return Err(ViewportError::InvalidSize { width, height });
        }

        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Centers the view on the camera with vertical extent `1 / zoom` and
    /// horizontal extent scaled by the aspect ratio.
    ///
    /// Total over every camera with `zoom > 0`; the control loop clamps
    /// zoom to its floor, so the precondition always holds there.
    #[must_use]
    pub fn from_camera(camera: &CameraState, aspect_ratio: f32) -> Self {
        let height = 1.0 / camera.zoom;
        let width = aspect_ratio * height;

        Self {
            x_min: camera.x - width / 2.0,
            y_min: camera.y - height / 2.0,
            x_max: camera.x + width / 2.0,
            y_max: camera.y + height / 2.0,
        }
    }

    #[must_use]
    pub fn x_min(&self) -> f32 {
        self.x_min
    }

    #[must_use]
    pub fn y_min(&self) -> f32 {
        self.y_min
    }

    #[must_use]
    pub fn x_max(&self) -> f32 {
        self.x_max
    }

    #[must_use]
    pub fn y_max(&self) -> f32 {
        self.y_max
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}
