//! Camera state and its fixed-timestep integration.
//!
//! The camera is owned exclusively by the control loop and mutated only
//! inside `step_camera`, once per fixed tick. Pan acceleration is divided
//! by the current zoom so that pan speed stays screen-space-invariant as
//! the view zooms in.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub zoom: f32,
    pub zoom_velocity: f32,
    pub x: f32,
    pub y: f32,
    pub x_velocity: f32,
    pub y_velocity: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            zoom: 0.3,
            zoom_velocity: 0.0,
            x: 0.0,
            y: 0.0,
            x_velocity: 0.0,
            y_velocity: 0.0,
        }
    }
}

/// Which directional keys are held for one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanControls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    pub tick_hz: u32,
    pub pan_accel: f32,
    pub zoom_sensitivity: f32,
    pub damping: f32,
    pub zoom_floor: f32,
    pub max_ticks_per_frame: u32,
}

impl CameraTuning {
    #[must_use]
    pub fn dt(&self) -> f32 {
        if self.tick_hz == 0 {
            0.0
        } else {
            1.0 / self.tick_hz as f32
        }
    }
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            tick_hz: 200,
            pan_accel: 0.01,
            zoom_sensitivity: 0.1,
            damping: 0.95,
            zoom_floor: 0.1,
            max_ticks_per_frame: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraStepReport {
    pub zoom_clamped: bool,
}

/// Advances the camera by one fixed step.
///
/// Held pan keys accelerate the position velocity, scroll input
/// accelerates the zoom velocity proportionally to the current zoom, and
/// both velocities decay by the damping factor each step. Zoom is clamped
/// to the floor so the derived viewport can never degenerate or invert.
pub fn step_camera(
    camera: &mut CameraState,
    controls: PanControls,
    scroll_delta: f32,
    tuning: &CameraTuning,
) -> CameraStepReport {
    let dt = tuning.dt();
    let pan_speed = dt * tuning.pan_accel / camera.zoom;

    if controls.left {
        camera.x_velocity -= pan_speed;
    }
    if controls.right {
        camera.x_velocity += pan_speed;
    }
    if controls.up {
        camera.y_velocity -= pan_speed;
    }
    if controls.down {
        camera.y_velocity += pan_speed;
    }
    camera.x += camera.x_velocity;
    camera.y += camera.y_velocity;
    camera.x_velocity *= tuning.damping;
    camera.y_velocity *= tuning.damping;

    camera.zoom_velocity += scroll_delta * dt * tuning.zoom_sensitivity * camera.zoom;
    camera.zoom_velocity *= tuning.damping;
    camera.zoom += camera.zoom_velocity;

    let mut report = CameraStepReport::default();
    if camera.zoom < tuning.zoom_floor {
        camera.zoom = tuning.zoom_floor;
        report.zoom_clamped = true;
    }

    report
}
