mod controllers;
mod core;
#[cfg(feature = "gui")]
mod input;
#[cfg(feature = "gui")]
mod presenters;

pub use crate::controllers::interactive::{
    CameraSnapshot, ComputeMode, ControlEvent, Explorer, ExplorerConfig, ExplorerError,
    FrameReport, InputState, Key, KeyPhase, PresenterPort, RgbaFrame, ScheduleAction,
    StalenessPolicy,
};
pub use crate::core::compute::{
    ComputeBackend, CpuBackend, RayonBackend, compute_area, compute_area_async,
};
pub use crate::core::data::camera::{
    CameraState, CameraStepReport, CameraTuning, PanControls, step_camera,
};
pub use crate::core::data::iteration_buffer::{IterationBuffer, IterationBufferError};
pub use crate::core::data::viewport::{Viewport, ViewportError};
pub use crate::core::escape::{DEFAULT_MAX_ITERATIONS, escape_iterations};
pub use crate::core::palette::{PALETTE, Rgb, colour_for, render_rgba};
pub use crate::core::task::{Task, TaskError};

#[cfg(feature = "gui")]
pub use crate::input::gui::window_loop::run_gui;
