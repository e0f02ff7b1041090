//! Interactive control loop for real-time fractal exploration.
//!
//! The loop owns camera, zoom and input state, advances them at a fixed
//! tick rate, and schedules escape-time computations against a pluggable
//! backend. Windowing and presentation stay behind the narrow contracts
//! in [`events`] and [`ports`].

pub mod events;
pub mod explorer;
pub mod input_state;
pub mod ports;
pub mod staleness;

pub use events::{ControlEvent, Key};
pub use explorer::{
    ComputeMode, Explorer, ExplorerConfig, ExplorerError, FrameReport, ScheduleAction,
};
pub use input_state::{InputState, KeyPhase};
pub use ports::{PresenterPort, RgbaFrame};
pub use staleness::{CameraSnapshot, StalenessPolicy};
