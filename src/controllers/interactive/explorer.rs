//! The interactive compute-and-present loop.
//!
//! One control thread owns all camera and input state. Camera motion runs
//! at a fixed tick rate fed by an accumulator over variable frame times;
//! compute work runs on worker threads behind [`Task`] handles that are
//! polled, never awaited, from here. At most one computation is in flight
//! at a time, and each finished buffer reaches the presenter exactly once.

use crate::controllers::interactive::events::{ControlEvent, Key};
use crate::controllers::interactive::input_state::InputState;
use crate::controllers::interactive::ports::{PresenterPort, RgbaFrame};
use crate::controllers::interactive::staleness::{CameraSnapshot, StalenessPolicy};
use crate::core::compute::ComputeBackend;
use crate::core::data::camera::{CameraState, CameraTuning, PanControls, step_camera};
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::viewport::Viewport;
use crate::core::escape::DEFAULT_MAX_ITERATIONS;
use crate::core::palette;
use crate::core::task::{Task, TaskError};
use log::{debug, info};
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Wheel deltas at or above this magnitude are spurious spikes.
const SCROLL_SPIKE_LIMIT: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    ComputeFailed(TaskError),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComputeFailed(source) => write!(f, "fractal computation failed: {}", source),
        }
    }
}

impl Error for ExplorerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ComputeFailed(source) => Some(source),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeMode {
    /// Compute every frame on the control thread. Simple, stalls input.
    Synchronous,
    /// Fire-and-forget async tasks polled every frame.
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerConfig {
    pub tuning: CameraTuning,
    pub staleness: StalenessPolicy,
    pub mode: ComputeMode,
    pub max_iterations: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            tuning: CameraTuning::default(),
            staleness: StalenessPolicy::default(),
            mode: ComputeMode::Background,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// What the scheduling phase of one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    /// Nothing warranted a recompute; the displayed buffer stands.
    Idle,
    /// A new computation was submitted this frame.
    Submitted,
    /// The outstanding computation has not finished yet.
    StillComputing,
    /// A computation finished and its buffer went to the presenter.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks_run: u32,
    pub presented: bool,
    pub quit_requested: bool,
    pub schedule: ScheduleAction,
}

pub struct Explorer {
    backend: Box<dyn ComputeBackend>,
    config: ExplorerConfig,
    camera: CameraState,
    input: InputState,
    accumulator_secs: f64,
    scroll_delta: f32,
    pending: Option<Task<IterationBuffer>>,
    last_computed: Option<CameraSnapshot>,
    quit_requested: bool,
    frames_presented: u64,
}

impl Explorer {
    #[must_use]
    pub fn new(backend: Box<dyn ComputeBackend>, config: ExplorerConfig) -> Self {
        Self {
            backend,
            config,
            camera: CameraState::default(),
            input: InputState::new(),
            accumulator_secs: 0.0,
            scroll_delta: 0.0,
            pending: None,
            last_computed: None,
            quit_requested: false,
            frames_presented: 0,
        }
    }

    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    #[must_use]
    pub fn is_computing(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Frames handed to the presenter since startup; the shell can diff
    /// this once per second for an FPS readout.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Runs one variable-duration frame.
    ///
    /// Drains whole fixed steps from the accumulator (settling input
    /// edges, pumping `events`, integrating the camera), then schedules or
    /// polls the computation and hands any finished buffer to `presenter`.
    pub fn frame(
        &mut self,
        elapsed: Duration,
        client_size: (u32, u32),
        events: &mut dyn FnMut() -> Vec<ControlEvent>,
        presenter: &mut dyn PresenterPort,
    ) -> Result<FrameReport, ExplorerError> {
        let ticks_run = self.run_fixed_steps(elapsed, events);

        let (width, height) = client_size;
        let schedule = if width == 0 || height == 0 {
            // Minimised window: keep simulating, skip compute and present.
            ScheduleAction::Idle
        } else {
            let aspect_ratio = width as f32 / height as f32;
            let viewport = Viewport::from_camera(&self.camera, aspect_ratio);
            self.schedule_compute(viewport, width, height, presenter)?
        };

        let presented = matches!(schedule, ScheduleAction::Completed);
        if presented {
            self.frames_presented += 1;
        }

        Ok(FrameReport {
            ticks_run,
            presented,
            quit_requested: self.quit_requested,
            schedule,
        })
    }

    fn run_fixed_steps(
        &mut self,
        elapsed: Duration,
        events: &mut dyn FnMut() -> Vec<ControlEvent>,
    ) -> u32 {
        let dt = f64::from(self.config.tuning.dt());
        if dt <= 0.0 {
            return 0;
        }

        self.accumulator_secs += elapsed.as_secs_f64();
        if !self.accumulator_secs.is_finite() || self.accumulator_secs < 0.0 {
            self.accumulator_secs = 0.0;
        }

        let ticks_available = (self.accumulator_secs / dt).floor();
        let max_ticks = f64::from(self.config.tuning.max_ticks_per_frame);
        let ticks_run = ticks_available.min(max_ticks) as u32;

        for _ in 0..ticks_run {
            self.input.settle();
            self.pump_events(events);
            let pan = self.pan_controls();
            step_camera(&mut self.camera, pan, self.scroll_delta, &self.config.tuning);
        }

        if ticks_available > max_ticks {
            // Fell badly behind; drop the excess rather than spiral.
            self.accumulator_secs = 0.0;
        } else {
            self.accumulator_secs -= f64::from(ticks_run) * dt;
            if self.accumulator_secs < 0.0 {
                self.accumulator_secs = 0.0;
            }
        }

        ticks_run
    }

    fn pump_events(&mut self, events: &mut dyn FnMut() -> Vec<ControlEvent>) {
        self.scroll_delta = 0.0;

        for event in events() {
            match event {
                ControlEvent::Quit => {
                    info!("quit requested");
                    self.quit_requested = true;
                }
                ControlEvent::KeyDown(key) => self.input.key_down(key),
                ControlEvent::KeyUp(key) => self.input.key_up(key),
                ControlEvent::Scroll(delta) => {
                    if delta.abs() < SCROLL_SPIKE_LIMIT {
                        self.scroll_delta += delta;
                    }
                }
                ControlEvent::Resize { width, height } => {
                    debug!("client area resized to {}x{}", width, height);
                }
            }
        }
    }

    fn pan_controls(&self) -> PanControls {
        PanControls {
            left: self.input.is_held(Key::PanLeft),
            right: self.input.is_held(Key::PanRight),
            up: self.input.is_held(Key::PanUp),
            down: self.input.is_held(Key::PanDown),
        }
    }

    fn schedule_compute(
        &mut self,
        viewport: Viewport,
        width: u32,
        height: u32,
        presenter: &mut dyn PresenterPort,
    ) -> Result<ScheduleAction, ExplorerError> {
        match self.config.mode {
            ComputeMode::Synchronous => {
                let buffer = self
                    .backend
                    .compute_area(viewport, width, height, self.config.max_iterations);
                self.last_computed = Some(CameraSnapshot::of(&self.camera));
                self.deliver(buffer, presenter);
                Ok(ScheduleAction::Completed)
            }
            ComputeMode::Background => {
                if let Some(task) = self.pending.as_mut() {
                    // Computing: recompute requests are dropped until the
                    // outstanding task is consumed.
                    return match task.poll_completion() {
                        Some(Ok(buffer)) => {
                            self.pending = None;
                            debug!("computation completed ({}x{})", width, height);
                            self.deliver(buffer, presenter);
                            Ok(ScheduleAction::Completed)
                        }
                        Some(Err(source)) => {
                            self.pending = None;
                            Err(ExplorerError::ComputeFailed(source))
                        }
                        None => Ok(ScheduleAction::StillComputing),
                    };
                }

                let snapshot = CameraSnapshot::of(&self.camera);
                if !self
                    .config
                    .staleness
                    .should_recompute(self.last_computed.as_ref(), &snapshot)
                {
                    return Ok(ScheduleAction::Idle);
                }

                debug!(
                    "submitting {}x{} computation at zoom {}",
                    width, height, snapshot.zoom
                );
                self.last_computed = Some(snapshot);
                self.pending = Some(self.backend.compute_area_async(
                    viewport,
                    width,
                    height,
                    self.config.max_iterations,
                ));
                Ok(ScheduleAction::Submitted)
            }
        }
    }

    fn deliver(&mut self, buffer: IterationBuffer, presenter: &mut dyn PresenterPort) {
        let frame = RgbaFrame {
            width: buffer.width(),
            height: buffer.height(),
            rgba: palette::render_rgba(&buffer),
        };
        presenter.present(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute::compute_area;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::thread;
    use std::time::Instant;

    const DT: Duration = Duration::from_millis(5); // 200 Hz

    /// Backend returning tiny fixed-size buffers, with a gate that keeps
    /// async tasks unfinished until released, and submission counters.
    struct GatedBackend {
        release: Arc<AtomicBool>,
        submissions: Arc<AtomicU32>,
        panic_async: bool,
    }

    impl GatedBackend {
        fn new() -> Self {
            Self {
                release: Arc::new(AtomicBool::new(false)),
                submissions: Arc::new(AtomicU32::new(0)),
                panic_async: false,
            }
        }

        fn panicking() -> Self {
            Self {
                panic_async: true,
                ..Self::new()
            }
        }
    }

    impl ComputeBackend for GatedBackend {
        fn compute_area(
            &self,
            viewport: Viewport,
            width: u32,
            height: u32,
            max_iterations: u32,
        ) -> IterationBuffer {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            compute_area(viewport, width, height, max_iterations)
        }

        fn compute_area_async(
            &self,
            viewport: Viewport,
            width: u32,
            height: u32,
            max_iterations: u32,
        ) -> Task<IterationBuffer> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            let release = Arc::clone(&self.release);
            let panic_async = self.panic_async;

            Task::spawn(move || {
                while !release.load(Ordering::Acquire) {
                    thread::sleep(Duration::from_millis(1));
                }
                if panic_async {
                    panic!("backend exploded");
                }
                compute_area(viewport, width, height, max_iterations)
            })
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        frames: Vec<RgbaFrame>,
    }

    impl PresenterPort for RecordingPresenter {
        fn present(&mut self, frame: RgbaFrame) {
            self.frames.push(frame);
        }
    }

    fn background_explorer() -> (Explorer, Arc<AtomicBool>, Arc<AtomicU32>) {
        let backend = GatedBackend::new();
        let release = Arc::clone(&backend.release);
        let submissions = Arc::clone(&backend.submissions);
        let explorer = Explorer::new(Box::new(backend), ExplorerConfig::default());
        (explorer, release, submissions)
    }

    fn no_events() -> Vec<ControlEvent> {
        Vec::new()
    }

    fn frame_until_schedule(
        explorer: &mut Explorer,
        presenter: &mut RecordingPresenter,
        wanted: ScheduleAction,
    ) -> FrameReport {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let report = explorer
                .frame(Duration::ZERO, (4, 4), &mut no_events, presenter)
                .unwrap();
            if report.schedule == wanted {
                return report;
            }
            assert!(Instant::now() < deadline, "never reached {:?}", wanted);
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn elapsed_time_converts_to_whole_fixed_steps() {
        let (mut explorer, _release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        let report = explorer
            .frame(3 * DT, (0, 0), &mut no_events, &mut presenter)
            .unwrap();

        assert_eq!(report.ticks_run, 3);
    }

    #[test]
    fn fractional_steps_roll_over_to_the_next_frame() {
        let (mut explorer, _release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        let first = explorer
            .frame(DT / 2, (0, 0), &mut no_events, &mut presenter)
            .unwrap();
        let second = explorer
            .frame(DT / 2, (0, 0), &mut no_events, &mut presenter)
            .unwrap();

        assert_eq!(first.ticks_run, 0);
        assert_eq!(second.ticks_run, 1);
    }

    #[test]
    fn runaway_elapsed_time_is_capped_and_dropped() {
        let (mut explorer, _release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();
        let cap = ExplorerConfig::default().tuning.max_ticks_per_frame;

        let report = explorer
            .frame(Duration::from_secs(10), (0, 0), &mut no_events, &mut presenter)
            .unwrap();
        let after = explorer
            .frame(Duration::ZERO, (0, 0), &mut no_events, &mut presenter)
            .unwrap();

        assert_eq!(report.ticks_run, cap);
        assert_eq!(after.ticks_run, 0, "excess backlog must be discarded");
    }

    #[test]
    fn quit_event_is_reported() {
        let (mut explorer, _release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();
        let mut sent = false;
        let mut events = || {
            if sent {
                Vec::new()
            } else {
                sent = true;
                vec![ControlEvent::Quit]
            }
        };

        let report = explorer.frame(DT, (0, 0), &mut events, &mut presenter).unwrap();

        assert!(report.quit_requested);
        assert!(explorer.quit_requested());
    }

    #[test]
    fn held_pan_key_moves_the_camera() {
        let (mut explorer, _release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();
        let mut sent = false;
        let mut events = || {
            if sent {
                Vec::new()
            } else {
                sent = true;
                vec![ControlEvent::KeyDown(Key::PanRight)]
            }
        };

        for _ in 0..10 {
            explorer.frame(DT, (0, 0), &mut events, &mut presenter).unwrap();
        }

        assert!(explorer.camera().x > 0.0);
        assert_eq!(explorer.camera().y, 0.0);
    }

    #[test]
    fn scroll_spikes_are_ignored() {
        let (mut explorer, _release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();
        let mut sent = false;
        let mut events = || {
            if sent {
                Vec::new()
            } else {
                sent = true;
                vec![ControlEvent::Scroll(120.0)]
            }
        };

        explorer.frame(DT, (0, 0), &mut events, &mut presenter).unwrap();

        assert_eq!(explorer.camera().zoom, CameraState::default().zoom);
    }

    #[test]
    fn scroll_zooms_the_camera() {
        let (mut explorer, _release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();
        let mut sent = false;
        let mut events = || {
            if sent {
                Vec::new()
            } else {
                sent = true;
                vec![ControlEvent::Scroll(3.0)]
            }
        };

        for _ in 0..10 {
            explorer.frame(DT, (0, 0), &mut events, &mut presenter).unwrap();
        }

        assert!(explorer.camera().zoom > CameraState::default().zoom);
    }

    #[test]
    fn first_frame_submits_a_computation() {
        let (mut explorer, _release, submissions) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        let report = explorer
            .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
            .unwrap();

        assert_eq!(report.schedule, ScheduleAction::Submitted);
        assert!(explorer.is_computing());
        assert_eq!(submissions.load(Ordering::SeqCst), 1);
        assert!(presenter.frames.is_empty());
    }

    #[test]
    fn recompute_requests_while_computing_are_dropped() {
        let (mut explorer, _release, submissions) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        explorer
            .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
            .unwrap();

        // Move the camera far while the task is gated: still no resubmit.
        let mut sent = false;
        let mut events = || {
            if sent {
                Vec::new()
            } else {
                sent = true;
                vec![ControlEvent::KeyDown(Key::PanLeft)]
            }
        };
        for _ in 0..20 {
            let report = explorer.frame(DT, (4, 4), &mut events, &mut presenter).unwrap();
            assert_eq!(report.schedule, ScheduleAction::StillComputing);
        }

        assert_eq!(submissions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completed_buffer_is_presented_exactly_once() {
        let (mut explorer, release, _) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        explorer
            .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
            .unwrap();
        release.store(true, Ordering::Release);

        let report = frame_until_schedule(&mut explorer, &mut presenter, ScheduleAction::Completed);

        assert!(report.presented);
        assert!(!explorer.is_computing());
        assert_eq!(presenter.frames.len(), 1);
        assert_eq!(presenter.frames[0].width, 4);
        assert_eq!(presenter.frames[0].height, 4);
        assert_eq!(presenter.frames[0].rgba.len(), 4 * 4 * 4);
        assert_eq!(explorer.frames_presented(), 1);
    }

    #[test]
    fn unchanged_view_idles_after_completion() {
        let (mut explorer, release, submissions) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        explorer
            .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
            .unwrap();
        release.store(true, Ordering::Release);
        frame_until_schedule(&mut explorer, &mut presenter, ScheduleAction::Completed);

        // Camera has not moved: the stale-skip keeps the pipeline idle.
        for _ in 0..5 {
            let report = explorer
                .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
                .unwrap();
            assert_eq!(report.schedule, ScheduleAction::Idle);
        }

        assert_eq!(submissions.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.frames.len(), 1);
    }

    #[test]
    fn camera_movement_after_completion_resubmits() {
        let (mut explorer, release, submissions) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        explorer
            .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
            .unwrap();
        release.store(true, Ordering::Release);
        frame_until_schedule(&mut explorer, &mut presenter, ScheduleAction::Completed);

        let mut sent = false;
        let mut events = || {
            if sent {
                Vec::new()
            } else {
                sent = true;
                vec![ControlEvent::KeyDown(Key::PanDown)]
            }
        };
        let report = frame_until_schedule_with_events(&mut explorer, &mut presenter, &mut events);

        assert_eq!(report.schedule, ScheduleAction::Submitted);
        assert_eq!(submissions.load(Ordering::SeqCst), 2);
    }

    fn frame_until_schedule_with_events(
        explorer: &mut Explorer,
        presenter: &mut RecordingPresenter,
        events: &mut dyn FnMut() -> Vec<ControlEvent>,
    ) -> FrameReport {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let report = explorer.frame(DT, (4, 4), events, presenter).unwrap();
            if report.schedule == ScheduleAction::Submitted {
                return report;
            }
            assert!(Instant::now() < deadline, "camera drift never resubmitted");
        }
    }

    #[test]
    fn worker_panic_is_fatal_at_the_next_poll() {
        let backend = GatedBackend::panicking();
        let release = Arc::clone(&backend.release);
        let mut explorer = Explorer::new(Box::new(backend), ExplorerConfig::default());
        let mut presenter = RecordingPresenter::default();

        explorer
            .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
            .unwrap();
        release.store(true, Ordering::Release);

        let deadline = Instant::now() + Duration::from_secs(5);
        let error = loop {
            match explorer.frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter) {
                Ok(_) => {
                    assert!(Instant::now() < deadline, "panic never surfaced");
                    thread::sleep(Duration::from_millis(1));
                }
                Err(error) => break error,
            }
        };

        assert_eq!(
            error,
            ExplorerError::ComputeFailed(TaskError::Panicked("backend exploded".into()))
        );
        assert!(!explorer.is_computing());
        assert!(presenter.frames.is_empty());
    }

    #[test]
    fn synchronous_mode_presents_every_frame() {
        let backend = GatedBackend::new();
        let submissions = Arc::clone(&backend.submissions);
        let config = ExplorerConfig {
            mode: ComputeMode::Synchronous,
            ..ExplorerConfig::default()
        };
        let mut explorer = Explorer::new(Box::new(backend), config);
        let mut presenter = RecordingPresenter::default();

        for _ in 0..3 {
            let report = explorer
                .frame(Duration::ZERO, (4, 4), &mut no_events, &mut presenter)
                .unwrap();
            assert_eq!(report.schedule, ScheduleAction::Completed);
            assert!(report.presented);
        }

        assert_eq!(submissions.load(Ordering::SeqCst), 3);
        assert_eq!(presenter.frames.len(), 3);
        assert_eq!(explorer.frames_presented(), 3);
    }

    #[test]
    fn zero_sized_client_area_skips_compute() {
        let (mut explorer, _release, submissions) = background_explorer();
        let mut presenter = RecordingPresenter::default();

        let report = explorer
            .frame(DT, (0, 0), &mut no_events, &mut presenter)
            .unwrap();

        assert_eq!(report.schedule, ScheduleAction::Idle);
        assert_eq!(submissions.load(Ordering::SeqCst), 0);
    }
}
