//! winit glue: maps platform events onto the loop's event alphabet and
//! drives one [`Explorer::frame`] per `AboutToWait`.

use crate::controllers::interactive::events::{ControlEvent, Key};
use crate::controllers::interactive::explorer::{Explorer, ExplorerError};
use crate::presenters::pixels::PixelsPresenter;
use log::error;
use std::time::{Duration, Instant};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const WINDOW_TITLE: &str = "Mandelbrot Set";

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Key::PanLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Key::PanRight),
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Key::PanUp),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Key::PanDown),
        _ => None,
    }
}

/// Opens the window and runs the explorer until quit.
///
/// Does not return while the window lives; collaborator initialisation
/// failures and compute failures both surface as the returned error.
pub fn run_gui(mut explorer: Explorer) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;

    // Leak the window to get a 'static reference for pixels
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1280.0, 720.0))
            .with_min_inner_size(LogicalSize::new(200.0, 200.0))
            .build(&event_loop)?,
    ));

    let mut presenter = PixelsPresenter::new(window)?;
    let mut queued: Vec<ControlEvent> = Vec::new();
    let mut last_frame = Instant::now();
    let mut fps_window = Instant::now();
    let mut fps_base: u64 = 0;
    let mut fatal: Option<ExplorerError> = None;

    event_loop.run(|event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    queued.push(ControlEvent::Quit);
                }
                WindowEvent::Resized(size) => {
                    presenter.resize_surface(size.width, size.height);
                    queued.push(ControlEvent::Resize {
                        width: size.width,
                        height: size.height,
                    });
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.repeat {
                        return;
                    }
                    if let PhysicalKey::Code(code) = key_event.physical_key {
                        if code == KeyCode::Escape && key_event.state == ElementState::Pressed {
                            queued.push(ControlEvent::Quit);
                        } else if let Some(key) = map_key(code) {
                            queued.push(match key_event.state {
                                ElementState::Pressed => ControlEvent::KeyDown(key),
                                ElementState::Released => ControlEvent::KeyUp(key),
                            });
                        }
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(position) => (position.y / 20.0) as f32,
                    };
                    queued.push(ControlEvent::Scroll(lines));
                }
                WindowEvent::RedrawRequested => {
                    if let Err(e) = presenter.blit() {
                        error!("present failed: {e}");
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                let elapsed = now - last_frame;
                last_frame = now;

                let size = window.inner_size();
                let mut pump = || std::mem::take(&mut queued);

                match explorer.frame(elapsed, (size.width, size.height), &mut pump, &mut presenter)
                {
                    Ok(report) => {
                        if report.quit_requested {
                            elwt.exit();
                            return;
                        }
                        if fps_window.elapsed() >= Duration::from_secs(1) {
                            let fps = explorer.frames_presented() - fps_base;
                            fps_base = explorer.frames_presented();
                            fps_window = now;
                            window.set_title(&format!("{} - {}fps", WINDOW_TITLE, fps));
                        }
                        window.request_redraw();
                    }
                    Err(e) => {
                        fatal = Some(e);
                        elwt.exit();
                    }
                }
            }
            _ => {}
        }
    })?;

    match fatal {
        Some(e) => Err(Box::new(e)),
        None => Ok(()),
    }
}
