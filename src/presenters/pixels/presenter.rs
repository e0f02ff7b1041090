//! Presentation collaborator backed by the `pixels` framebuffer.

use crate::controllers::interactive::ports::{PresenterPort, RgbaFrame};
use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    buffer_width: u32,
    buffer_height: u32,
    surface_width: u32,
    surface_height: u32,
    has_frame: bool,
}

impl PixelsPresenter {
    pub fn new(window: &'static Window) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        Ok(Self {
            pixels,
            buffer_width: size.width,
            buffer_height: size.height,
            surface_width: size.width,
            surface_height: size.height,
            has_frame: false,
        })
    }

    /// Tracks the window surface; the pixel buffer keeps the dimensions of
    /// the last computed frame and is scaled to fit.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_width = width;
        self.surface_height = height;
        self.pixels
            .resize_surface(width, height)
            .expect("Failed to resize surface");
    }

    /// Draws the current frame to the window.
    pub fn blit(&mut self) -> Result<(), pixels::Error> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Ok(());
        }

        if !self.has_frame {
            self.draw_placeholder();
        }

        self.pixels.render()
    }

    // Flat dark fill shown until the first computation lands.
    fn draw_placeholder(&mut self) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&[12, 12, 24, 0xFF]);
        }
    }
}

impl PresenterPort for PixelsPresenter {
    fn present(&mut self, frame: RgbaFrame) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }

        if frame.width != self.buffer_width || frame.height != self.buffer_height {
            self.pixels
                .resize_buffer(frame.width, frame.height)
                .expect("Failed to resize buffer");
            self.buffer_width = frame.width;
            self.buffer_height = frame.height;
        }

        self.pixels.frame_mut().copy_from_slice(&frame.rgba);
        self.has_frame = true;
    }
}
