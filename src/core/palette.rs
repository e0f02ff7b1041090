//! Fixed cyclic palette mapping iteration counts to colours.

use crate::core::data::iteration_buffer::IterationBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The classic 16-step Mandelbrot gradient, indexed by `iterations % 16`.
pub const PALETTE: [Rgb; 16] = [
    Rgb { r: 0, g: 0, b: 0 },
    Rgb { r: 25, g: 7, b: 26 },
    Rgb { r: 9, g: 1, b: 47 },
    Rgb { r: 4, g: 4, b: 73 },
    Rgb { r: 0, g: 7, b: 100 },
    Rgb { r: 12, g: 44, b: 138 },
    Rgb { r: 24, g: 82, b: 177 },
    Rgb {
        r: 57,
        g: 125,
        b: 209,
    },
    Rgb {
        r: 134,
        g: 181,
        b: 229,
    },
    Rgb {
        r: 211,
        g: 236,
        b: 248,
    },
    Rgb {
        r: 241,
        g: 233,
        b: 191,
    },
    Rgb {
        r: 248,
        g: 201,
        b: 95,
    },
    Rgb {
        r: 255,
        g: 170,
        b: 0,
    },
    Rgb {
        r: 204,
        g: 128,
        b: 0,
    },
    Rgb { r: 153, g: 87, b: 0 },
    Rgb { r: 106, g: 52, b: 3 },
];

#[must_use]
pub fn colour_for(iterations: u32) -> Rgb {
    PALETTE[(iterations % 16) as usize]
}

/// Expands an iteration buffer into a row-major RGBA8 pixel buffer with
/// opaque alpha.
#[must_use]
pub fn render_rgba(buffer: &IterationBuffer) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(buffer.counts().len() * 4);

    for &count in buffer.counts() {
        let colour = colour_for(count);
        rgba.push(colour.r);
        rgba.push(colour.g);
        rgba.push(colour.b);
        rgba.push(0xFF);
    }

    rgba
}
