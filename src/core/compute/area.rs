//! Sequential evaluation of the escape evaluator over a pixel grid.

use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::viewport::Viewport;
use crate::core::escape::escape_iterations;
use std::ops::Range;

/// Samples the evaluator at `width × height` grid points over `viewport`,
/// row-major, top row first.
///
/// Sample spacing is `dx = viewport.width() / width` per column and
/// `dy = viewport.height() / height` per row; entry `(r, c)` is the escape
/// count at `(x_min + c·dx, y_min + r·dy)`.
#[must_use]
pub fn compute_area(
    viewport: Viewport,
    width: u32,
    height: u32,
    max_iterations: u32,
) -> IterationBuffer {
    let counts = compute_rows(viewport, width, height, 0..height, max_iterations);

    IterationBuffer::new(width, height, counts).expect("row sweep covers every pixel exactly once")
}

/// Evaluates the contiguous row band `rows` of the same grid.
///
/// Rows are indexed against the full `height`-row grid so that
/// concatenating bands in row order reproduces `compute_area` bit for bit.
#[must_use]
pub fn compute_rows(
    viewport: Viewport,
    width: u32,
    height: u32,
    rows: Range<u32>,
    max_iterations: u32,
) -> Vec<u32> {
    let dx = viewport.width() / width as f32;
    let dy = viewport.height() / height as f32;

    let mut counts = Vec::with_capacity(rows.len() * width as usize);
    for row in rows {
        let y = viewport.y_min() + row as f32 * dy;
        for col in 0..width {
            let x = viewport.x_min() + col as f32 * dx;
            counts.push(escape_iterations(x, y, max_iterations));
        }
    }

    counts
}
