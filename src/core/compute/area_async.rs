//! Parallel row-band decomposition of [`compute_area`].
//!
//! The fan-out/fan-in lives entirely inside an outer [`Task`]: the control
//! thread only ever polls the outer handle, while the blocking waits on
//! the per-band subtasks happen on the outer worker thread.

use crate::core::compute::area::{compute_area, compute_rows};
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::viewport::Viewport;
use crate::core::task::Task;

/// Computes the same grid as [`compute_area`] across `workers` contiguous
/// row bands, one subtask per band.
///
/// `rows_per_band = height / workers`; the last band absorbs the
/// remainder. Bands are merged in band order, so the output is identical
/// to the sequential sweep regardless of completion order. `workers` is
/// clamped to `[1, height]`.
#[must_use]
pub fn compute_area_async(
    viewport: Viewport,
    width: u32,
    height: u32,
    max_iterations: u32,
    workers: u32,
) -> Task<IterationBuffer> {
    Task::spawn(move || {
        if height == 0 {
            return compute_area(viewport, width, height, max_iterations);
        }

        let workers = workers.clamp(1, height);
        let rows_per_band = height / workers;

        let band_tasks: Vec<Task<Vec<u32>>> = (0..workers)
            .map(|band| {
                let start_row = band * rows_per_band;
                let end_row = if band == workers - 1 {
                    height
                } else {
                    start_row + rows_per_band
                };

                Task::spawn(move || {
                    compute_rows(viewport, width, height, start_row..end_row, max_iterations)
                })
            })
            .collect();

        let mut counts = Vec::with_capacity((width as usize) * (height as usize));
        for band_task in band_tasks {
            let band = band_task
                .wait()
                .expect("band worker panicked during fractal computation");
            counts.extend(band);
        }

        IterationBuffer::new(width, height, counts)
            .expect("merged bands cover every pixel exactly once")
    })
}
