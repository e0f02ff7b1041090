//! Work-stealing CPU backend built on rayon.
//!
//! Rows are computed by rayon's scheduler instead of fixed bands, which
//! balances better when part of the view is deep inside the set. The
//! asynchronous form wraps the whole sweep in a single [`Task`] so the
//! control loop sees the same non-blocking contract as the band backend.

use crate::core::compute::backend::ComputeBackend;
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::viewport::Viewport;
use crate::core::escape::escape_iterations;
use crate::core::task::Task;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct RayonBackend;

impl RayonBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for RayonBackend {
    fn compute_area(
        &self,
        viewport: Viewport,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> IterationBuffer {
        let dx = viewport.width() / width as f32;
        let dy = viewport.height() / height as f32;

        let counts: Vec<u32> = (0..height)
            .into_par_iter()
            .flat_map_iter(|row| {
                let y = viewport.y_min() + row as f32 * dy;
                (0..width).map(move |col| {
                    let x = viewport.x_min() + col as f32 * dx;
                    escape_iterations(x, y, max_iterations)
                })
            })
            .collect();

        IterationBuffer::new(width, height, counts)
            .expect("row sweep covers every pixel exactly once")
    }

    fn compute_area_async(
        &self,
        viewport: Viewport,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> Task<IterationBuffer> {
        let backend = *self;
        Task::spawn(move || backend.compute_area(viewport, width, height, max_iterations))
    }
}
