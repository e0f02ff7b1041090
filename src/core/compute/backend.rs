//! The uniform compute contract the control loop programs against.

use crate::core::compute::area::compute_area;
use crate::core::compute::area_async::compute_area_async;
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::viewport::Viewport;
use crate::core::task::Task;

/// A concrete escape-time compute strategy.
///
/// Flat dispatch: one implementation per backend, chosen at startup; the
/// control loop never knows which one is installed.
pub trait ComputeBackend: Send + Sync {
    fn compute_area(
        &self,
        viewport: Viewport,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> IterationBuffer;

    fn compute_area_async(
        &self,
        viewport: Viewport,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> Task<IterationBuffer>;
}

/// CPU backend decomposing work into row-band subtasks.
///
/// `workers = 1` degenerates into the single-thread strategy.
#[derive(Debug, Clone, Copy)]
pub struct CpuBackend {
    workers: u32,
}

impl CpuBackend {
    /// Sizes the band count to hardware concurrency.
    #[must_use]
    pub fn new() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1) as u32;

        Self { workers }
    }

    #[must_use]
    pub fn with_workers(workers: u32) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    #[must_use]
    pub fn workers(&self) -> u32 {
        self.workers
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for CpuBackend {
    fn compute_area(
        &self,
        viewport: Viewport,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> IterationBuffer {
        compute_area(viewport, width, height, max_iterations)
    }

    fn compute_area_async(
        &self,
        viewport: Viewport,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> Task<IterationBuffer> {
        compute_area_async(viewport, width, height, max_iterations, self.workers)
    }
}
