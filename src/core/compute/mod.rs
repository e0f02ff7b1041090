pub mod area;
pub mod area_async;
pub mod backend;
pub mod rayon_backend;

pub use area::compute_area;
pub use area_async::compute_area_async;
pub use backend::{ComputeBackend, CpuBackend};
pub use rayon_backend::RayonBackend;
