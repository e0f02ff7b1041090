pub mod camera;
pub mod complex;
pub mod iteration_buffer;
pub mod viewport;
