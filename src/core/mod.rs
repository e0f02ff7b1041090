pub mod compute;
pub mod data;
pub mod escape;
pub mod palette;
pub mod task;
