use fractal_pilot::{
    ComputeBackend, ComputeMode, CpuBackend, Explorer, ExplorerConfig, RayonBackend,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let backend: Box<dyn ComputeBackend> = if args.iter().any(|arg| arg == "--rayon") {
        Box::new(RayonBackend::new())
    } else {
        Box::new(CpuBackend::new())
    };

    let config = ExplorerConfig {
        mode: if args.iter().any(|arg| arg == "--sync") {
            ComputeMode::Synchronous
        } else {
            ComputeMode::Background
        },
        ..ExplorerConfig::default()
    };

    fractal_pilot::run_gui(Explorer::new(backend, config))
}
