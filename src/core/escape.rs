//! The escape-time evaluator at the bottom of everything else.

use crate::core::data::complex::Complex;

pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Iterates `z ← z² + c` from `z = 0` with `c = x + iy`, counting
/// iterations until `|z|² > 4.0` or the budget runs out.
///
/// Returns the iteration index at divergence, or `max_iterations` when the
/// point stayed bounded (treated as inside the set). Pure and
/// deterministic; worst case O(`max_iterations`).
#[must_use]
pub fn escape_iterations(x: f32, y: f32, max_iterations: u32) -> u32 {
    let c = Complex { real: x, imag: y };
    let mut z = Complex::default();

    for iteration in 0..max_iterations {
        z = z * z + c;
        if z.magnitude_squared() > 4.0 {
            return iteration;
        }
    }

    max_iterations
}
