use crate::defaults::SOFTENING;
use crate::initialization::ComponentsRef;
use itertools::izip;

/// Sum of `(p_j - p_i) / (|p_j - p_i|^2 + eps)^(3/2)` over every particle j,
/// the particle itself included. The self term has a zero numerator, so the
/// diagonal needs no branch.
///
/// The power is taken in double precision and narrowed, the result is
/// therefore reproducible across the serial and parallel integrators.
#[inline]
pub fn accumulate_force(positions: &ComponentsRef<'_>, i: usize) -> [f32; 3] {
    let xi: f32 = positions.x[i];
    let yi: f32 = positions.y[i];
    let zi: f32 = positions.z[i];

    let mut fx: f32 = 0.0;
    let mut fy: f32 = 0.0;
    let mut fz: f32 = 0.0;

    for (&xj, &yj, &zj) in izip!(positions.x, positions.y, positions.z) {
        let dx: f32 = xj - xi;
        let dy: f32 = yj - yi;
        let dz: f32 = zj - zi;
        let d_2: f32 = (dx * dx) + (dy * dy) + (dz * dz) + SOFTENING;
        let d_3_over_2: f32 = f64::from(d_2).powf(1.5) as f32;

        fx += dx / d_3_over_2;
        fy += dy / d_3_over_2;
        fz += dz / d_3_over_2;
    }

    [fx, fy, fz]
}
