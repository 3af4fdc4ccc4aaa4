//! 1D value noise with quintic interpolation between random grid samples.

use std::num::NonZeroUsize;

use rand::Rng;

/// Quintic ease curve `6t^5 - 15t^4 + 10t^3`.
///
/// First and second derivatives vanish at both ends, so neighbouring grid
/// intervals join without a visible crease.
pub fn quintic(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Number of grid points needed to cover `width` columns at `step` spacing.
pub fn grid_len(width: usize, step: NonZeroUsize) -> usize {
    width / step.get() + 1
}

/// One uniform sample in `[0, 1)` per grid point.
pub fn grid_values<R: Rng + ?Sized>(width: usize, step: NonZeroUsize, rng: &mut R) -> Vec<f32> {
    (0..grid_len(width, step)).map(|_| rng.gen::<f32>()).collect()
}

/// Interpolate `grid` into `width` columns.
///
/// Column `x` sits in interval `x / step` at offset `(x % step) / step`. The
/// last grid point has no right neighbour, so columns past it repeat its value.
///
/// # Panics
///
/// If `grid` holds fewer than [`grid_len`]`(width, step)` values.
pub fn smooth(grid: &[f32], width: usize, step: NonZeroUsize) -> Vec<f32> {
    let step = step.get();
    (0..width)
        .map(|x| {
            let cell = x / step;
            let left = grid[cell];
            match grid.get(cell + 1) {
                Some(&right) => {
                    let t = (x % step) as f32 / step as f32;
                    left + (right - left) * quintic(t)
                }
                None => left,
            }
        })
        .collect()
}

/// Fresh noise row of `width` columns.
pub fn generate<R: Rng + ?Sized>(width: usize, step: NonZeroUsize, rng: &mut R) -> Vec<f32> {
    let grid = grid_values(width, step, rng);
    smooth(&grid, width, step)
}

/// Three independent channels drawn sequentially from the same generator.
pub fn generate_rgb<R: Rng + ?Sized>(
    width: usize,
    step: NonZeroUsize,
    rng: &mut R,
) -> [Vec<f32>; 3] {
    [
        generate(width, step, rng),
        generate(width, step, rng),
        generate(width, step, rng),
    ]
}
