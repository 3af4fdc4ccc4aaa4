//! Uniform state for the hashed-grid demo.
//!
//! [`GridUniforms::shade`], [`cell_hash`], [`rgb_to_hsv`] and [`height`] mirror
//! `GRID_FS` on the CPU. Nothing on the render path calls them; they exist so
//! tests can check the shading math without a GPU.

use crate::config::DemoConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct GridUniforms {
    pub resolution: [f32; 2],
    pub light_direction: [f32; 3],
    pub cells: [f32; 2],
}

impl GridUniforms {
    pub fn new(config: &DemoConfig, width: u32, height: u32) -> Self {
        Self {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            light_direction: config.light_direction,
            cells: config.grid_cells.map(|n| n.get() as f32),
        }
    }

    /// Returns true when the resolution actually changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let next = [width.max(1) as f32, height.max(1) as f32];
        if next == self.resolution {
            return false;
        }
        self.resolution = next;
        true
    }

    /// Color the shader writes at pixel `frag` (window coordinates).
    pub fn shade(&self, frag: [f32; 2]) -> [f32; 3] {
        let uv = [frag[0] / self.resolution[0], frag[1] / self.resolution[1]];
        let cell = cell_origin(uv, self.cells);
        let c = cell_hash(cell);
        let color = [c, c, c];
        let h = height(color);

        let n = normalize([
            h * self.light_direction[0],
            h * self.light_direction[1],
            1.0 + h * self.light_direction[2],
        ]);
        let l = normalize(self.light_direction);
        let intensity = dot(n, l).max(0.0);
        color.map(|v| v * intensity)
    }
}

/// Lower-left corner of the cell containing `uv`, in uv units.
pub fn cell_origin(uv: [f32; 2], cells: [f32; 2]) -> [f32; 2] {
    [
        (uv[0] * cells[0]).floor() / cells[0],
        (uv[1] * cells[1]).floor() / cells[1],
    ]
}

/// `fract(sin(dot(p, (12.9898, 78.233))) * 43758.5453)`.
pub fn cell_hash(p: [f32; 2]) -> f32 {
    let s = (p[0] * 12.9898 + p[1] * 78.233).sin() * 43_758.547;
    s - s.floor()
}

pub fn rgb_to_hsv([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g.max(b));
    let min = r.min(g.min(b));
    let delta = max - min;

    let mut h = 0.0;
    if delta > 0.0 {
        h = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        h /= 6.0;
    }
    let s = if max == 0.0 { 0.0 } else { delta / max };
    [h, s, max]
}

/// Pseudo height: hue plus saturation.
pub fn height(color: [f32; 3]) -> f32 {
    let [h, s, _] = rgb_to_hsv(color);
    h + s
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len == 0.0 {
        return v;
    }
    v.map(|c| c / len)
}
