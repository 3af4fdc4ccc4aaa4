//! Start-up settings read from the page query string, e.g.
//! `?demo=grid&cells=16&light=1,0.5,1` or `?demo=feedback&width=512&step=32&texture=red`.

use std::num::NonZeroUsize;

use log::LevelFilter;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    /// Static hashed-grid shader.
    Grid,
    /// Noise texture with ping-pong feedback.
    Feedback,
}

/// Upload layout of the noise texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba,
    Red,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub canvas_id: String,
    pub demo: DemoKind,
    pub noise_width: NonZeroUsize,
    pub noise_step: NonZeroUsize,
    pub texture: TextureFormat,
    pub grid_cells: [NonZeroUsize; 2],
    pub light_direction: [f32; 3],
    pub log_level: LevelFilter,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas_id: "c".to_string(),
            demo: DemoKind::Feedback,
            noise_width: nz(256),
            noise_step: nz(16),
            texture: TextureFormat::Rgba,
            grid_cells: [nz(10), nz(10)],
            light_direction: [1.0, 1.0, 1.0],
            log_level: LevelFilter::Info,
        }
    }
}

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}

impl DemoConfig {
    /// Build from a key lookup; absent keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("demo") {
            cfg.demo = parse_demo(&v)?;
        }
        if let Some(v) = lookup("width") {
            cfg.noise_width = parse_positive("width", &v)?;
        }
        if let Some(v) = lookup("step") {
            cfg.noise_step = parse_positive("step", &v)?;
        }
        if let Some(v) = lookup("texture") {
            cfg.texture = parse_texture(&v)?;
        }
        if let Some(v) = lookup("cells") {
            cfg.grid_cells = parse_cells(&v)?;
        }
        if let Some(v) = lookup("light") {
            cfg.light_direction = parse_light(&v)?;
        }
        if let Some(v) = lookup("log") {
            cfg.log_level = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::LogLevel(v.clone()))?;
        }
        Ok(cfg)
    }
}

fn parse_demo(raw: &str) -> Result<DemoKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "grid" | "static" => Ok(DemoKind::Grid),
        "feedback" | "noise" | "pingpong" => Ok(DemoKind::Feedback),
        _ => Err(ConfigError::UnknownDemo(raw.to_string())),
    }
}

fn parse_texture(raw: &str) -> Result<TextureFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "rgba" => Ok(TextureFormat::Rgba),
        "red" | "r8" | "gray" | "grey" => Ok(TextureFormat::Red),
        _ => Err(ConfigError::UnknownTexture(raw.to_string())),
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<NonZeroUsize, ConfigError> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| ConfigError::NotPositive {
            key,
            value: raw.to_string(),
        })
}

/// `N` for a square grid or `NxM`.
fn parse_cells(raw: &str) -> Result<[NonZeroUsize; 2], ConfigError> {
    match raw.split_once(['x', 'X']) {
        Some((n, m)) => Ok([parse_positive("cells", n)?, parse_positive("cells", m)?]),
        None => {
            let n = parse_positive("cells", raw)?;
            Ok([n, n])
        }
    }
}

fn parse_light(raw: &str) -> Result<[f32; 3], ConfigError> {
    let parts: Vec<f32> = raw
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|_| ConfigError::Light(raw.to_string()))?;
    match parts.as_slice() {
        &[x, y, z] if parts.iter().all(|c| c.is_finite()) && (x, y, z) != (0.0, 0.0, 0.0) => {
            Ok([x, y, z])
        }
        _ => Err(ConfigError::Light(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> Result<DemoConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DemoConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_query_gives_defaults() {
        assert_eq!(cfg(&[]).unwrap(), DemoConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let c = cfg(&[
            ("demo", "grid"),
            ("width", "64"),
            ("step", "8"),
            ("texture", "red"),
            ("cells", "4x6"),
            ("light", "0, 1, 0.5"),
            ("log", "debug"),
        ])
        .unwrap();
        assert_eq!(c.demo, DemoKind::Grid);
        assert_eq!(c.noise_width.get(), 64);
        assert_eq!(c.noise_step.get(), 8);
        assert_eq!(c.texture, TextureFormat::Red);
        assert_eq!(c.grid_cells.map(NonZeroUsize::get), [4, 6]);
        assert_eq!(c.light_direction, [0.0, 1.0, 0.5]);
        assert_eq!(c.log_level, LevelFilter::Debug);
    }

    #[test]
    fn square_cells_shorthand() {
        let c = cfg(&[("cells", "12")]).unwrap();
        assert_eq!(c.grid_cells.map(NonZeroUsize::get), [12, 12]);
    }

    #[test]
    fn rejects_zero_step() {
        assert!(matches!(
            cfg(&[("step", "0")]),
            Err(ConfigError::NotPositive { key: "step", .. })
        ));
    }

    #[test]
    fn rejects_bad_light() {
        assert!(matches!(cfg(&[("light", "1,2")]), Err(ConfigError::Light(_))));
        assert!(matches!(cfg(&[("light", "0,0,0")]), Err(ConfigError::Light(_))));
        assert!(matches!(cfg(&[("light", "a,b,c")]), Err(ConfigError::Light(_))));
    }

    #[test]
    fn rejects_unknown_demo() {
        assert!(matches!(cfg(&[("demo", "cube")]), Err(ConfigError::UnknownDemo(_))));
    }
}
