#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod config;
pub mod error;
pub mod grid;
pub mod noise;
pub mod pack;
pub mod shaders;
pub mod swap;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::DemoConfig;

    mod feedback_demo;
    mod gl;
    mod grid_demo;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("no window")?;
        let (config, config_err) = read_config(&window);
        console_log::init_with_level(config.log_level.to_level().unwrap_or(log::Level::Error))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::set_max_level(config.log_level);
        if let Some(err) = config_err {
            log::warn!("{err}; falling back to defaults");
        }
        log::info!("starting {:?} demo", config.demo);

        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        render::start(canvas, config)?;
        Ok(())
    }

    fn read_config(window: &web_sys::Window) -> (DemoConfig, Option<String>) {
        let params = window
            .location()
            .search()
            .and_then(|s| web_sys::UrlSearchParams::new_with_str(&s));
        let params = match params {
            Ok(p) => p,
            Err(e) => return (DemoConfig::default(), Some(format!("{e:?}"))),
        };
        match DemoConfig::from_lookup(|key| params.get(key)) {
            Ok(cfg) => (cfg, None),
            Err(e) => (DemoConfig::default(), Some(e.to_string())),
        }
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
