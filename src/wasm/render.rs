use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use super::feedback_demo::FeedbackDemo;
use super::grid_demo::GridDemo;
use crate::config::{DemoConfig, DemoKind};
use crate::error::DemoError;

/// One of the two independent pipelines driven by the frame loop.
pub trait Demo {
    /// Render one frame; `elapsed` is seconds since start-up.
    fn frame(&mut self, elapsed: f32) -> Result<(), DemoError>;
}

fn window_size(win: &Window) -> Result<(u32, u32), DemoError> {
    let w = win
        .inner_width()?
        .as_f64()
        .ok_or(DemoError::Missing("window width"))?;
    let h = win
        .inner_height()?
        .as_f64()
        .ok_or(DemoError::Missing("window height"))?;
    Ok((w as u32, h as u32))
}

/// Keep the canvas and the grid uniforms at window size.
fn follow_window_size(
    win: &Window,
    canvas: &HtmlCanvasElement,
    demo: Rc<RefCell<GridDemo>>,
) -> Result<(), JsValue> {
    let resize_closure = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            let Some(size) = window().and_then(|w| window_size(&w).ok()) else {
                log::warn!("could not read window size on resize");
                return;
            };
            canvas.set_width(size.0);
            canvas.set_height(size.1);
            demo.borrow_mut().resize(size.0, size.1);
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();
    Ok(())
}

/// Set up the configured demo on `canvas` and start the animation loop.
pub fn start(canvas: HtmlCanvasElement, config: DemoConfig) -> Result<(), JsValue> {
    let win = window().ok_or(DemoError::Missing("window"))?;
    let (width, height) = window_size(&win)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or(DemoError::NoWebGl2)?
        .dyn_into()?;

    // Only the grid demo follows the window; the feedback targets keep
    // their start-up size.
    let demo: Rc<RefCell<dyn Demo>> = match config.demo {
        DemoKind::Grid => {
            let grid = Rc::new(RefCell::new(GridDemo::new(gl, &config, width, height)?));
            follow_window_size(&win, &canvas, grid.clone())?;
            grid
        }
        DemoKind::Feedback => {
            Rc::new(RefCell::new(FeedbackDemo::new(gl, &config, width, height)?))
        }
    };

    let performance = win.performance().ok_or(DemoError::Missing("performance"))?;
    let started = performance.now();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let elapsed = ((performance.now() - started) / 1000.0) as f32;
        if let Err(err) = demo.borrow_mut().frame(elapsed) {
            log::error!("frame failed, stopping: {err}");
            return;
        }

        // schedule next
        let scheduled = window().map(|w| {
            f.borrow()
                .as_ref()
                .map(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()))
        });
        if !matches!(scheduled, Some(Some(Ok(_)))) {
            log::error!("could not schedule next animation frame");
        }
    }) as Box<dyn FnMut()>));

    win.request_animation_frame(
        g.borrow()
            .as_ref()
            .ok_or(DemoError::Missing("frame callback"))?
            .as_ref()
            .unchecked_ref(),
    )?;

    log::info!("render loop running at {width}x{height}");
    Ok(())
}
