use web_sys::{
    WebGl2RenderingContext as GL, WebGlProgram, WebGlTexture, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use super::gl::{
    draw_quad, fullscreen_quad, link_program, row_texture, uniform, RenderTarget, RowFormat,
};
use super::render::Demo;
use crate::config::{DemoConfig, TextureFormat};
use crate::error::DemoError;
use crate::noise;
use crate::pack::{pack_red, pack_rgba};
use crate::shaders::{FEEDBACK_FS, FULLSCREEN_VS, PREV_FRAME_UNIT, PRESSURE_UNIT};
use crate::swap::TargetPair;

struct FeedbackUniforms {
    resolution: WebGlUniformLocation,
    time: WebGlUniformLocation,
    prev_frame: WebGlUniformLocation,
    pressure: WebGlUniformLocation,
}

/// Frame context for the noise/ping-pong demo. Everything the per-frame
/// update touches lives here.
pub struct FeedbackDemo {
    gl: GL,
    program: WebGlProgram,
    quad: WebGlVertexArrayObject,
    uniforms: FeedbackUniforms,
    pressure: WebGlTexture,
    targets: TargetPair<RenderTarget>,
    width: i32,
    height: i32,
}

impl FeedbackDemo {
    pub fn new(gl: GL, config: &DemoConfig, width: u32, height: u32) -> Result<Self, DemoError> {
        let program = link_program(&gl, FULLSCREEN_VS, FEEDBACK_FS)?;
        let quad = fullscreen_quad(&gl)?;
        let uniforms = FeedbackUniforms {
            resolution: uniform(&gl, &program, "uResolution")?,
            time: uniform(&gl, &program, "uTime")?,
            prev_frame: uniform(&gl, &program, "uPrevFrame")?,
            pressure: uniform(&gl, &program, "uPressure")?,
        };

        let pressure = noise_texture(&gl, config)?;

        // Sized once; the canvas is not resized while this demo runs.
        let (w, h) = (width.max(1) as i32, height.max(1) as i32);
        let targets = TargetPair::new(
            RenderTarget::new(&gl, w, h)?,
            RenderTarget::new(&gl, w, h)?,
        );
        log::info!("allocated ping-pong targets {w}x{h}");

        Ok(Self {
            gl,
            program,
            quad,
            uniforms,
            pressure,
            targets,
            width: w,
            height: h,
        })
    }
}

fn draw(
    gl: &GL,
    quad: &WebGlVertexArrayObject,
    uniforms: &FeedbackUniforms,
    (width, height): (i32, i32),
    elapsed: f32,
) {
    gl.uniform2f(Some(&uniforms.resolution), width as f32, height as f32);
    gl.uniform1f(Some(&uniforms.time), elapsed);
    draw_quad(gl, quad);
}

fn noise_texture(gl: &GL, config: &DemoConfig) -> Result<WebGlTexture, DemoError> {
    let width = config.noise_width.get();
    let step = config.noise_step;
    let mut rng = rand::thread_rng();
    match config.texture {
        TextureFormat::Rgba => {
            let [r, g, b] = noise::generate_rgb(width, step, &mut rng);
            row_texture(gl, RowFormat::Rgba8, &pack_rgba(&r, &g, &b))
        }
        TextureFormat::Red => {
            let row = noise::generate(width, step, &mut rng);
            row_texture(gl, RowFormat::R8, &pack_red(&row))
        }
    }
}

impl Demo for FeedbackDemo {
    fn frame(&mut self, elapsed: f32) -> Result<(), DemoError> {
        let Self {
            ref gl,
            ref program,
            ref quad,
            ref uniforms,
            ref pressure,
            ref mut targets,
            width,
            height,
        } = *self;
        let size = (width, height);

        gl.use_program(Some(program));
        gl.active_texture(GL::TEXTURE0 + PRESSURE_UNIT);
        gl.bind_texture(GL::TEXTURE_2D, Some(pressure));
        gl.uniform1i(Some(&uniforms.pressure), PRESSURE_UNIT as i32);
        gl.uniform1i(Some(&uniforms.prev_frame), PREV_FRAME_UNIT as i32);

        targets.frame(|prev, next| {
            gl.active_texture(GL::TEXTURE0 + PREV_FRAME_UNIT);
            gl.bind_texture(GL::TEXTURE_2D, Some(&prev.texture));

            next.bind(gl);
            draw(gl, quad, uniforms, size, elapsed);

            gl.bind_framebuffer(GL::FRAMEBUFFER, None);
            gl.viewport(0, 0, size.0, size.1);
            draw(gl, quad, uniforms, size, elapsed);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    use super::*;
    use crate::swap::PingPong;
    use crate::wasm::gl::tests::offscreen_gl;

    fn demo(texture: TextureFormat) -> (GL, FeedbackDemo) {
        let gl = offscreen_gl(32, 16);
        let config = DemoConfig {
            noise_width: NonZeroUsize::new(40).unwrap(),
            noise_step: NonZeroUsize::new(8).unwrap(),
            texture,
            ..DemoConfig::default()
        };
        let demo = FeedbackDemo::new(gl.clone(), &config, 32, 16).unwrap();
        assert_eq!(gl.get_error(), GL::NO_ERROR);
        (gl, demo)
    }

    fn bound_prev_frame(gl: &GL) -> JsValue {
        gl.active_texture(GL::TEXTURE0 + PREV_FRAME_UNIT);
        gl.get_parameter(GL::TEXTURE_BINDING_2D).unwrap()
    }

    #[wasm_bindgen_test]
    fn frames_alternate_targets_without_gl_errors() {
        let (gl, mut demo) = demo(TextureFormat::Rgba);
        assert_eq!(demo.targets.state(), PingPong::ReadyA);

        let first_a = JsValue::from(demo.targets.current().texture.clone());
        demo.frame(0.0).unwrap();
        // INVALID_OPERATION here would mean the sampled texture was also the
        // framebuffer attachment.
        assert_eq!(gl.get_error(), GL::NO_ERROR);
        assert_eq!(demo.targets.state(), PingPong::ReadyB);
        assert_eq!(bound_prev_frame(&gl), first_a);

        let first_b = JsValue::from(demo.targets.current().texture.clone());
        demo.frame(0.016).unwrap();
        assert_eq!(gl.get_error(), GL::NO_ERROR);
        assert_eq!(demo.targets.state(), PingPong::ReadyA);
        assert_eq!(demo.targets.frames(), 2);
        assert_eq!(bound_prev_frame(&gl), first_b);
    }

    #[wasm_bindgen_test]
    fn sampled_texture_is_not_the_written_one() {
        let (gl, mut demo) = demo(TextureFormat::Rgba);
        for i in 0..3 {
            demo.frame(i as f32 * 0.016).unwrap();
            // The target just written is now current; the one sampled during
            // the frame must be the other.
            let written = JsValue::from(demo.targets.current().texture.clone());
            assert_ne!(bound_prev_frame(&gl), written);
        }
    }

    #[wasm_bindgen_test]
    fn frame_ends_on_the_display_surface() {
        let (gl, mut demo) = demo(TextureFormat::Red);
        demo.frame(0.0).unwrap();
        assert!(gl.get_parameter(GL::FRAMEBUFFER_BINDING).unwrap().is_null());
        assert_eq!(gl.get_error(), GL::NO_ERROR);
    }
}
