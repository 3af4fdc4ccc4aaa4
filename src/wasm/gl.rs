use js_sys::Float32Array;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlFramebuffer, WebGlProgram, WebGlShader, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::DemoError;

/// Two triangles covering clip space.
const QUAD: [f32; 12] = [
    -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, //
    -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
];

pub fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, DemoError> {
    let shader = gl.create_shader(kind).ok_or(DemoError::Alloc("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        gl.delete_shader(Some(&shader));
        Err(DemoError::Compile(info))
    }
}

pub fn link_program(
    gl: &GL,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<WebGlProgram, DemoError> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl.create_program().ok_or(DemoError::Alloc("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    gl.detach_shader(&program, &vs);
    gl.detach_shader(&program, &fs);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        Err(DemoError::Link(info))
    }
}

pub fn uniform(
    gl: &GL,
    program: &WebGlProgram,
    name: &'static str,
) -> Result<WebGlUniformLocation, DemoError> {
    gl.get_uniform_location(program, name).ok_or(DemoError::Uniform(name))
}

/// VAO holding the full-screen quad at attribute location 0.
pub fn fullscreen_quad(gl: &GL) -> Result<WebGlVertexArrayObject, DemoError> {
    let vao = gl
        .create_vertex_array()
        .ok_or(DemoError::Alloc("vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let buffer = gl.create_buffer().ok_or(DemoError::Alloc("vertex buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let verts = Float32Array::from(&QUAD[..]);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &verts, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 2, GL::FLOAT, false, 0, 0);

    gl.bind_vertex_array(None);
    Ok(vao)
}

pub fn draw_quad(gl: &GL, vao: &WebGlVertexArrayObject) {
    gl.bind_vertex_array(Some(vao));
    gl.draw_arrays(GL::TRIANGLES, 0, (QUAD.len() / 2) as i32);
    gl.bind_vertex_array(None);
}

fn set_sampling(gl: &GL, filter: u32) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, filter as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, filter as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}

/// Byte layout of a one-row texture upload.
#[derive(Debug, Clone, Copy)]
pub enum RowFormat {
    Rgba8,
    R8,
}

impl RowFormat {
    fn gl_formats(self) -> (u32, u32) {
        match self {
            RowFormat::Rgba8 => (GL::RGBA8, GL::RGBA),
            RowFormat::R8 => (GL::R8, GL::RED),
        }
    }

    fn bytes_per_texel(self) -> usize {
        match self {
            RowFormat::Rgba8 => 4,
            RowFormat::R8 => 1,
        }
    }
}

/// Upload `data` as a 1-pixel-high texture. The texture is never written again.
pub fn row_texture(gl: &GL, format: RowFormat, data: &[u8]) -> Result<WebGlTexture, DemoError> {
    let width = (data.len() / format.bytes_per_texel()) as i32;
    let (internal, layout) = format.gl_formats();

    let texture = gl.create_texture().ok_or(DemoError::Alloc("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    // R8 rows are not 4-byte aligned in general.
    gl.pixel_storei(GL::UNPACK_ALIGNMENT, 1);
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        internal as i32,
        width,
        1,
        0,
        layout,
        GL::UNSIGNED_BYTE,
        Some(data),
    )?;
    set_sampling(gl, GL::LINEAR);
    gl.bind_texture(GL::TEXTURE_2D, None);
    log::debug!("uploaded {format:?} row texture, {width} texels");
    Ok(texture)
}

/// Offscreen color buffer: an RGBA8 texture attached to its own framebuffer.
#[derive(Debug)]
pub struct RenderTarget {
    pub texture: WebGlTexture,
    pub framebuffer: WebGlFramebuffer,
    pub width: i32,
    pub height: i32,
}

impl RenderTarget {
    pub fn new(gl: &GL, width: i32, height: i32) -> Result<Self, DemoError> {
        let texture = gl.create_texture().ok_or(DemoError::Alloc("texture"))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA8 as i32,
            width,
            height,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            None,
        )?;
        set_sampling(gl, GL::LINEAR);

        let framebuffer = gl
            .create_framebuffer()
            .ok_or(DemoError::Alloc("framebuffer"))?;
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&framebuffer));
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_2D,
            Some(&texture),
            0,
        );
        let status = gl.check_framebuffer_status(GL::FRAMEBUFFER);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        gl.bind_texture(GL::TEXTURE_2D, None);
        if status != GL::FRAMEBUFFER_COMPLETE {
            return Err(DemoError::Framebuffer(status));
        }
        Ok(Self {
            texture,
            framebuffer,
            width,
            height,
        })
    }

    pub fn bind(&self, gl: &GL) {
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.framebuffer));
        gl.viewport(0, 0, self.width, self.height);
    }
}

#[cfg(test)]
pub(super) mod tests {
    use std::num::NonZeroUsize;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_test::*;

    use super::*;
    use crate::{noise, pack};

    wasm_bindgen_test_configure!(run_in_browser);

    /// WebGL2 context on a detached canvas.
    pub(crate) fn offscreen_gl(width: u32, height: u32) -> GL {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.get_context("webgl2").unwrap().unwrap().dyn_into().unwrap()
    }

    #[wasm_bindgen_test]
    fn packed_noise_uploads_as_rgba8_row() {
        let gl = offscreen_gl(8, 8);
        let step = NonZeroUsize::new(8).unwrap();
        let [r, g, b] = noise::generate_rgb(64, step, &mut StdRng::seed_from_u64(5));
        row_texture(&gl, RowFormat::Rgba8, &pack::pack_rgba(&r, &g, &b)).unwrap();
        assert_eq!(gl.get_error(), GL::NO_ERROR);
    }

    #[wasm_bindgen_test]
    fn grayscale_noise_uploads_as_unaligned_r8_row() {
        let gl = offscreen_gl(8, 8);
        let step = NonZeroUsize::new(5).unwrap();
        let row = noise::generate(33, step, &mut StdRng::seed_from_u64(9));
        row_texture(&gl, RowFormat::R8, &pack::pack_red(&row)).unwrap();
        assert_eq!(gl.get_error(), GL::NO_ERROR);
    }

    #[wasm_bindgen_test]
    fn render_target_is_complete_and_binds() {
        let gl = offscreen_gl(8, 8);
        let target = RenderTarget::new(&gl, 16, 8).unwrap();
        target.bind(&gl);
        assert_eq!(
            gl.check_framebuffer_status(GL::FRAMEBUFFER),
            GL::FRAMEBUFFER_COMPLETE
        );
        let bound = gl.get_parameter(GL::FRAMEBUFFER_BINDING).unwrap();
        assert_eq!(bound, JsValue::from(target.framebuffer.clone()));
        assert_eq!(gl.get_error(), GL::NO_ERROR);
    }

    #[wasm_bindgen_test]
    fn quad_program_links_and_draws() {
        let gl = offscreen_gl(8, 8);
        let program =
            link_program(&gl, crate::shaders::FULLSCREEN_VS, crate::shaders::GRID_FS).unwrap();
        let quad = fullscreen_quad(&gl).unwrap();
        gl.use_program(Some(&program));
        draw_quad(&gl, &quad);
        assert_eq!(gl.get_error(), GL::NO_ERROR);
    }

    #[wasm_bindgen_test]
    fn broken_shader_reports_info_log() {
        let gl = offscreen_gl(8, 8);
        let source = "#version 300 es\nnot glsl";
        let err = compile_shader(&gl, GL::FRAGMENT_SHADER, source).unwrap_err();
        assert!(matches!(err, DemoError::Compile(_)));
    }
}
