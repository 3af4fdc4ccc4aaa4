use web_sys::{
    WebGl2RenderingContext as GL, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::gl::{draw_quad, fullscreen_quad, link_program, uniform};
use super::render::Demo;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::grid::GridUniforms;
use crate::shaders::{FULLSCREEN_VS, GRID_FS};

/// Hashed-grid demo. Stateless between frames apart from its uniforms.
pub struct GridDemo {
    gl: GL,
    program: WebGlProgram,
    quad: WebGlVertexArrayObject,
    u_resolution: WebGlUniformLocation,
    u_light: WebGlUniformLocation,
    u_grid: WebGlUniformLocation,
    uniforms: GridUniforms,
}

impl GridDemo {
    pub fn new(gl: GL, config: &DemoConfig, width: u32, height: u32) -> Result<Self, DemoError> {
        let program = link_program(&gl, FULLSCREEN_VS, GRID_FS)?;
        let quad = fullscreen_quad(&gl)?;
        Ok(Self {
            u_resolution: uniform(&gl, &program, "uResolution")?,
            u_light: uniform(&gl, &program, "uLightDirection")?,
            u_grid: uniform(&gl, &program, "uGridSize")?,
            uniforms: GridUniforms::new(config, width, height),
            gl,
            program,
            quad,
        })
    }

    /// Follow the canvas size; the next frame picks up the new resolution.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.uniforms.resize(width, height) {
            log::debug!("grid resolution now {width}x{height}");
        }
    }
}

impl Demo for GridDemo {
    fn frame(&mut self, _elapsed: f32) -> Result<(), DemoError> {
        let gl = &self.gl;
        let [w, h] = self.uniforms.resolution;
        let [lx, ly, lz] = self.uniforms.light_direction;
        let [cx, cy] = self.uniforms.cells;

        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        gl.viewport(0, 0, w as i32, h as i32);
        gl.use_program(Some(&self.program));
        gl.uniform2f(Some(&self.u_resolution), w, h);
        gl.uniform3f(Some(&self.u_light), lx, ly, lz);
        gl.uniform2f(Some(&self.u_grid), cx, cy);
        draw_quad(gl, &self.quad);
        Ok(())
    }
}
