//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for cube3. The backend type is [`GL33`].

mod quad;
mod shader;
mod state;

pub use self::quad::Quad;
pub use self::shader::{Program, Stage};
use self::state::GLState;
pub use self::state::StateQueryError;

use cube3::backend::{Backend, QuadError};
use cube3::shader::{ProgramError, StageError, StageType, Uniform, UniformWarning};
use cube3::Transform;
use gl::types::*;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }
}

impl Backend for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  type QuadRepr = Quad;

  fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    unsafe { Stage::new(ty, src) }
  }

  fn new_program(
    &mut self,
    fragment: &Self::StageRepr,
    vertex: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    unsafe { Program::new(&self.state, fragment, vertex) }
  }

  fn ask_uniform<T>(
    &mut self,
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform<T>, UniformWarning> {
    unsafe { program.ask_uniform(name) }
  }

  fn new_quad(&mut self, vertices: &[[f32; 3]]) -> Result<Self::QuadRepr, QuadError> {
    unsafe { Quad::new(&self.state, vertices) }
  }

  fn use_program(&mut self, program: &Self::ProgramRepr) {
    unsafe { self.state.borrow_mut().use_program(program.handle) }
  }

  fn clear(&mut self, color: [f32; 4]) {
    let mut state = self.state.borrow_mut();

    unsafe {
      state.set_clear_color(color);
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }
  }

  fn set_transform(&mut self, uniform: &Uniform<Transform>, column_major: &[f32; 16]) {
    // column_major already is the transpose of the row-major transform
    unsafe {
      gl::UniformMatrix4fv(
        uniform.index(),
        1,
        gl::FALSE,
        column_major.as_ptr(),
      );
    }
  }

  fn draw(&mut self, quad: &Self::QuadRepr, vert_nb: usize) {
    let mut state = self.state.borrow_mut();

    unsafe {
      state.bind_vertex_array(quad.vao);
      gl::DrawArrays(gl::TRIANGLES, 0, vert_nb as GLsizei);
    }
  }
}
