use crate::gl33::state::GLState;
use cube3::backend::QuadError;
use gl::types::*;
use std::cell::RefCell;
use std::mem;
use std::ptr::null;
use std::rc::Rc;

// vertex attribute index of positions; matches `layout (location = 0)` in the vertex shader
const POSITION_ATTRIB: GLuint = 0;

/// Vertex array object and its vertex buffer, both deleted on drop.
#[derive(Debug)]
pub struct Quad {
  pub(crate) vao: GLuint,
  vbo: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Quad {
  fn drop(&mut self) {
    log::debug!("releasing vertex array {} and buffer {}", self.vao, self.vbo);

    let mut state = self.state.borrow_mut();
    state.forget_vertex_array(self.vao);
    state.forget_array_buffer(self.vbo);

    unsafe {
      gl::DeleteVertexArrays(1, &self.vao);
      gl::DeleteBuffers(1, &self.vbo);
    }
  }
}

impl Quad {
  pub(crate) unsafe fn new(
    state: &Rc<RefCell<GLState>>,
    vertices: &[[f32; 3]],
  ) -> Result<Self, QuadError> {
    let mut vao: GLuint = 0;
    let mut vbo: GLuint = 0;

    gl::GenVertexArrays(1, &mut vao);
    gl::GenBuffers(1, &mut vbo);

    // from here, dropping the quad deletes both objects
    let quad = Quad {
      vao,
      vbo,
      state: state.clone(),
    };

    if vao == 0 || vbo == 0 {
      return Err(QuadError::CannotCreate(format!(
        "vertex array {}, buffer {}",
        vao, vbo
      )));
    }

    let mut gfx_st = state.borrow_mut();

    // bind the vertex array first, then the buffer, so that the attribute pointer is recorded in
    // the vertex array
    gfx_st.bind_vertex_array(vao);
    gfx_st.bind_array_buffer(vbo);

    let bytes = mem::size_of_val(vertices);
    gl::BufferData(
      gl::ARRAY_BUFFER,
      bytes as GLsizeiptr,
      vertices.as_ptr() as *const _,
      gl::STATIC_DRAW,
    );

    gl::VertexAttribPointer(
      POSITION_ATTRIB,
      3,
      gl::FLOAT,
      gl::FALSE,
      mem::size_of::<[f32; 3]>() as GLsizei,
      null(),
    );
    gl::EnableVertexAttribArray(POSITION_ATTRIB);

    // the attribute pointer registered the buffer; both can be unbound safely
    gfx_st.bind_array_buffer(0);
    gfx_st.bind_vertex_array(0);

    drop(gfx_st);
    log::debug!("vertex array {} ({} bytes)", vao, bytes);

    Ok(quad)
  }
}
