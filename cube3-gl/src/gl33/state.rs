//! Graphics state.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Cached value.
///
/// A cached value is used to prevent issuing GPU commands if we know the target value is already
/// set to what the command tries to set.
#[derive(Debug)]
struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn new(initial: T) -> Self {
    Cached(Some(initial))
  }

  fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  /// A value is invalid if nothing is cached or if it differs from the cached one.
  fn is_invalid(&self, new_val: &T) -> bool {
    match &self.0 {
      Some(ref t) => t != new_val,
      _ => true,
    }
  }
}

/// The graphics state.
///
/// Forward-gate to the few state-changing OpenGL calls the backend issues every frame, with a small
/// cache layer over it to prevent from issuing the same call with the same parameters.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  clear_color: Cached<[GLfloat; 4]>,
  current_program: Cached<GLuint>,
  bound_vertex_array: Cached<GLuint>,
  bound_array_buffer: Cached<GLuint>,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          let state = Self::get_from_context()?;
          inner.take();
          Ok(state)
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }

  /// Get a `GLState` from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    if !gl::GetFloatv::is_loaded() || !gl::CreateShader::is_loaded() {
      return Err(StateQueryError::FunctionsNotLoaded);
    }

    unsafe {
      let clear_color = Cached::new(get_ctx_clear_color());
      let current_program = Cached::new(get_ctx_integer(gl::CURRENT_PROGRAM) as GLuint);
      let bound_vertex_array = Cached::new(get_ctx_integer(gl::VERTEX_ARRAY_BINDING) as GLuint);
      let bound_array_buffer = Cached::new(get_ctx_integer(gl::ARRAY_BUFFER_BINDING) as GLuint);

      Ok(GLState {
        _a: PhantomData,
        clear_color,
        current_program,
        bound_vertex_array,
        bound_array_buffer,
      })
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program.is_invalid(&handle) {
      gl::UseProgram(handle);
      self.current_program.set(handle);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint) {
    if self.bound_vertex_array.is_invalid(&handle) {
      gl::BindVertexArray(handle);
      self.bound_vertex_array.set(handle);
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer.is_invalid(&handle) {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer.set(handle);
    }
  }

  // a deleted object is unbound by OpenGL; forget it so that a recycled handle gets bound again
  pub(crate) fn forget_program(&mut self, handle: GLuint) {
    if !self.current_program.is_invalid(&handle) {
      self.current_program.set(0);
    }
  }

  pub(crate) fn forget_vertex_array(&mut self, handle: GLuint) {
    if !self.bound_vertex_array.is_invalid(&handle) {
      self.bound_vertex_array.set(0);
    }
  }

  pub(crate) fn forget_array_buffer(&mut self, handle: GLuint) {
    if !self.bound_array_buffer.is_invalid(&handle) {
      self.bound_array_buffer.set(0);
    }
  }
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
  /// The OpenGL function pointers were not loaded; there is probably no current context.
  FunctionsNotLoaded,
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::FunctionsNotLoaded => write!(f, "OpenGL functions not loaded"),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_clear_color() -> [GLfloat; 4] {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_integer(name: GLenum) -> GLint {
  let mut data = 0;
  gl::GetIntegerv(name, &mut data);
  data
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cache_invalidation() {
    let mut cached = Cached::new(3);

    assert!(!cached.is_invalid(&3));
    assert!(cached.is_invalid(&4));

    cached.set(4);
    assert!(!cached.is_invalid(&4));

    let empty: Cached<u32> = Cached(None);
    assert!(empty.is_invalid(&0));
  }

  #[test]
  fn no_state_without_context() {
    // nothing loaded the GL function pointers in unit tests
    match GLState::new() {
      Err(StateQueryError::FunctionsNotLoaded) => (),
      other => panic!("unexpected state: {:?}", other),
    }
  }
}
