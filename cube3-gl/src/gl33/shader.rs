use crate::gl33::state::GLState;
use cube3::shader::{ProgramError, StageError, StageType, Uniform, UniformWarning};
use gl::{self, types::*};
use std::cell::RefCell;
use std::ffi::CString;
use std::ptr::null;
use std::rc::Rc;

/// A compiled OpenGL shader object, deleted on drop.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Drop for Stage {
  fn drop(&mut self) {
    log::debug!("releasing {} {}", self.ty, self.handle);

    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

impl Stage {
  pub(crate) unsafe fn new(ty: StageType, src: &str) -> Result<Self, StageError> {
    let c_src = CString::new(src).map_err(|e| {
      StageError::compilation_failed(ty, format!("NUL byte at offset {}", e.nul_position()))
    })?;

    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::CreationFailed(ty));
    }

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle, ty })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      let mut written: GLsizei = 0;
      gl::GetShaderInfoLog(
        handle,
        log_len,
        &mut written,
        log.as_mut_ptr() as *mut GLchar,
      );
      log.truncate(written.max(0) as usize);

      // the shader is useless now
      gl::DeleteShader(handle);

      Err(StageError::compilation_failed(
        ty,
        String::from_utf8_lossy(&log).into_owned(),
      ))
    }
  }
}

/// A linked OpenGL program, deleted on drop.
#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    log::debug!("releasing program {}", self.handle);
    self.state.borrow_mut().forget_program(self.handle);

    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  pub(crate) unsafe fn new(
    state: &Rc<RefCell<GLState>>,
    fragment: &Stage,
    vertex: &Stage,
  ) -> Result<Self, ProgramError> {
    let handle = gl::CreateProgram();

    if handle == 0 {
      return Err(ProgramError::link_failed("unable to create program"));
    }

    gl::AttachShader(handle, fragment.handle);
    gl::AttachShader(handle, vertex.handle);

    // from here, dropping the program deletes the GL object, on failure too
    let program = Program {
      handle,
      state: state.clone(),
    };
    program.link()?;

    // the stages may be deleted right after; a linked program doesn’t need them attached
    gl::DetachShader(handle, fragment.handle);
    gl::DetachShader(handle, vertex.handle);

    Ok(program)
  }

  unsafe fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    gl::LinkProgram(handle);

    let mut linked: GLint = gl::FALSE.into();
    gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

    if linked == gl::TRUE.into() {
      log::debug!("program {} linked", handle);
      Ok(())
    } else {
      let mut log_len: GLint = 0;
      gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      let mut written: GLsizei = 0;
      gl::GetProgramInfoLog(
        handle,
        log_len,
        &mut written,
        log.as_mut_ptr() as *mut GLchar,
      );
      log.truncate(written.max(0) as usize);

      Err(ProgramError::link_failed(
        String::from_utf8_lossy(&log).into_owned(),
      ))
    }
  }

  pub(crate) unsafe fn ask_uniform<T>(&self, name: &str) -> Result<Uniform<T>, UniformWarning> {
    let c_name = CString::new(name.as_bytes()).map_err(|_| UniformWarning::inactive(name))?;
    let location = gl::GetUniformLocation(self.handle, c_name.as_ptr() as *const GLchar);

    // ensure the location smells good
    if location < 0 {
      return Err(UniformWarning::inactive(name));
    }

    Ok(Uniform::new(location))
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}
